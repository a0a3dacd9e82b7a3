// Archivo: file_storage.rs
// Propósito: implementar `KvStorage` sobre un directorio. Cada clave es un
// fichero `<clave-codificada>.json`; la escritura pasa por un temporal y un
// rename para no dejar registros a medias.
use crate::config::PersistenceConfig;
use draft_store::{KvStorage, Result, StoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";

/// Almacenamiento clave/valor en disco.
#[derive(Debug, Clone)]
pub struct FileStorage {
  dir: PathBuf,
  max_record_bytes: Option<usize>,
}

impl FileStorage {
  /// Crea el almacenamiento (y el directorio si no existe).
  pub fn new(config: &PersistenceConfig) -> Result<Self> {
    fs::create_dir_all(&config.dir)?;
    log::debug!("almacenamiento de borradores en {}", config.dir.display());
    Ok(Self { dir: config.dir.clone(), max_record_bytes: config.max_record_bytes })
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  fn path_for(&self, key: &str) -> PathBuf {
    self.dir.join(format!("{}.{}", encode_key(key), EXTENSION))
  }
}

/// Construye un `FileStorage` con la configuración del entorno.
pub fn new_from_env() -> Result<FileStorage> {
  FileStorage::new(&PersistenceConfig::from_env())
}

impl KvStorage for FileStorage {
  fn get(&self, key: &str) -> Result<Option<String>> {
    match fs::read_to_string(self.path_for(key)) {
      Ok(raw) => Ok(Some(raw)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(StoreError::Io(e)),
    }
  }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    if let Some(limit) = self.max_record_bytes {
      if value.len() > limit {
        return Err(StoreError::QuotaExceeded { key: key.to_string(), size: value.len(), limit });
      }
    }
    let path = self.path_for(key);
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, value)?;
    fs::rename(&tmp, &path)?;
    Ok(())
  }

  fn delete(&self, key: &str) -> Result<()> {
    match fs::remove_file(self.path_for(key)) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(e) => Err(StoreError::Io(e)),
    }
  }

  fn keys(&self) -> Result<Vec<String>> {
    let mut keys = Vec::new();
    for entry in fs::read_dir(&self.dir)? {
      let path = entry?.path();
      if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
        continue;
      }
      let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        continue;
      };
      match decode_key(stem) {
        Some(key) => keys.push(key),
        None => log::debug!("fichero ignorado en el directorio de borradores: {}", path.display()),
      }
    }
    keys.sort();
    Ok(keys)
  }
}

/// Codifica la clave para usarla como nombre de fichero: se conservan
/// `[A-Za-z0-9_-]` y el resto de bytes pasa a `%XX`.
fn encode_key(key: &str) -> String {
  let mut out = String::with_capacity(key.len());
  for b in key.bytes() {
    if b.is_ascii_alphanumeric() || b == b'_' || b == b'-' {
      out.push(b as char);
    } else {
      out.push_str(&format!("%{:02X}", b));
    }
  }
  out
}

fn decode_key(name: &str) -> Option<String> {
  let bytes = name.as_bytes();
  let mut out = Vec::with_capacity(bytes.len());
  let mut i = 0;
  while i < bytes.len() {
    if bytes[i] == b'%' {
      let hex = name.get(i + 1..i + 3)?;
      out.push(u8::from_str_radix(hex, 16).ok()?);
      i += 3;
    } else {
      out.push(bytes[i]);
      i += 1;
    }
  }
  String::from_utf8(out).ok()
}

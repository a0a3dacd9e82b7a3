// Archivo: config.rs
// Propósito: leer la configuración del almacenamiento desde el entorno
// (`.env` vía dotenvy + variables de proceso).
use std::path::PathBuf;

/// Directorio por defecto de los borradores.
pub const DEFAULT_DRAFTS_DIR: &str = ".drafts";

/// Configuración del almacenamiento en disco.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceConfig {
  /// Directorio donde se guarda un fichero por clave.
  pub dir: PathBuf,
  /// Tamaño máximo de un registro; por encima se rechaza como cuota excedida.
  pub max_record_bytes: Option<usize>,
}

impl Default for PersistenceConfig {
  fn default() -> Self {
    Self { dir: PathBuf::from(DEFAULT_DRAFTS_DIR), max_record_bytes: None }
  }
}

impl PersistenceConfig {
  /// Carga `.env` si existe y lee `DRAFTS_DIR` y `DRAFTS_MAX_RECORD_BYTES`.
  pub fn from_env() -> Self {
    dotenvy::dotenv().ok();
    Self::from_lookup(|name| std::env::var(name).ok())
  }

  /// Igual que `from_env` pero con una fuente de variables inyectada.
  pub fn from_lookup<F>(lookup: F) -> Self
    where F: Fn(&str) -> Option<String>
  {
    let mut cfg = Self::default();
    if let Some(dir) = lookup("DRAFTS_DIR").filter(|d| !d.trim().is_empty()) {
      cfg.dir = PathBuf::from(dir.trim());
    }
    if let Some(raw) = lookup("DRAFTS_MAX_RECORD_BYTES") {
      match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => cfg.max_record_bytes = Some(n),
        _ => log::warn!("DRAFTS_MAX_RECORD_BYTES inválido ('{}'); sin límite", raw),
      }
    }
    cfg
  }
}

// Archivo: stubs.rs
// Propósito: implementaciones en memoria del puerto `KvStorage` para pruebas
// y wiring rápido. No son durables.
use crate::errors::{Result, StoreError};
use crate::storage::KvStorage;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Almacenamiento en memoria con contadores y fallos simulables.
///
/// - `with_quota` limita el tamaño total en bytes (claves + valores) y
///   devuelve `QuotaExceeded` al superarlo, como el localStorage del
///   navegador.
/// - `set_available(false)` hace fallar todas las operaciones.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
  entries: Mutex<BTreeMap<String, String>>,
  quota: Option<usize>,
  unavailable: AtomicBool,
  writes: AtomicUsize,
  deletes: AtomicUsize,
}

impl InMemoryStorage {
  /// Crea un almacenamiento vacío y sin cuota.
  pub fn new() -> Self {
    Self::default()
  }

  /// Crea un almacenamiento vacío limitado a `bytes`.
  pub fn with_quota(bytes: usize) -> Self {
    Self { quota: Some(bytes), ..Self::default() }
  }

  /// Activa o desactiva la disponibilidad simulada.
  pub fn set_available(&self, available: bool) {
    self.unavailable.store(!available, Ordering::SeqCst);
  }

  /// Escrituras que llegaron a guardarse.
  pub fn writes(&self) -> usize {
    self.writes.load(Ordering::SeqCst)
  }

  /// Borrados ejecutados (existiera o no la clave).
  pub fn deletes(&self) -> usize {
    self.deletes.load(Ordering::SeqCst)
  }

  /// Valor crudo en `key`, saltándose la disponibilidad simulada.
  pub fn raw(&self, key: &str) -> Option<String> {
    self.lock().get(key).cloned()
  }

  pub fn contains(&self, key: &str) -> bool {
    self.lock().contains_key(key)
  }

  /// Inserta un valor crudo sin contar como escritura (semilla de pruebas).
  pub fn seed(&self, key: &str, value: &str) {
    self.lock().insert(key.to_string(), value.to_string());
  }

  fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
    self.entries.lock().unwrap_or_else(|e| e.into_inner())
  }

  fn check_available(&self) -> Result<()> {
    if self.unavailable.load(Ordering::SeqCst) {
      return Err(StoreError::Unavailable("almacenamiento en memoria deshabilitado".into()));
    }
    Ok(())
  }
}

impl KvStorage for InMemoryStorage {
  fn get(&self, key: &str) -> Result<Option<String>> {
    self.check_available()?;
    Ok(self.lock().get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    self.check_available()?;
    let mut entries = self.lock();
    if let Some(limit) = self.quota {
      // tamaño resultante si se reemplaza el valor actual
      let used: usize = entries.iter()
                               .filter(|(k, _)| k.as_str() != key)
                               .map(|(k, v)| k.len() + v.len())
                               .sum();
      let size = used + key.len() + value.len();
      if size > limit {
        return Err(StoreError::QuotaExceeded { key: key.to_string(), size, limit });
      }
    }
    entries.insert(key.to_string(), value.to_string());
    self.writes.fetch_add(1, Ordering::SeqCst);
    Ok(())
  }

  fn delete(&self, key: &str) -> Result<()> {
    self.check_available()?;
    self.lock().remove(key);
    self.deletes.fetch_add(1, Ordering::SeqCst);
    Ok(())
  }

  fn keys(&self) -> Result<Vec<String>> {
    self.check_available()?;
    Ok(self.lock().keys().cloned().collect())
  }
}

/// Almacenamiento que falla en todas las operaciones y cuenta los intentos.
#[derive(Debug, Default)]
pub struct FailingStorage {
  attempts: AtomicUsize,
}

impl FailingStorage {
  pub fn new() -> Self {
    Self::default()
  }

  /// Número de llamadas recibidas.
  pub fn attempts(&self) -> usize {
    self.attempts.load(Ordering::SeqCst)
  }

  fn fail<T>(&self) -> Result<T> {
    self.attempts.fetch_add(1, Ordering::SeqCst);
    Err(StoreError::Unavailable("almacenamiento deshabilitado".into()))
  }
}

impl KvStorage for FailingStorage {
  fn get(&self, _key: &str) -> Result<Option<String>> {
    self.fail()
  }

  fn set(&self, _key: &str, _value: &str) -> Result<()> {
    self.fail()
  }

  fn delete(&self, _key: &str) -> Result<()> {
    self.fail()
  }

  fn keys(&self) -> Result<Vec<String>> {
    self.fail()
  }
}

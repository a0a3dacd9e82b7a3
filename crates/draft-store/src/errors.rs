// Archivo: errors.rs
// Propósito: definir los errores del almacenamiento local de borradores y el
// alias Result<T> usado por las implementaciones de `KvStorage`.
use thiserror::Error;
/// Errores del almacenamiento clave/valor.
///
/// Ninguno de estos errores sale de `PersistentDraftStore`: el store los
/// registra y continúa en memoria. Existen para que las implementaciones del
/// puerto puedan describir el fallo.
#[derive(Error, Debug)]
pub enum StoreError {
  /// El almacenamiento no está disponible (deshabilitado, sin permisos...).
  #[error("Almacenamiento no disponible: {0}")]
  Unavailable(String),
  /// Se superó la cuota del almacenamiento.
  #[error("Cuota excedida al escribir '{key}': {size} bytes (límite {limit})")]
  QuotaExceeded { key: String, size: usize, limit: usize },
  /// Error al (de)serializar el registro.
  #[error("Error de serialización: {0}")]
  Serialization(String),
  /// Error de E/S del backend.
  #[error("Error de E/S: {0}")]
  Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for StoreError {
  fn from(e: serde_json::Error) -> Self {
    Self::Serialization(e.to_string())
  }
}

/// Alias de resultado usado por las APIs del crate.
pub type Result<T> = std::result::Result<T, StoreError>;

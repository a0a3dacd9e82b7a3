// Archivo: storage.rs
// Propósito: definir el trait `KvStorage`, el puerto clave/valor que respalda
// a los borradores. Describe el contrato que deben implementar los backends
// (memoria, directorio en disco, etc.).
use crate::errors::Result;

/// Almacenamiento persistente plano indexado por string.
///
/// Cada operación puede fallar; quien lo use debe degradar con elegancia.
/// No hay transacciones entre claves: gana la última escritura.
pub trait KvStorage: Send + Sync {
  /// Lee el valor crudo en `key`. `Ok(None)` si no existe.
  fn get(&self, key: &str) -> Result<Option<String>>;

  /// Escribe (o reemplaza) el valor en `key`.
  fn set(&self, key: &str, value: &str) -> Result<()>;

  /// Borra `key`. Borrar una clave inexistente no es un error.
  fn delete(&self, key: &str) -> Result<()>;

  /// Lista las claves presentes, en orden lexicográfico.
  fn keys(&self) -> Result<Vec<String>>;
}

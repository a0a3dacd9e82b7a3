// Archivo: record.rs
// Propósito: formato del registro persistido por clave.
//
//   { "v": <versión>, "data": <borrador>, "updated": <epoch-ms> }
//
// Es el único formato exacto que este crate posee; el esquema de `data` lo
// define cada asistente y aquí es opaco.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Registro versionado tal y como se guarda en el almacenamiento.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord<T> {
  /// Versión del esquema con la que se escribió.
  pub v: u32,
  /// Estado del borrador.
  pub data: T,
  /// Momento de la escritura, en milisegundos desde epoch. Sólo informativo:
  /// un registro sin él sigue siendo válido.
  #[serde(default)]
  pub updated: i64,
}

impl<T> StoredRecord<T> {
  pub fn new(version: u32, data: T, updated: i64) -> Self {
    Self { v: version, data, updated }
  }
}

impl<T: Serialize> StoredRecord<T> {
  /// Serializa el registro a JSON.
  pub fn to_json(&self) -> serde_json::Result<String> {
    serde_json::to_string(self)
  }
}

/// Interpreta `raw` como registro de la versión `version`.
///
/// Devuelve `None` si el JSON es inválido, si falta `v` o no coincide, o si
/// `data` no se puede decodificar como `T`. `updated` ausente vale 0. Nunca
/// falla.
pub fn decode_record<T: DeserializeOwned>(raw: &str, version: u32) -> Option<StoredRecord<T>> {
  let value: JsonValue = serde_json::from_str(raw).ok()?;
  let v = value.get("v")?.as_u64()?;
  if v != u64::from(version) {
    return None;
  }
  serde_json::from_value(value).ok()
}

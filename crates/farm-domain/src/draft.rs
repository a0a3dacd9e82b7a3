// draft.rs
use crate::DomainError;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

/// Estado de un borrador: `draft` mientras se edita, `saved` al emitirse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftStatus {
  #[default]
  Draft,
  Saved,
}

impl fmt::Display for DraftStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      DraftStatus::Draft => "draft",
      DraftStatus::Saved => "saved",
    };
    write!(f, "{}", s)
  }
}

/// Campos comunes a todos los borradores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftMeta {
  pub id: Uuid,
  pub status: DraftStatus,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl DraftMeta {
  pub fn new(now: DateTime<Utc>) -> Self {
    Self { id: Uuid::new_v4(), status: DraftStatus::Draft, created_at: now, updated_at: now }
  }
}

/// Contrato de un borrador editable por un asistente.
///
/// `KIND` se usa para el espacio de nombres de la clave local
/// (`<kind>_draft_<id>`).
pub trait Draft: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
  const KIND: &'static str;

  /// Borrador vacío creado en `now`.
  fn fresh(now: DateTime<Utc>) -> Self;

  fn meta(&self) -> &DraftMeta;

  fn meta_mut(&mut self) -> &mut DraftMeta;

  fn id(&self) -> Uuid {
    self.meta().id
  }

  fn status(&self) -> DraftStatus {
    self.meta().status
  }

  /// Refresca `updatedAt`.
  fn touch(&mut self, at: DateTime<Utc>) {
    self.meta_mut().updated_at = at;
  }
}

/// Campos que un parche nunca puede reescribir. `status` sólo pasa a
/// `saved` al emitir el borrador; `updatedAt` lo fija `touch`.
const PROTECTED_FIELDS: [&str; 4] = ["id", "createdAt", "status", "updatedAt"];

/// Mezcla superficialmente el objeto JSON `patch` sobre `draft`.
///
/// Cada clave de primer nivel reemplaza a la existente; los metadatos
/// (`id`, `createdAt`, `status`, `updatedAt`) se ignoran. Falla si `patch` no es un objeto o si el resultado no encaja
/// en el tipo del borrador (el borrador original no se toca).
pub fn apply_json_patch<D: Draft>(draft: &D, patch: &JsonValue) -> Result<D, DomainError> {
  let patch = patch.as_object()
                   .ok_or_else(|| DomainError::ValidationError("el parche debe ser un objeto JSON".to_string()))?;
  let mut value = serde_json::to_value(draft)?;
  let target = value.as_object_mut()
                    .ok_or_else(|| DomainError::SerializationError("el borrador no serializa como objeto".to_string()))?;
  for (key, v) in patch {
    if PROTECTED_FIELDS.contains(&key.as_str()) {
      continue;
    }
    target.insert(key.clone(), v.clone());
  }
  Ok(serde_json::from_value(value)?)
}

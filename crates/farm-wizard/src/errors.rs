use thiserror::Error;

// Errores comunes de los asistentes.
//
// Los fallos de validación de un paso NO son errores: se devuelven como
// `ErrorMap`. Aquí sólo hay usos inválidos de la API (guardar fuera del
// último paso, editar un asistente cerrado...) y errores de las capas de
// abajo.
#[derive(Error, Debug)]
pub enum WizardError {
  /// Errores originados por el dominio (parches inválidos, ids inexistentes).
  #[error("Error de dominio: {0}")]
  Domain(#[from] farm_domain::DomainError),

  /// Errores del almacenamiento local (sólo en operaciones explícitas como
  /// listar o descartar borradores; el store nunca los propaga).
  #[error("Error de almacenamiento: {0}")]
  Store(#[from] draft_store::StoreError),

  /// Errores de serializacion/deserializacion JSON.
  #[error("Error de serializacion: {0}")]
  Serialization(#[from] serde_json::Error),

  /// Configuracion o uso inválido (por ejemplo, asistente sin pasos).
  #[error("Error de validacion: {0}")]
  Validation(String),

  /// El asistente ya se cerró (guardado o cancelado).
  #[error("El asistente está cerrado")]
  Closed,

  /// Hay un guardado en curso; el control de guardar está deshabilitado.
  #[error("Guardado en curso")]
  SaveInProgress,

  /// Sólo se puede guardar desde el último paso.
  #[error("Sólo se puede guardar desde el último paso (actual {current}, último {last})")]
  NotAtFinalStep { current: usize, last: usize },
}

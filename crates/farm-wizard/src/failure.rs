// Archivo: failure.rs
// Propósito: convertir los fallos del guardado remoto en un mensaje legible.
//
// Las respuestas de error del backend llegan con formas distintas. Se
// interpretan una sola vez, en el borde, como una unión cerrada
// (`ApiErrorBody`) y se reducen a `FailureMessage { message }` antes de
// llegar al asistente.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const MAX_RAW_CHARS: usize = 200;

/// Cuerpos de error conocidos del backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorBody {
  /// `{ "message": "..." }`
  Message(String),
  /// `{ "error": { "message": "..." } }`
  Nested(String),
  /// `{ "error": "..." }`
  ErrorText(String),
  /// `{ "detail": "..." }`
  Detail(String),
  /// `{ "errors": { "campo": ["..."] } }`
  FieldErrors(BTreeMap<String, Vec<String>>),
  /// Cualquier otra cosa (texto plano, HTML de un proxy...).
  Raw(String),
}

#[derive(Deserialize)]
struct NestedError {
  message: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KnownBody {
  Message { message: String },
  Nested { error: NestedError },
  ErrorText { error: String },
  Detail { detail: String },
  FieldErrors { errors: BTreeMap<String, Vec<String>> },
}

impl ApiErrorBody {
  /// Interpreta el cuerpo crudo; nunca falla.
  pub fn parse(raw: &str) -> Self {
    match serde_json::from_str::<KnownBody>(raw) {
      Ok(KnownBody::Message { message }) => ApiErrorBody::Message(message),
      Ok(KnownBody::Nested { error }) => ApiErrorBody::Nested(error.message),
      Ok(KnownBody::ErrorText { error }) => ApiErrorBody::ErrorText(error),
      Ok(KnownBody::Detail { detail }) => ApiErrorBody::Detail(detail),
      Ok(KnownBody::FieldErrors { errors }) => ApiErrorBody::FieldErrors(errors),
      Err(_) => ApiErrorBody::Raw(raw.to_string()),
    }
  }

  fn message(&self) -> Option<String> {
    let text = match self {
      ApiErrorBody::Message(m) | ApiErrorBody::Nested(m) | ApiErrorBody::ErrorText(m) | ApiErrorBody::Detail(m) => {
        m.trim().to_string()
      }
      ApiErrorBody::FieldErrors(errors) => errors.iter()
                                                 .filter_map(|(field, msgs)| {
                                                   msgs.first().map(|m| format!("{}: {}", field, m.trim()))
                                                 })
                                                 .collect::<Vec<_>>()
                                                 .join("; "),
      ApiErrorBody::Raw(raw) => {
        let raw = raw.trim();
        // HTML de error de un proxy no le dice nada al usuario
        if raw.starts_with('<') {
          String::new()
        } else {
          raw.chars().take(MAX_RAW_CHARS).collect()
        }
      }
    };
    if text.is_empty() {
      None
    } else {
      Some(text)
    }
  }
}

/// Fallo devuelto por el callback de guardado.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveFailure {
  /// El backend respondió con un estado de error.
  Api { status: u16, body: ApiErrorBody },
  /// No hubo conexión.
  Network(String),
  /// El backend no respondió a tiempo.
  Timeout,
  /// El llamador rechazó el borrador con un mensaje propio.
  Rejected(String),
}

impl SaveFailure {
  /// Construye el fallo a partir de una respuesta HTTP cruda.
  pub fn from_response(status: u16, raw_body: &str) -> Self {
    SaveFailure::Api { status, body: ApiErrorBody::parse(raw_body) }
  }
}

impl fmt::Display for SaveFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", FailureMessage::from(self).message)
  }
}

impl std::error::Error for SaveFailure {}

/// Mensaje uniforme que se muestra al usuario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureMessage {
  pub message: String,
}

impl From<&SaveFailure> for FailureMessage {
  fn from(failure: &SaveFailure) -> Self {
    let message = match failure {
      SaveFailure::Api { status, body } => body.message().unwrap_or_else(|| status_message(*status)),
      SaveFailure::Network(_) => "No hay conexión con el servidor. Tu borrador sigue guardado en este equipo.".to_string(),
      SaveFailure::Timeout => "El servidor tardó demasiado en responder. Inténtalo de nuevo.".to_string(),
      SaveFailure::Rejected(msg) if !msg.trim().is_empty() => msg.trim().to_string(),
      SaveFailure::Rejected(_) => "No se pudo guardar.".to_string(),
    };
    FailureMessage { message }
  }
}

fn status_message(status: u16) -> String {
  match status {
    400 => "La solicitud no es válida.".to_string(),
    401 => "Tu sesión expiró. Vuelve a iniciar sesión.".to_string(),
    403 => "No tienes permiso para publicar este contenido.".to_string(),
    404 => "El recurso ya no existe.".to_string(),
    409 => "El contenido fue modificado por otra persona.".to_string(),
    413 => "El contenido es demasiado grande.".to_string(),
    500..=599 => "El servidor no está disponible. Inténtalo más tarde.".to_string(),
    other => format!("Error inesperado ({}).", other),
  }
}

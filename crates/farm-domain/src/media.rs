// media.rs
use serde::{Deserialize, Serialize};

/// Multimedia adjunta a un borrador.
///
/// Imagen y vídeo son excluyentes: elegir uno reemplaza al otro.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MediaSelection {
  #[default]
  None,
  Image { url: String, alt: String },
  Video { url: String },
}

impl MediaSelection {
  pub fn image(url: impl Into<String>, alt: impl Into<String>) -> Self {
    MediaSelection::Image { url: url.into(), alt: alt.into() }
  }

  pub fn video(url: impl Into<String>) -> Self {
    MediaSelection::Video { url: url.into() }
  }

  pub fn url(&self) -> Option<&str> {
    match self {
      MediaSelection::None => None,
      MediaSelection::Image { url, .. } | MediaSelection::Video { url } => Some(url.as_str()),
    }
  }

  pub fn is_none(&self) -> bool {
    matches!(self, MediaSelection::None)
  }

  pub fn label(&self) -> &'static str {
    match self {
      MediaSelection::None => "ninguno",
      MediaSelection::Image { .. } => "imagen",
      MediaSelection::Video { .. } => "vídeo",
    }
  }
}

// rules.rs
//
// Reglas de validación compartidas por los pasos. Se usa una sola política:
// umbrales de longitud mínima (un umbral de 1 equivale a "obligatorio").
use crate::step::ErrorMap;
use farm_domain::MediaSelection;

/// Exige al menos `min` caracteres (sin contar espacios extremos).
pub fn min_chars(errors: &mut ErrorMap, field: &str, label: &str, value: &str, min: usize) {
  let len = value.trim().chars().count();
  if len == 0 {
    errors.insert(field, format!("{} es obligatorio", label));
  } else if len < min {
    errors.insert(field, format!("{} debe tener al menos {} caracteres", label, min));
  }
}

/// Exige un valor elegido y no vacío.
pub fn required(errors: &mut ErrorMap, field: &str, label: &str, value: Option<&str>) {
  if value.map(str::trim).unwrap_or_default().is_empty() {
    errors.insert(field, format!("Selecciona {}", label));
  }
}

/// Si hay multimedia elegida, exige URL http(s) y, para imágenes, texto
/// alternativo.
pub fn media(errors: &mut ErrorMap, field: &str, media: &MediaSelection) {
  let Some(url) = media.url() else {
    return;
  };
  let url = url.trim();
  if url.is_empty() {
    errors.insert(field, format!("Indica la URL del {}", media.label()));
  } else if !(url.starts_with("https://") || url.starts_with("http://")) {
    errors.insert(field, "La URL debe empezar por http:// o https://");
  } else if let MediaSelection::Image { alt, .. } = media {
    if alt.trim().is_empty() {
      errors.insert(field, "Describe la imagen (texto alternativo)");
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn min_chars_distinguishes_empty_and_short() {
    let mut errors = ErrorMap::new();
    min_chars(&mut errors, "title", "El título", "   ", 5);
    min_chars(&mut errors, "summary", "El resumen", "abc", 5);
    min_chars(&mut errors, "ok", "Ok", "ñandú", 5);
    assert_eq!(errors.get("title"), Some("El título es obligatorio"));
    assert_eq!(errors.get("summary"), Some("El resumen debe tener al menos 5 caracteres"));
    assert!(!errors.contains("ok"));
  }

  #[test]
  fn media_rules() {
    let mut errors = ErrorMap::new();
    media(&mut errors, "none", &MediaSelection::None);
    media(&mut errors, "video", &MediaSelection::video("ftp://x"));
    media(&mut errors, "image", &MediaSelection::image("https://x/a.png", ""));
    media(&mut errors, "empty", &MediaSelection::video(" "));
    assert!(!errors.contains("none"));
    assert!(errors.contains("video"));
    assert_eq!(errors.get("image"), Some("Describe la imagen (texto alternativo)"));
    assert_eq!(errors.get("empty"), Some("Indica la URL del vídeo"));
  }
}

// post.rs
use crate::{Draft, DraftMeta, MediaSelection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Borrador de una publicación de discusión.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
  #[serde(flatten)]
  pub meta: DraftMeta,
  pub title: String,
  pub content: String,
  pub category: Option<String>,
  #[serde(default)]
  pub tags: Vec<String>,
  #[serde(default)]
  pub media: MediaSelection,
}

impl PostDraft {
  /// Añade una etiqueta normalizada (minúsculas, sin espacios extremos).
  /// Ignora vacías y duplicadas; devuelve `true` si se añadió.
  pub fn add_tag(&mut self, tag: &str) -> bool {
    let tag = tag.trim().to_lowercase();
    if tag.is_empty() || self.tags.contains(&tag) {
      return false;
    }
    self.tags.push(tag);
    true
  }

  pub fn remove_tag(&mut self, tag: &str) -> bool {
    let tag = tag.trim().to_lowercase();
    let before = self.tags.len();
    self.tags.retain(|t| t != &tag);
    before != self.tags.len()
  }
}

impl Draft for PostDraft {
  const KIND: &'static str = "post";

  fn fresh(now: DateTime<Utc>) -> Self {
    PostDraft { meta: DraftMeta::new(now),
                title: String::new(),
                content: String::new(),
                category: None,
                tags: Vec::new(),
                media: MediaSelection::None }
  }

  fn meta(&self) -> &DraftMeta {
    &self.meta
  }

  fn meta_mut(&mut self) -> &mut DraftMeta {
    &mut self.meta
  }
}

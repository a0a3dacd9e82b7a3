// practice.rs
use crate::{Draft, DraftMeta, MediaSelection, StepList};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Borrador de una buena práctica de la base de conocimiento.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeDraft {
  #[serde(flatten)]
  pub meta: DraftMeta,
  pub title: String,
  pub summary: String,
  #[serde(default)]
  pub categories: Vec<String>,
  #[serde(default)]
  pub steps: StepList,
  #[serde(default)]
  pub media: MediaSelection,
}

impl PracticeDraft {
  /// Marca o desmarca una categoría. Devuelve `true` si queda seleccionada.
  pub fn toggle_category(&mut self, category: &str) -> bool {
    let category = category.trim();
    if let Some(pos) = self.categories.iter().position(|c| c == category) {
      self.categories.remove(pos);
      false
    } else if category.is_empty() {
      false
    } else {
      self.categories.push(category.to_string());
      true
    }
  }
}

impl Draft for PracticeDraft {
  const KIND: &'static str = "practice";

  fn fresh(now: DateTime<Utc>) -> Self {
    PracticeDraft { meta: DraftMeta::new(now),
                    title: String::new(),
                    summary: String::new(),
                    categories: Vec::new(),
                    steps: StepList::new(),
                    media: MediaSelection::None }
  }

  fn meta(&self) -> &DraftMeta {
    &self.meta
  }

  fn meta_mut(&mut self) -> &mut DraftMeta {
    &mut self.meta
  }
}

// post_wizard.rs
//! Asistente de publicaciones de discusión: contenido → clasificación →
//! revisión.
use crate::engine::MultiStepForm;
use crate::flows::rules;
use crate::step::{ErrorMap, WizardStep};
use farm_domain::PostDraft;

pub type PostWizard = MultiStepForm<PostDraft>;

pub const TITLE_MIN_CHARS: usize = 5;
pub const CONTENT_MIN_CHARS: usize = 10;
pub const MAX_TAGS: usize = 5;

/// Paso 1: título y cuerpo.
#[derive(Default, Clone)]
pub struct PostContentStep;

impl WizardStep<PostDraft> for PostContentStep {
  fn name(&self) -> &str {
    "content"
  }
  fn title(&self) -> &str {
    "Contenido"
  }
  fn fields(&self) -> &[&'static str] {
    &["title", "content"]
  }
  fn validate(&self, draft: &PostDraft) -> ErrorMap {
    let mut errors = ErrorMap::new();
    rules::min_chars(&mut errors, "title", "El título", &draft.title, TITLE_MIN_CHARS);
    rules::min_chars(&mut errors, "content", "El contenido", &draft.content, CONTENT_MIN_CHARS);
    errors
  }
}

/// Paso 2: categoría, etiquetas y multimedia.
#[derive(Default, Clone)]
pub struct PostClassificationStep;

impl WizardStep<PostDraft> for PostClassificationStep {
  fn name(&self) -> &str {
    "classification"
  }
  fn title(&self) -> &str {
    "Clasificación"
  }
  fn fields(&self) -> &[&'static str] {
    &["category", "tags", "media"]
  }
  fn validate(&self, draft: &PostDraft) -> ErrorMap {
    let mut errors = ErrorMap::new();
    rules::required(&mut errors, "category", "una categoría", draft.category.as_deref());
    if draft.tags.len() > MAX_TAGS {
      errors.insert("tags", format!("Usa como máximo {} etiquetas", MAX_TAGS));
    }
    rules::media(&mut errors, "media", &draft.media);
    errors
  }
}

/// Paso 3: revisión final, sin reglas propias.
#[derive(Default, Clone)]
pub struct PostReviewStep;

impl WizardStep<PostDraft> for PostReviewStep {
  fn name(&self) -> &str {
    "review"
  }
  fn title(&self) -> &str {
    "Revisión"
  }
}

pub fn steps() -> Vec<Box<dyn WizardStep<PostDraft>>> {
  vec![Box::new(PostContentStep), Box::new(PostClassificationStep), Box::new(PostReviewStep)]
}

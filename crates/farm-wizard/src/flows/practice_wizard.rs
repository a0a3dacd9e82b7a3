// practice_wizard.rs
//! Asistente de buenas prácticas: información → categorías → pasos →
//! multimedia → revisión.
use crate::engine::MultiStepForm;
use crate::flows::rules;
use crate::step::{ErrorMap, WizardStep};
use farm_domain::PracticeDraft;

pub type PracticeWizard = MultiStepForm<PracticeDraft>;

pub const TITLE_MIN_CHARS: usize = 5;
pub const SUMMARY_MIN_CHARS: usize = 20;
pub const STEP_MIN_CHARS: usize = 3;

#[derive(Default, Clone)]
pub struct PracticeInfoStep;

impl WizardStep<PracticeDraft> for PracticeInfoStep {
  fn name(&self) -> &str {
    "info"
  }
  fn title(&self) -> &str {
    "Información básica"
  }
  fn fields(&self) -> &[&'static str] {
    &["title", "summary"]
  }
  fn validate(&self, draft: &PracticeDraft) -> ErrorMap {
    let mut errors = ErrorMap::new();
    rules::min_chars(&mut errors, "title", "El título", &draft.title, TITLE_MIN_CHARS);
    rules::min_chars(&mut errors, "summary", "El resumen", &draft.summary, SUMMARY_MIN_CHARS);
    errors
  }
}

#[derive(Default, Clone)]
pub struct PracticeCategoriesStep;

impl WizardStep<PracticeDraft> for PracticeCategoriesStep {
  fn name(&self) -> &str {
    "categories"
  }
  fn title(&self) -> &str {
    "Categorías"
  }
  fn fields(&self) -> &[&'static str] {
    &["categories"]
  }
  fn validate(&self, draft: &PracticeDraft) -> ErrorMap {
    let mut errors = ErrorMap::new();
    if draft.categories.is_empty() {
      errors.insert("categories", "Selecciona al menos una categoría");
    }
    errors
  }
}

/// Pasos de la práctica: al menos uno y ninguno demasiado corto.
#[derive(Default, Clone)]
pub struct PracticeStepsStep;

impl WizardStep<PracticeDraft> for PracticeStepsStep {
  fn name(&self) -> &str {
    "steps"
  }
  fn title(&self) -> &str {
    "Pasos"
  }
  fn fields(&self) -> &[&'static str] {
    &["steps"]
  }
  fn validate(&self, draft: &PracticeDraft) -> ErrorMap {
    let mut errors = ErrorMap::new();
    if draft.steps.is_empty() {
      errors.insert("steps", "Añade al menos un paso");
      return errors;
    }
    if let Some(short) = draft.steps.iter().find(|s| s.text.trim().chars().count() < STEP_MIN_CHARS) {
      errors.insert("steps",
                    format!("El paso {} debe tener al menos {} caracteres", short.order + 1, STEP_MIN_CHARS));
    }
    errors
  }
}

#[derive(Default, Clone)]
pub struct PracticeMediaStep;

impl WizardStep<PracticeDraft> for PracticeMediaStep {
  fn name(&self) -> &str {
    "media"
  }
  fn title(&self) -> &str {
    "Multimedia"
  }
  fn fields(&self) -> &[&'static str] {
    &["media"]
  }
  fn validate(&self, draft: &PracticeDraft) -> ErrorMap {
    let mut errors = ErrorMap::new();
    rules::media(&mut errors, "media", &draft.media);
    errors
  }
}

#[derive(Default, Clone)]
pub struct PracticeReviewStep;

impl WizardStep<PracticeDraft> for PracticeReviewStep {
  fn name(&self) -> &str {
    "review"
  }
  fn title(&self) -> &str {
    "Revisión"
  }
}

pub fn steps() -> Vec<Box<dyn WizardStep<PracticeDraft>>> {
  vec![Box::new(PracticeInfoStep),
       Box::new(PracticeCategoriesStep),
       Box::new(PracticeStepsStep),
       Box::new(PracticeMediaStep),
       Box::new(PracticeReviewStep)]
}

// question_wizard.rs
//! Asistente de preguntas del quiz: enunciado → respuestas → explicación.
use crate::engine::MultiStepForm;
use crate::flows::rules;
use crate::step::{ErrorMap, WizardStep};
use farm_domain::{QuestionDraft, QuestionKind};

pub type QuestionWizard = MultiStepForm<QuestionDraft>;

pub const STATEMENT_MIN_CHARS: usize = 10;
pub const MIN_CHOICES: usize = 2;
pub const EXPLANATION_MIN_CHARS: usize = 10;

#[derive(Default, Clone)]
pub struct QuestionStatementStep;

impl WizardStep<QuestionDraft> for QuestionStatementStep {
  fn name(&self) -> &str {
    "statement"
  }
  fn title(&self) -> &str {
    "Pregunta"
  }
  fn fields(&self) -> &[&'static str] {
    &["statement", "kind", "category", "difficulty"]
  }
  fn validate(&self, draft: &QuestionDraft) -> ErrorMap {
    let mut errors = ErrorMap::new();
    rules::min_chars(&mut errors, "statement", "El enunciado", &draft.statement, STATEMENT_MIN_CHARS);
    rules::required(&mut errors, "category", "una categoría", draft.category.as_deref());
    errors
  }
}

/// Respuestas según el tipo de pregunta.
#[derive(Default, Clone)]
pub struct QuestionAnswersStep;

impl WizardStep<QuestionDraft> for QuestionAnswersStep {
  fn name(&self) -> &str {
    "answers"
  }
  fn title(&self) -> &str {
    "Respuestas"
  }
  fn fields(&self) -> &[&'static str] {
    &["choices", "trueFalseAnswer", "referenceAnswer"]
  }
  fn validate(&self, draft: &QuestionDraft) -> ErrorMap {
    let mut errors = ErrorMap::new();
    match draft.kind {
      QuestionKind::MultipleChoice => {
        if draft.choices.len() < MIN_CHOICES {
          errors.insert("choices", format!("Añade al menos {} opciones", MIN_CHOICES));
        } else if draft.choices.iter().any(|c| c.text.trim().is_empty()) {
          errors.insert("choices", "Ninguna opción puede quedar vacía");
        } else if draft.correct_count() == 0 {
          errors.insert("choices", "Marca al menos una opción correcta");
        }
      }
      QuestionKind::TrueFalse => {
        if draft.true_false_answer.is_none() {
          errors.insert("trueFalseAnswer", "Indica si la afirmación es verdadera o falsa");
        }
      }
      QuestionKind::OpenAnswer => {
        if draft.reference_answer.trim().is_empty() {
          errors.insert("referenceAnswer", "Escribe la respuesta de referencia");
        }
      }
    }
    errors
  }
}

/// Explicación opcional; si se escribe, con un mínimo de contenido.
#[derive(Default, Clone)]
pub struct QuestionExplanationStep;

impl WizardStep<QuestionDraft> for QuestionExplanationStep {
  fn name(&self) -> &str {
    "explanation"
  }
  fn title(&self) -> &str {
    "Explicación y revisión"
  }
  fn fields(&self) -> &[&'static str] {
    &["explanation"]
  }
  fn validate(&self, draft: &QuestionDraft) -> ErrorMap {
    let mut errors = ErrorMap::new();
    if !draft.explanation.trim().is_empty() {
      rules::min_chars(&mut errors, "explanation", "La explicación", &draft.explanation, EXPLANATION_MIN_CHARS);
    }
    errors
  }
}

pub fn steps() -> Vec<Box<dyn WizardStep<QuestionDraft>>> {
  vec![Box::new(QuestionStatementStep), Box::new(QuestionAnswersStep), Box::new(QuestionExplanationStep)]
}

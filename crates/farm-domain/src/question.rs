// question.rs
use crate::{Draft, DraftMeta, DomainError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Tipo de pregunta del banco de preguntas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
  #[default]
  MultipleChoice,
  TrueFalse,
  OpenAnswer,
}

impl fmt::Display for QuestionKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      QuestionKind::MultipleChoice => "multiple_choice",
      QuestionKind::TrueFalse => "true_false",
      QuestionKind::OpenAnswer => "open_answer",
    };
    write!(f, "{}", s)
  }
}

impl FromStr for QuestionKind {
  type Err = DomainError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "multiple_choice" | "multiple" => Ok(QuestionKind::MultipleChoice),
      "true_false" | "vf" => Ok(QuestionKind::TrueFalse),
      "open_answer" | "abierta" => Ok(QuestionKind::OpenAnswer),
      other => Err(DomainError::ValidationError(format!("tipo de pregunta desconocido: {}", other))),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  Easy,
  #[default]
  Medium,
  Hard,
}

impl FromStr for Difficulty {
  type Err = DomainError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "easy" | "facil" | "fácil" => Ok(Difficulty::Easy),
      "medium" | "media" => Ok(Difficulty::Medium),
      "hard" | "dificil" | "difícil" => Ok(Difficulty::Hard),
      other => Err(DomainError::ValidationError(format!("dificultad desconocida: {}", other))),
    }
  }
}

/// Opción de una pregunta de selección múltiple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
  pub id: Uuid,
  pub text: String,
  pub correct: bool,
}

/// Borrador de una pregunta del quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
  #[serde(flatten)]
  pub meta: DraftMeta,
  pub statement: String,
  pub kind: QuestionKind,
  #[serde(default)]
  pub choices: Vec<Choice>,
  /// Respuesta de las preguntas verdadero/falso.
  pub true_false_answer: Option<bool>,
  /// Respuesta de referencia de las preguntas abiertas.
  #[serde(default)]
  pub reference_answer: String,
  #[serde(default)]
  pub explanation: String,
  pub category: Option<String>,
  #[serde(default)]
  pub difficulty: Difficulty,
}

impl QuestionDraft {
  pub fn add_choice(&mut self, text: impl Into<String>, correct: bool) -> Uuid {
    let id = Uuid::new_v4();
    self.choices.push(Choice { id, text: text.into(), correct });
    id
  }

  pub fn remove_choice(&mut self, id: &Uuid) -> Result<Choice, DomainError> {
    let pos = self.choices
                  .iter()
                  .position(|c| &c.id == id)
                  .ok_or_else(|| DomainError::NotFound(format!("opción {}", id)))?;
    Ok(self.choices.remove(pos))
  }

  /// Invierte la marca de correcta de una opción y devuelve el nuevo valor.
  pub fn toggle_correct(&mut self, id: &Uuid) -> Result<bool, DomainError> {
    let choice = self.choices
                     .iter_mut()
                     .find(|c| &c.id == id)
                     .ok_or_else(|| DomainError::NotFound(format!("opción {}", id)))?;
    choice.correct = !choice.correct;
    Ok(choice.correct)
  }

  pub fn correct_count(&self) -> usize {
    self.choices.iter().filter(|c| c.correct).count()
  }
}

impl Draft for QuestionDraft {
  const KIND: &'static str = "question";

  fn fresh(now: DateTime<Utc>) -> Self {
    QuestionDraft { meta: DraftMeta::new(now),
                    statement: String::new(),
                    kind: QuestionKind::MultipleChoice,
                    choices: Vec::new(),
                    true_false_answer: None,
                    reference_answer: String::new(),
                    explanation: String::new(),
                    category: None,
                    difficulty: Difficulty::Medium }
  }

  fn meta(&self) -> &DraftMeta {
    &self.meta
  }

  fn meta_mut(&mut self) -> &mut DraftMeta {
    &mut self.meta
  }
}

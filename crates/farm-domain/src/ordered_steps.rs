// ordered_steps.rs
use crate::DomainError;
use draft_store::{clamp_index, reorder_in_place};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Paso de una buena práctica.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedStep {
  pub id: Uuid,
  pub text: String,
  /// Posición densa `0..n-1`; la mantiene `StepList`.
  pub order: usize,
}

/// Lista de pasos cuyo `order` siempre coincide con la posición.
///
/// Toda inserción, borrado o reordenación recalcula el `order` de todos los
/// elementos. Al deserializar también se reindexa, así un registro con
/// órdenes rotos vuelve a ser válido.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<OrderedStep>", into = "Vec<OrderedStep>")]
pub struct StepList {
  steps: Vec<OrderedStep>,
}

impl From<Vec<OrderedStep>> for StepList {
  fn from(steps: Vec<OrderedStep>) -> Self {
    let mut list = StepList { steps };
    list.reindex();
    list
  }
}

impl From<StepList> for Vec<OrderedStep> {
  fn from(list: StepList) -> Self {
    list.steps
  }
}

impl StepList {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &OrderedStep> {
    self.steps.iter()
  }

  pub fn as_slice(&self) -> &[OrderedStep] {
    &self.steps
  }

  pub fn get(&self, index: usize) -> Option<&OrderedStep> {
    self.steps.get(index)
  }

  pub fn position(&self, id: &Uuid) -> Option<usize> {
    self.steps.iter().position(|s| &s.id == id)
  }

  /// Añade un paso al final y devuelve su id.
  pub fn push(&mut self, text: impl Into<String>) -> Uuid {
    let index = self.steps.len();
    self.insert(index, text)
  }

  /// Inserta un paso en `index` (acotado a `0..=len`).
  pub fn insert(&mut self, index: usize, text: impl Into<String>) -> Uuid {
    let id = Uuid::new_v4();
    let index = index.min(self.steps.len());
    self.steps.insert(index, OrderedStep { id, text: text.into(), order: index });
    self.reindex();
    id
  }

  pub fn remove(&mut self, id: &Uuid) -> Option<OrderedStep> {
    let index = self.position(id)?;
    let removed = self.steps.remove(index);
    self.reindex();
    Some(removed)
  }

  pub fn set_text(&mut self, id: &Uuid, text: impl Into<String>) -> Result<(), DomainError> {
    let step = self.steps
                   .iter_mut()
                   .find(|s| &s.id == id)
                   .ok_or_else(|| DomainError::NotFound(format!("paso {}", id)))?;
    step.text = text.into();
    Ok(())
  }

  /// Mueve el paso de `from` a `to`, acotando `to` a la lista.
  /// Devuelve `false` si no hubo cambio.
  pub fn move_to(&mut self, from: usize, to: usize) -> bool {
    if from >= self.steps.len() {
      return false;
    }
    let to = clamp_index(self.steps.len(), isize::try_from(to).unwrap_or(isize::MAX));
    if from == to {
      return false;
    }
    reorder_in_place(&mut self.steps, from, to);
    self.reindex();
    true
  }

  pub fn move_up(&mut self, index: usize) -> bool {
    match index.checked_sub(1) {
      Some(to) => self.move_to(index, to),
      None => false,
    }
  }

  pub fn move_down(&mut self, index: usize) -> bool {
    self.move_to(index, index + 1)
  }

  /// `true` si `order` es exactamente `0..n-1`.
  pub fn is_dense(&self) -> bool {
    self.steps.iter().enumerate().all(|(i, s)| s.order == i)
  }

  fn reindex(&mut self) {
    for (i, step) in self.steps.iter_mut().enumerate() {
      step.order = i;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn texts(list: &StepList) -> Vec<&str> {
    list.iter().map(|s| s.text.as_str()).collect()
  }

  #[test]
  fn insert_remove_and_moves_keep_dense_order() {
    let mut list = StepList::new();
    let a = list.push("preparar suelo");
    list.push("sembrar");
    list.insert(0, "elegir semilla");
    assert_eq!(texts(&list), vec!["elegir semilla", "preparar suelo", "sembrar"]);
    assert!(list.is_dense());

    assert!(list.move_down(0));
    assert_eq!(texts(&list), vec!["preparar suelo", "elegir semilla", "sembrar"]);
    assert!(!list.move_up(0));
    assert!(!list.move_down(2));
    assert!(list.move_to(0, 99));
    assert_eq!(texts(&list), vec!["elegir semilla", "sembrar", "preparar suelo"]);
    assert!(!list.move_to(7, 0));
    assert!(list.is_dense());

    list.remove(&a).expect("existe");
    assert_eq!(list.len(), 2);
    assert!(list.is_dense());
    assert!(list.remove(&a).is_none());
  }

  #[test]
  fn deserialization_reindexes() {
    let raw = r#"[{"id":"6f1f0c58-8f0a-4bd2-9a43-5a0f6a4b1d01","text":"a","order":4},
                  {"id":"6f1f0c58-8f0a-4bd2-9a43-5a0f6a4b1d02","text":"b","order":4}]"#;
    let list: StepList = serde_json::from_str(raw).unwrap();
    assert!(list.is_dense());
    assert_eq!(list.get(1).unwrap().order, 1);
  }

  #[test]
  fn set_text_unknown_id_is_not_found() {
    let mut list = StepList::new();
    let err = list.set_text(&Uuid::new_v4(), "x").unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
  }
}

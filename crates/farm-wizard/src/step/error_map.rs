use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Mapa campo → mensaje de validación.
///
/// Conserva el orden en que se validaron los campos: el primero es el que
/// recibe el foco al bloquear la navegación. Si un campo falla varias reglas
/// se queda con el primer mensaje.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMap(IndexMap<String, String>);

impl ErrorMap {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registra `message` para `field` salvo que ya tenga uno.
  pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
    self.0.entry(field.into()).or_insert_with(|| message.into());
  }

  /// Quita el error de `field` conservando el orden del resto.
  pub fn remove(&mut self, field: &str) -> Option<String> {
    self.0.shift_remove(field)
  }

  pub fn get(&self, field: &str) -> Option<&str> {
    self.0.get(field).map(String::as_str)
  }

  pub fn contains(&self, field: &str) -> bool {
    self.0.contains_key(field)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn clear(&mut self) {
    self.0.clear();
  }

  /// Primer campo inválido.
  pub fn first_field(&self) -> Option<&str> {
    self.0.keys().next().map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ErrorMap {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut map = ErrorMap::new();
    for (k, v) in iter {
      map.insert(k, v);
    }
    map
  }
}

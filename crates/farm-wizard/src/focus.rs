// Trampa de foco: Tab / Shift+Tab recorren los elementos enfocables del paso
// actual y, en los extremos, saltan al extremo opuesto. El foco nunca sale
// del asistente abierto.

/// Elementos enfocables del paso actual y el que tiene el foco.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusTrap {
  elements: Vec<String>,
  index: Option<usize>,
}

impl FocusTrap {
  /// Crea la trampa con el foco en el primer elemento.
  pub fn new<I, S>(elements: I) -> Self
    where I: IntoIterator<Item = S>,
          S: Into<String>
  {
    let elements: Vec<String> = elements.into_iter().map(Into::into).collect();
    let index = if elements.is_empty() { None } else { Some(0) };
    Self { elements, index }
  }

  pub fn elements(&self) -> &[String] {
    &self.elements
  }

  pub fn focused(&self) -> Option<&str> {
    self.index.and_then(|i| self.elements.get(i)).map(String::as_str)
  }

  /// Tab: siguiente elemento; desde el último vuelve al primero.
  pub fn next(&mut self) -> Option<&str> {
    if self.elements.is_empty() {
      return None;
    }
    let next = match self.index {
      Some(i) if i + 1 < self.elements.len() => i + 1,
      _ => 0,
    };
    self.index = Some(next);
    self.focused()
  }

  /// Shift+Tab: elemento anterior; desde el primero salta al último.
  pub fn prev(&mut self) -> Option<&str> {
    if self.elements.is_empty() {
      return None;
    }
    let prev = match self.index {
      Some(i) if i > 0 => i - 1,
      _ => self.elements.len() - 1,
    };
    self.index = Some(prev);
    self.focused()
  }

  /// Mueve el foco a `id` si pertenece a la trampa.
  pub fn focus(&mut self, id: &str) -> bool {
    match self.elements.iter().position(|e| e == id) {
      Some(i) => {
        self.index = Some(i);
        true
      }
      None => false,
    }
  }

  /// Vacía la trampa (asistente cerrado).
  pub fn release(&mut self) {
    self.elements.clear();
    self.index = None;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tab_wraps_at_both_ends() {
    let mut trap = FocusTrap::new(["title", "content", "next", "cancel"]);
    assert_eq!(trap.focused(), Some("title"));
    assert_eq!(trap.prev(), Some("cancel"));
    assert_eq!(trap.next(), Some("title"));
    trap.focus("cancel");
    assert_eq!(trap.next(), Some("title"));
    assert!(!trap.focus("fuera"));
    assert_eq!(trap.focused(), Some("title"));
  }

  #[test]
  fn empty_trap_has_no_focus() {
    let mut trap = FocusTrap::new(Vec::<String>::new());
    assert_eq!(trap.next(), None);
    assert_eq!(trap.prev(), None);
  }
}

use std::str::FromStr;

/// Teclas que el asistente interpreta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
  Escape,
  Tab,
  BackTab,
  Enter,
  Char(char),
}

impl FromStr for Key {
  type Err = ();

  /// Nombres usados por la CLI: `esc`, `tab`, `shift-tab`, `enter` o un
  /// único carácter.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "esc" | "escape" => Ok(Key::Escape),
      "tab" => Ok(Key::Tab),
      "shift-tab" | "backtab" => Ok(Key::BackTab),
      "enter" => Ok(Key::Enter),
      other => {
        let mut chars = other.chars();
        match (chars.next(), chars.next()) {
          (Some(c), None) => Ok(Key::Char(c)),
          _ => Err(()),
        }
      }
    }
  }
}

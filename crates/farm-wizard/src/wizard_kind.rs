use farm_domain::{Draft, PostDraft, PracticeDraft, QuestionDraft};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Tipos de asistente que soporta el crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardKind {
  Post,
  Practice,
  Question,
}

impl WizardKind {
  pub const ALL: [WizardKind; 3] = [WizardKind::Post, WizardKind::Practice, WizardKind::Question];

  pub fn as_str(&self) -> &'static str {
    match self {
      WizardKind::Post => PostDraft::KIND,
      WizardKind::Practice => PracticeDraft::KIND,
      WizardKind::Question => QuestionDraft::KIND,
    }
  }
}

impl fmt::Display for WizardKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for WizardKind {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    WizardKind::ALL.into_iter().find(|k| k.as_str() == s.trim().to_lowercase()).ok_or(())
  }
}

/// Clave local de un borrador: `<kind>_draft_<id>`.
pub fn draft_key(kind: &str, id: &Uuid) -> String {
  format!("{}_draft_{}", kind, id)
}

/// Inversa de [`draft_key`] para los tipos conocidos.
pub fn parse_draft_key(key: &str) -> Option<(WizardKind, Uuid)> {
  let (kind, id) = key.split_once("_draft_")?;
  Some((kind.parse().ok()?, Uuid::parse_str(id).ok()?))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn keys_roundtrip_for_known_kinds() {
    let id = Uuid::new_v4();
    for kind in WizardKind::ALL {
      let key = draft_key(kind.as_str(), &id);
      assert_eq!(parse_draft_key(&key), Some((kind, id)));
    }
    assert_eq!(parse_draft_key("otro_draft_x"), None);
    assert_eq!(parse_draft_key("preferencias"), None);
  }
}

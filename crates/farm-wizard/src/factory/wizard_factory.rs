use crate::config::WizardConfig;
use crate::engine::{MultiStepForm, SaveCallback};
use crate::errors::WizardError;
use crate::flows::{post_wizard, practice_wizard, question_wizard};
use crate::step::WizardStep;
use crate::wizard_kind::{draft_key, parse_draft_key, WizardKind};
use draft_store::{Clock, KvStorage, PersistentDraftStore};
use farm_domain::{apply_json_patch, Draft, PostDraft, PracticeDraft, QuestionDraft};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use uuid::Uuid;

/// Fábrica para abrir, listar y descartar asistentes sobre un mismo
/// almacenamiento.
///
/// Cada asistente abierto recibe su propio `PersistentDraftStore` con la
/// clave `<kind>_draft_<id>`; abrir con un `draft_id` existente reanuda el
/// borrador guardado localmente.
pub struct WizardFactory {
  storage: Arc<dyn KvStorage>,
  clock: Arc<dyn Clock>,
  config: WizardConfig,
}

impl WizardFactory {
  pub fn new(storage: Arc<dyn KvStorage>, clock: Arc<dyn Clock>, config: WizardConfig) -> Self {
    Self { storage, clock, config }
  }

  pub fn config(&self) -> &WizardConfig {
    &self.config
  }

  /// Constructor genérico.
  ///
  /// - `draft_id`: id a reanudar; `None` crea uno nuevo.
  /// - `initial`: objeto JSON parcial mezclado sobre el borrador vacío. Si
  ///   existe un registro local compatible, el registro gana.
  pub fn open<D: Draft>(&self,
                        steps: Vec<Box<dyn WizardStep<D>>>,
                        draft_id: Option<Uuid>,
                        initial: Option<JsonValue>,
                        on_save: SaveCallback<D>)
                        -> Result<MultiStepForm<D>, WizardError> {
    let id = draft_id.unwrap_or_else(Uuid::new_v4);
    // el parcial se valida aquí; dentro de `initial` ya no puede fallar
    if let Some(patch) = &initial {
      apply_json_patch(&D::fresh(self.clock.now()), patch)?;
    }
    let clock = self.clock.clone();
    let make_initial = move || {
      let mut base = D::fresh(clock.now());
      base.meta_mut().id = id;
      match &initial {
        Some(patch) => apply_json_patch(&base, patch).unwrap_or(base),
        None => base,
      }
    };
    let key = draft_key(D::KIND, &id);
    let store = PersistentDraftStore::open(self.config.store_config(key),
                                           self.storage.clone(),
                                           self.clock.clone(),
                                           make_initial);
    MultiStepForm::new(steps, store, self.clock.clone(), self.config.save_delay_ms, on_save)
  }

  pub fn open_post(&self,
                   draft_id: Option<Uuid>,
                   initial: Option<JsonValue>,
                   on_save: SaveCallback<PostDraft>)
                   -> Result<post_wizard::PostWizard, WizardError> {
    self.open(post_wizard::steps(), draft_id, initial, on_save)
  }

  pub fn open_practice(&self,
                       draft_id: Option<Uuid>,
                       initial: Option<JsonValue>,
                       on_save: SaveCallback<PracticeDraft>)
                       -> Result<practice_wizard::PracticeWizard, WizardError> {
    self.open(practice_wizard::steps(), draft_id, initial, on_save)
  }

  pub fn open_question(&self,
                       draft_id: Option<Uuid>,
                       initial: Option<JsonValue>,
                       on_save: SaveCallback<QuestionDraft>)
                       -> Result<question_wizard::QuestionWizard, WizardError> {
    self.open(question_wizard::steps(), draft_id, initial, on_save)
  }

  /// Borradores persistidos de tipos conocidos. Las demás claves del
  /// almacenamiento se ignoran.
  pub fn list_drafts(&self) -> Result<Vec<(WizardKind, Uuid)>, WizardError> {
    let keys = self.storage.keys()?;
    Ok(keys.iter().filter_map(|k| parse_draft_key(k)).collect())
  }

  /// Borra el registro local de un borrador. Idempotente.
  pub fn discard(&self, kind: WizardKind, id: &Uuid) -> Result<(), WizardError> {
    let key = draft_key(kind.as_str(), id);
    self.storage.delete(&key)?;
    log::info!("borrador '{}' descartado", key);
    Ok(())
  }
}

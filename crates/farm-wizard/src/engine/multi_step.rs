// multi_step.rs
//
// Formulario multipaso genérico. Es el único esqueleto de control de flujo
// de los asistentes: las instancias concretas (publicación, buena práctica,
// pregunta) sólo aportan la lista de pasos y el tipo de borrador.
use crate::errors::WizardError;
use crate::failure::{FailureMessage, SaveFailure};
use crate::focus::FocusTrap;
use crate::keys::Key;
use crate::step::{ErrorMap, WizardStep};
use chrono::{DateTime, Duration, Utc};
use draft_store::{Clock, PersistentDraftStore};
use farm_domain::{apply_json_patch, Draft, DraftStatus};
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Callback que recibe el borrador terminado.
pub type SaveCallback<D> = Box<dyn FnMut(D) -> Result<(), SaveFailure> + Send>;

/// Controles de navegación que forman parte de la trampa de foco.
pub const CONTROL_BACK: &str = "back";
pub const CONTROL_NEXT: &str = "next";
pub const CONTROL_SAVE: &str = "save";
pub const CONTROL_CANCEL: &str = "cancel";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
  Saved,
  Cancelled,
}

/// Fase del asistente.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
  Editing,
  /// Guardado pendiente; el control de guardar está deshabilitado.
  Saving { ready_at: DateTime<Utc> },
  Closed(CloseReason),
}

/// Resultado de "siguiente" / "atrás".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
  Moved { to: usize },
  /// La validación del paso actual falló; ver `errors()`.
  Blocked,
  /// Ya estaba en el extremo.
  Stayed,
}

/// Resultado de "guardar" (o de `poll` al completar un guardado).
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome<D> {
  Pending { ready_at: DateTime<Utc> },
  /// Borrador emitido; el asistente queda cerrado.
  Saved(D),
  /// Algún paso no valida; el asistente vuelve a ese paso.
  Blocked { step: usize },
  /// El callback falló; el borrador sigue en edición.
  Failed(FailureMessage),
}

/// Resultado de una tecla.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
  Cancelled,
  FocusMoved(String),
  Ignored,
}

/// Asistente multipaso respaldado por un `PersistentDraftStore`.
///
/// - "Siguiente" sólo avanza si la validación del paso está vacía.
/// - "Atrás" siempre funciona y limpia los errores mostrados.
/// - "Guardar" sólo desde el último paso; tras la latencia configurada marca
///   el borrador como `saved`, llama a `on_save`, borra el registro local y
///   cierra.
/// - Escape cancela: borra el registro local sin emitir nada.
pub struct MultiStepForm<D: Draft> {
  steps: Vec<Box<dyn WizardStep<D>>>,
  current: usize,
  errors: ErrorMap,
  store: PersistentDraftStore<D>,
  clock: Arc<dyn Clock>,
  focus: FocusTrap,
  phase: WizardPhase,
  save_delay_ms: u64,
  on_save: SaveCallback<D>,
  last_failure: Option<FailureMessage>,
}

impl<D: Draft> MultiStepForm<D> {
  /// Construye el asistente en el paso 0. Falla si no hay pasos.
  pub fn new(steps: Vec<Box<dyn WizardStep<D>>>,
             store: PersistentDraftStore<D>,
             clock: Arc<dyn Clock>,
             save_delay_ms: u64,
             on_save: SaveCallback<D>)
             -> Result<Self, WizardError> {
    if steps.is_empty() {
      return Err(WizardError::Validation("un asistente necesita al menos un paso".to_string()));
    }
    let mut form = MultiStepForm { steps,
                                   current: 0,
                                   errors: ErrorMap::new(),
                                   store,
                                   clock,
                                   focus: FocusTrap::default(),
                                   phase: WizardPhase::Editing,
                                   save_delay_ms,
                                   on_save,
                                   last_failure: None };
    form.rebuild_focus();
    log::debug!("asistente '{}' abierto ({} pasos)", form.store.key(), form.steps.len());
    Ok(form)
  }

  pub fn draft(&self) -> &D {
    self.store.state()
  }

  pub fn store_key(&self) -> &str {
    self.store.key()
  }

  pub fn current_step(&self) -> usize {
    self.current
  }

  pub fn step_count(&self) -> usize {
    self.steps.len()
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name()).collect()
  }

  pub fn current_title(&self) -> &str {
    self.steps[self.current].title()
  }

  pub fn current_fields(&self) -> &[&'static str] {
    self.steps[self.current].fields()
  }

  pub fn is_last_step(&self) -> bool {
    self.current + 1 == self.steps.len()
  }

  /// Errores mostrados actualmente.
  pub fn errors(&self) -> &ErrorMap {
    &self.errors
  }

  pub fn phase(&self) -> WizardPhase {
    self.phase
  }

  pub fn is_open(&self) -> bool {
    !matches!(self.phase, WizardPhase::Closed(_))
  }

  pub fn is_saving(&self) -> bool {
    matches!(self.phase, WizardPhase::Saving { .. })
  }

  /// `true` si el control de guardar está habilitado.
  pub fn can_save(&self) -> bool {
    self.phase == WizardPhase::Editing && self.is_last_step()
  }

  pub fn focus(&self) -> &FocusTrap {
    &self.focus
  }

  /// Mensaje del último guardado fallido.
  pub fn last_failure(&self) -> Option<&FailureMessage> {
    self.last_failure.as_ref()
  }

  /// Edita un campo: aplica `f`, refresca `updatedAt`, borra el error de
  /// `field` y programa la escritura local.
  pub fn edit<F>(&mut self, field: &str, f: F) -> Result<(), WizardError>
    where F: FnOnce(&mut D)
  {
    self.update(f)?;
    self.errors.remove(field);
    Ok(())
  }

  /// Como `edit` pero sin tocar los errores mostrados.
  pub fn update<F>(&mut self, f: F) -> Result<(), WizardError>
    where F: FnOnce(&mut D)
  {
    self.ensure_editing()?;
    let now = self.clock.now();
    self.store.update(|draft| {
                f(draft);
                draft.touch(now);
              });
    Ok(())
  }

  /// Mezcla un objeto JSON parcial sobre el borrador y borra los errores de
  /// los campos incluidos.
  pub fn merge_patch(&mut self, patch: &JsonValue) -> Result<(), WizardError> {
    self.ensure_editing()?;
    let mut next = apply_json_patch(self.store.state(), patch)?;
    next.touch(self.clock.now());
    self.store.set_state(next);
    if let Some(obj) = patch.as_object() {
      for field in obj.keys() {
        self.errors.remove(field);
      }
    }
    Ok(())
  }

  /// Validación del paso actual, sin mostrarla.
  pub fn validate_current(&self) -> ErrorMap {
    self.steps[self.current].validate(self.store.state())
  }

  /// "Siguiente".
  pub fn next(&mut self) -> Result<NavOutcome, WizardError> {
    self.ensure_editing()?;
    let errors = self.validate_current();
    if !errors.is_empty() {
      self.show_errors(errors);
      return Ok(NavOutcome::Blocked);
    }
    self.errors.clear();
    if self.is_last_step() {
      return Ok(NavOutcome::Stayed);
    }
    self.current += 1;
    self.rebuild_focus();
    Ok(NavOutcome::Moved { to: self.current })
  }

  /// "Atrás". Siempre limpia los errores mostrados.
  pub fn back(&mut self) -> Result<NavOutcome, WizardError> {
    self.ensure_editing()?;
    self.errors.clear();
    if self.current == 0 {
      return Ok(NavOutcome::Stayed);
    }
    self.current -= 1;
    self.rebuild_focus();
    Ok(NavOutcome::Moved { to: self.current })
  }

  /// "Guardar". Sólo desde el último paso y con todos los pasos válidos.
  pub fn save(&mut self) -> Result<SaveOutcome<D>, WizardError> {
    match self.phase {
      WizardPhase::Closed(_) => return Err(WizardError::Closed),
      WizardPhase::Saving { .. } => return Err(WizardError::SaveInProgress),
      WizardPhase::Editing => {}
    }
    if !self.is_last_step() {
      return Err(WizardError::NotAtFinalStep { current: self.current, last: self.steps.len() - 1 });
    }
    // un borrador recuperado del almacenamiento puede no cumplir pasos previos
    let invalid = self.steps
                      .iter()
                      .enumerate()
                      .map(|(i, step)| (i, step.validate(self.store.state())))
                      .find(|(_, errors)| !errors.is_empty());
    if let Some((step, errors)) = invalid {
      if step != self.current {
        self.current = step;
        self.rebuild_focus();
      }
      self.show_errors(errors);
      return Ok(SaveOutcome::Blocked { step });
    }
    self.errors.clear();
    self.last_failure = None;
    if self.save_delay_ms == 0 {
      return Ok(self.complete_save());
    }
    let delay = Duration::milliseconds(i64::try_from(self.save_delay_ms).unwrap_or(i64::MAX / 1_000_000));
    let now = self.clock.now();
    let ready_at = now.checked_add_signed(delay).unwrap_or(now);
    self.phase = WizardPhase::Saving { ready_at };
    Ok(SaveOutcome::Pending { ready_at })
  }

  /// Avanza los temporizadores: escritura local diferida y guardado
  /// pendiente. Devuelve el resultado del guardado si se completó ahora.
  pub fn poll(&mut self) -> Option<SaveOutcome<D>> {
    match self.phase {
      WizardPhase::Closed(_) => None,
      WizardPhase::Editing => {
        self.store.poll();
        None
      }
      WizardPhase::Saving { ready_at } => {
        self.store.poll();
        if self.clock.now() >= ready_at {
          Some(self.complete_save())
        } else {
          None
        }
      }
    }
  }

  /// Cancela y cierra: borra el registro local sin emitir. Idempotente.
  pub fn cancel(&mut self) {
    if !self.is_open() {
      return;
    }
    self.store.clear();
    self.close(CloseReason::Cancelled);
    log::info!("asistente '{}' cancelado", self.store.key());
  }

  /// Contrato de teclado: Escape cancela, Tab / Shift+Tab giran el foco.
  pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
    if !self.is_open() {
      return KeyOutcome::Ignored;
    }
    match key {
      Key::Escape => {
        self.cancel();
        KeyOutcome::Cancelled
      }
      Key::Tab => self.focus.next().map(|f| KeyOutcome::FocusMoved(f.to_string())).unwrap_or(KeyOutcome::Ignored),
      Key::BackTab => self.focus.prev().map(|f| KeyOutcome::FocusMoved(f.to_string())).unwrap_or(KeyOutcome::Ignored),
      Key::Enter | Key::Char(_) => KeyOutcome::Ignored,
    }
  }

  /// Escribe ya la escritura local pendiente (cierre de la aplicación).
  pub fn flush(&mut self) -> bool {
    self.is_open() && self.store.flush()
  }

  fn complete_save(&mut self) -> SaveOutcome<D> {
    let mut draft = self.store.state().clone();
    draft.meta_mut().status = DraftStatus::Saved;
    draft.touch(self.clock.now());
    match (self.on_save)(draft.clone()) {
      Ok(()) => {
        self.store.clear();
        self.close(CloseReason::Saved);
        log::info!("borrador {} guardado", draft.id());
        SaveOutcome::Saved(draft)
      }
      Err(failure) => {
        let message = FailureMessage::from(&failure);
        log::warn!("no se pudo guardar el borrador {}: {:?}", draft.id(), failure);
        self.phase = WizardPhase::Editing;
        self.last_failure = Some(message.clone());
        SaveOutcome::Failed(message)
      }
    }
  }

  fn close(&mut self, reason: CloseReason) {
    self.phase = WizardPhase::Closed(reason);
    self.errors.clear();
    self.focus.release();
  }

  fn ensure_editing(&self) -> Result<(), WizardError> {
    match self.phase {
      WizardPhase::Editing => Ok(()),
      WizardPhase::Saving { .. } => Err(WizardError::SaveInProgress),
      WizardPhase::Closed(_) => Err(WizardError::Closed),
    }
  }

  fn show_errors(&mut self, errors: ErrorMap) {
    if let Some(field) = errors.first_field() {
      self.focus.focus(field);
    }
    self.errors = errors;
  }

  fn rebuild_focus(&mut self) {
    let mut elements: Vec<&str> = self.steps[self.current].fields().to_vec();
    if self.current > 0 {
      elements.push(CONTROL_BACK);
    }
    elements.push(if self.is_last_step() { CONTROL_SAVE } else { CONTROL_NEXT });
    elements.push(CONTROL_CANCEL);
    self.focus = FocusTrap::new(elements);
  }
}

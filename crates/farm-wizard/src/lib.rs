//! farm-wizard: asistentes de autoría por pasos
//!
//! Define un único formulario multipaso genérico (`MultiStepForm`) que
//! acumula un borrador respaldado por `draft_store::PersistentDraftStore`, y
//! lo instancia tres veces: publicaciones, buenas prácticas y preguntas del
//! quiz. Cada instancia sólo aporta sus pasos y reglas de validación.

pub mod config;
pub mod engine;
pub mod errors;
pub mod factory;
pub mod failure;
pub mod flows;
pub mod focus;
pub mod keys;
pub mod step;
pub mod wizard_kind;

pub use config::WizardConfig;
pub use engine::{CloseReason, KeyOutcome, MultiStepForm, NavOutcome, SaveCallback, SaveOutcome, WizardPhase};
pub use errors::WizardError;
pub use factory::WizardFactory;
pub use failure::{ApiErrorBody, FailureMessage, SaveFailure};
pub use focus::FocusTrap;
pub use keys::Key;
pub use step::{ErrorMap, FnStep, WizardStep};
pub use wizard_kind::{draft_key, parse_draft_key, WizardKind};

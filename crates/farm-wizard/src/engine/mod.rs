pub mod multi_step;

pub use multi_step::{CloseReason, KeyOutcome, MultiStepForm, NavOutcome, SaveCallback, SaveOutcome, WizardPhase,
                     CONTROL_BACK, CONTROL_CANCEL, CONTROL_NEXT, CONTROL_SAVE};

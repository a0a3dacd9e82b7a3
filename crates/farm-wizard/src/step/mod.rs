pub mod error_map;
pub mod trait_step;

pub use error_map::ErrorMap;
pub use trait_step::{FnStep, WizardStep};

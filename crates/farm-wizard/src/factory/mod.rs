pub mod wizard_factory;

pub use wizard_factory::WizardFactory;

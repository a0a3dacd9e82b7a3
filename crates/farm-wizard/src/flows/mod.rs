pub mod post_wizard;
pub mod practice_wizard;
pub mod question_wizard;
pub mod rules;

pub use post_wizard::PostWizard;
pub use practice_wizard::PracticeWizard;
pub use question_wizard::QuestionWizard;

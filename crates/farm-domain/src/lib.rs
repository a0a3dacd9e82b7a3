mod draft;
mod errors;
mod media;
mod ordered_steps;
mod post;
mod practice;
mod question;

pub use draft::{apply_json_patch, Draft, DraftMeta, DraftStatus};
pub use errors::DomainError;
pub use media::MediaSelection;
pub use ordered_steps::{OrderedStep, StepList};
pub use post::PostDraft;
pub use practice::PracticeDraft;
pub use question::{Choice, Difficulty, QuestionDraft, QuestionKind};

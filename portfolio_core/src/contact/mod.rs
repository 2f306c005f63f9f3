mod machine;
mod submission;
mod validate;

pub use machine::{FormEvent, SubmissionState};
pub use submission::{ContactPayload, ContactSubmission, FormElements, SubmitOutcome};
pub use validate::{is_valid_email, FormField, ValidationReport};

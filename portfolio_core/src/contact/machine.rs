use crate::error::TransitionError;


/// Where a contact form is in its submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Submit,
    ValidationFailed,
    ValidationPassed,
    Delivered,
    DeliveryFailed,
    Settled,
}

impl SubmissionState {
    pub fn on(self, event: FormEvent) -> Result<SubmissionState, TransitionError> {
        use FormEvent::*;
        use SubmissionState::*;

        match (self, event) {
            (Idle, Submit) => Ok(Validating),
            (Validating, ValidationFailed) => Ok(Idle),
            (Validating, ValidationPassed) => Ok(Submitting),
            (Submitting, Delivered) => Ok(Succeeded),
            (Submitting, DeliveryFailed) => Ok(Failed),
            (Succeeded | Failed, Settled) => Ok(Idle),
            (from, event) => Err(TransitionError { from, event }),
        }
    }

    pub fn is_busy(self) -> bool {
        self != SubmissionState::Idle
    }
}

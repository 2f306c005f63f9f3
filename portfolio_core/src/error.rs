use thiserror::Error;

use crate::contact::{FormEvent, SubmissionState};


#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Storage is unavailable: {0}")]
    Unavailable(String),
    #[error("Storage rejected the write: {0}")]
    Rejected(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("Request could not complete: {0}")]
    Transport(String),
    #[error("Relay answered with status {0}")]
    Status(u16),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No transition from {from:?} on {event:?}")]
pub struct TransitionError {
    pub from: SubmissionState,
    pub event: FormEvent,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid site config: {0}")]
    Parse(#[from] serde_json::Error),
}

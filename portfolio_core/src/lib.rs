pub mod config;
pub mod contact;
pub mod effects;
pub mod error;
pub mod theme;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use config::SiteConfig;
pub use contact::{ContactSubmission, FormElements, SubmitOutcome};
pub use error::{ConfigError, RelayError, StoreError, TransitionError};
pub use theme::{ThemeElements, ThemeMode, ThemePreference};
pub use traits::{ElementHandle, MailRelay, ThemeStore};

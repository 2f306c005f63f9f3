use core::future::Future;

use crate::contact::ContactPayload;
use crate::error::{RelayError, StoreError};


/// A handle to one page element.
///
/// Handles are cheap references into a document that the host owns, so every
/// operation takes `&self`. Operations that make no sense for the element
/// (setting a value on a banner, say) are no-ops.
pub trait ElementHandle {
    /// Add `class` when `on` is true, remove it otherwise.
    fn set_class(&self, class: &str, on: bool);

    fn has_class(&self, class: &str) -> bool;

    /// Current value of a form control; empty for anything else.
    fn value(&self) -> String;

    fn set_value(&self, value: &str);

    fn set_disabled(&self, disabled: bool);

    fn set_text(&self, text: &str);

    /// Set an inline style property. An empty value clears it.
    fn set_style(&self, property: &str, value: &str);
}

/// Durable slot holding the theme preference.
pub trait ThemeStore {
    fn get(&self) -> Result<Option<String>, StoreError>;

    fn set(&self, value: &str) -> Result<(), StoreError>;
}

/// Outbound delivery of a contact message.
///
/// Returns the HTTP status the relay answered with. Deciding whether that
/// status counts as delivered is the caller's job.
pub trait MailRelay {
    fn send(&self, payload: &ContactPayload) -> impl Future<Output = Result<u16, RelayError>>;
}

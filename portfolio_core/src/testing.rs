use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::contact::ContactPayload;
use crate::error::{RelayError, StoreError};
use crate::traits::{ElementHandle, MailRelay, ThemeStore};


#[derive(Debug, Default)]
pub struct MockState {
    pub classes: BTreeSet<String>,
    pub value: String,
    pub disabled: bool,
    pub text: String,
    pub styles: BTreeMap<String, String>,
}

/// In-memory element. Clones share state, like handles into one document.
#[derive(Debug, Clone, Default)]
pub struct MockElement(pub Rc<RefCell<MockState>>);

impl MockElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: &str) -> Self {
        let el = Self::new();
        el.set_value(value);
        el
    }

    pub fn with_class(class: &str) -> Self {
        let el = Self::new();
        el.set_class(class, true);
        el
    }

    pub fn is_hidden(&self) -> bool {
        self.has_class("hidden")
    }

    pub fn is_disabled(&self) -> bool {
        self.0.borrow().disabled
    }

    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().styles.get(property).cloned()
    }
}

impl ElementHandle for MockElement {
    fn set_class(&self, class: &str, on: bool) {
        let mut state = self.0.borrow_mut();
        if on {
            state.classes.insert(class.to_string());
        } else {
            state.classes.remove(class);
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.contains(class)
    }

    fn value(&self) -> String {
        self.0.borrow().value.clone()
    }

    fn set_value(&self, value: &str) {
        self.0.borrow_mut().value = value.to_string();
    }

    fn set_disabled(&self, disabled: bool) {
        self.0.borrow_mut().disabled = disabled;
    }

    fn set_text(&self, text: &str) {
        self.0.borrow_mut().text = text.to_string();
    }

    fn set_style(&self, property: &str, value: &str) {
        let mut state = self.0.borrow_mut();
        if value.is_empty() {
            state.styles.remove(property);
        } else {
            state.styles.insert(property.to_string(), value.to_string());
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockStore {
    pub slot: Rc<RefCell<Option<String>>>,
    pub broken: bool,
}

impl MockStore {
    pub fn holding(value: &str) -> Self {
        let store = Self::default();
        *store.slot.borrow_mut() = Some(value.to_string());
        store
    }

    pub fn broken() -> Self {
        Self { broken: true, ..Self::default() }
    }

    pub fn stored(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl ThemeStore for MockStore {
    fn get(&self) -> Result<Option<String>, StoreError> {
        if self.broken {
            return Err(StoreError::Unavailable("disabled by host".to_string()));
        }
        Ok(self.slot.borrow().clone())
    }

    fn set(&self, value: &str) -> Result<(), StoreError> {
        if self.broken {
            return Err(StoreError::Unavailable("disabled by host".to_string()));
        }
        *self.slot.borrow_mut() = Some(value.to_string());
        Ok(())
    }
}

/// What the page looked like at the moment the relay was called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub loader_visible: bool,
    pub submit_disabled: bool,
}

pub struct MockRelay {
    pub response: Result<u16, RelayError>,
    pub sent: RefCell<Vec<ContactPayload>>,
    pub watch: Option<(MockElement, MockElement)>,
    pub snapshots: RefCell<Vec<Snapshot>>,
}

impl MockRelay {
    pub fn answering(response: Result<u16, RelayError>) -> Self {
        Self {
            response,
            sent: RefCell::new(Vec::new()),
            watch: None,
            snapshots: RefCell::new(Vec::new()),
        }
    }

    pub fn watching(mut self, loader: &MockElement, submit: &MockElement) -> Self {
        self.watch = Some((loader.clone(), submit.clone()));
        self
    }

    pub fn calls(&self) -> usize {
        self.sent.borrow().len()
    }
}

impl MailRelay for MockRelay {
    async fn send(&self, payload: &ContactPayload) -> Result<u16, RelayError> {
        if let Some((loader, submit)) = &self.watch {
            self.snapshots.borrow_mut().push(Snapshot {
                loader_visible: !loader.is_hidden(),
                submit_disabled: submit.is_disabled(),
            });
        }
        self.sent.borrow_mut().push(payload.clone());

        // Give other tasks a chance to run while the request is "in flight".
        tokio::task::yield_now().await;

        self.response.clone()
    }
}

use std::cell::{Cell, RefCell};
use std::fmt;

use log::{debug, warn};
use serde::Deserialize;

use crate::config::{ElementIds, SiteConfig};
use crate::error::StoreError;
use crate::traits::{ElementHandle, ThemeStore};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Interpret a persisted value. Nothing stored (or an empty string) means
    /// `default`; anything that is not `"dark"` is light.
    pub fn from_stored(value: Option<&str>, default: ThemeMode) -> Self {
        match value {
            None | Some("") => default,
            Some("dark") => ThemeMode::Dark,
            Some(_) => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeEvent {
    PageLoaded,
    ToggleClicked,
}

/// Keeps the preference for the current page view only. Used when the host
/// offers no durable storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: RefCell<Option<String>>,
}

impl ThemeStore for MemoryStore {
    fn get(&self) -> Result<Option<String>, StoreError> {
        Ok(self.slot.borrow().clone())
    }

    fn set(&self, value: &str) -> Result<(), StoreError> {
        *self.slot.borrow_mut() = Some(value.to_string());
        Ok(())
    }
}

/// The elements the theme touches, looked up once.
pub struct ThemeElements<E> {
    /// Carries the dark class. Always present (the document root).
    pub root: E,
    pub toggle: Option<E>,
    /// Visible while dark mode is on.
    pub dark_icon: Option<E>,
    /// Visible while light mode is on.
    pub light_icon: Option<E>,
}

impl<E: ElementHandle> ThemeElements<E> {
    pub fn resolve(root: E, ids: &ElementIds, lookup: impl Fn(&str) -> Option<E>) -> Self {
        Self {
            root,
            toggle: lookup(&ids.theme_toggle),
            dark_icon: lookup(&ids.dark_icon),
            light_icon: lookup(&ids.light_icon),
        }
    }
}

/// Single source of truth for the light/dark display mode.
pub struct ThemePreference<S, E> {
    store: S,
    elements: ThemeElements<E>,
    dark_class: String,
    hidden_class: String,
    default_mode: ThemeMode,
    current: Cell<ThemeMode>,
}

impl<S, E> ThemePreference<S, E>
where
    S: ThemeStore,
    E: ElementHandle,
{
    pub fn new(store: S, elements: ThemeElements<E>, config: &SiteConfig) -> Self {
        Self {
            store,
            elements,
            dark_class: config.classes.dark.clone(),
            hidden_class: config.classes.hidden.clone(),
            default_mode: config.theme.default_mode,
            current: Cell::new(config.theme.default_mode),
        }
    }

    pub fn handle(&self, event: ThemeEvent) -> ThemeMode {
        debug!("theme event {:?}", event);
        match event {
            ThemeEvent::PageLoaded => self.initialize(),
            ThemeEvent::ToggleClicked => self.toggle(),
        }
    }

    /// Apply whatever was persisted, or the default when nothing was.
    pub fn initialize(&self) -> ThemeMode {
        let stored = match self.store.get() {
            Ok(stored) => stored,
            Err(err) => {
                warn!("Could not read theme preference, using default: {}", err);
                None
            }
        };

        let mode = ThemeMode::from_stored(stored.as_deref(), self.default_mode);
        self.apply(mode);
        mode
    }

    pub fn apply(&self, mode: ThemeMode) {
        let dark = mode == ThemeMode::Dark;

        self.elements.root.set_class(&self.dark_class, dark);

        if let (Some(dark_icon), Some(light_icon)) = (&self.elements.dark_icon, &self.elements.light_icon) {
            dark_icon.set_class(&self.hidden_class, !dark);
            light_icon.set_class(&self.hidden_class, dark);
        }

        self.current.set(mode);

        if let Err(err) = self.store.set(mode.as_str()) {
            warn!("Theme preference not persisted: {}", err);
        }
    }

    /// Flip whatever is on screen right now.
    pub fn toggle(&self) -> ThemeMode {
        let next = self.applied().opposite();
        self.apply(next);
        next
    }

    pub fn current(&self) -> ThemeMode {
        self.current.get()
    }

    pub fn toggle_control(&self) -> Option<&E> {
        self.elements.toggle.as_ref()
    }

    fn applied(&self) -> ThemeMode {
        if self.elements.root.has_class(&self.dark_class) {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }
}

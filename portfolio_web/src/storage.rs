use log::warn;
use wasm_bindgen::JsValue;
use web_sys::{Storage, Window};

use portfolio_core::theme::MemoryStore;
use portfolio_core::{StoreError, ThemeStore};


/// The theme slot in `window.localStorage`, stored as a bare string.
pub struct LocalThemeStore {
    storage: Storage,
    key: String,
}

impl ThemeStore for LocalThemeStore {
    fn get(&self) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(&self.key)
            .map_err(|err| StoreError::Unavailable(format!("{:?}", err)))
    }

    fn set(&self, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(&self.key, value)
            .map_err(|err| StoreError::Rejected(format!("{:?}", err)))
    }
}

/// Local storage when the host allows it, otherwise memory for this visit.
pub enum PreferenceStore {
    Local(LocalThemeStore),
    Session(MemoryStore),
}

impl PreferenceStore {
    pub fn open(window: &Window, key: &str) -> Self {
        Self::from_host(window.local_storage(), key)
    }

    fn from_host(local: Result<Option<Storage>, JsValue>, key: &str) -> Self {
        match local {
            Ok(Some(storage)) => PreferenceStore::Local(LocalThemeStore {
                storage,
                key: key.to_string(),
            }),
            Ok(None) => {
                warn!("localStorage missing, theme kept for this visit only");
                PreferenceStore::Session(MemoryStore::default())
            }
            Err(err) => {
                warn!("localStorage blocked ({:?}), theme kept for this visit only", err);
                PreferenceStore::Session(MemoryStore::default())
            }
        }
    }
}

impl ThemeStore for PreferenceStore {
    fn get(&self) -> Result<Option<String>, StoreError> {
        match self {
            PreferenceStore::Local(store) => store.get(),
            PreferenceStore::Session(store) => store.get(),
        }
    }

    fn set(&self, value: &str) -> Result<(), StoreError> {
        match self {
            PreferenceStore::Local(store) => store.set(value),
            PreferenceStore::Session(store) => store.set(value),
        }
    }
}

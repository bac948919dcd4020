use waraq_core::{KeyValueStore, StoreError};
use web_sys::Storage;

use crate::dom::js_err;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StorageScope {
    Local,
    Session,
}

/// `localStorage` or `sessionStorage`, looked up on every access.
pub(crate) struct BrowserStore {
    scope: StorageScope,
}

impl BrowserStore {
    pub(crate) fn local() -> Self {
        Self {
            scope: StorageScope::Local,
        }
    }

    pub(crate) fn session() -> Self {
        Self {
            scope: StorageScope::Session,
        }
    }

    fn storage(&self) -> Result<Storage, StoreError> {
        let window = web_sys::window().ok_or(StoreError::Unavailable)?;
        let storage = match self.scope {
            StorageScope::Local => window.local_storage(),
            StorageScope::Session => window.session_storage(),
        };
        storage.ok().flatten().ok_or(StoreError::Unavailable)
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?
            .get_item(key)
            .map_err(|err| StoreError::Read(js_err(err)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| StoreError::Write(js_err(err)))
    }
}

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::role::{Role, ROLE_KEY};

pub const NOTICE_SHOWN_KEY: &str = "noticeShown";
pub const NOTICE_SHOWN_VALUE: &str = "1";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
}

/// String key/value storage with the failure modes of browser storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stands in for storage the browser refuses to hand out.
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PersistedRole {
    Set(Role),
    Unset,
    Unreadable,
}

impl PersistedRole {
    pub fn role(self) -> Option<Role> {
        match self {
            PersistedRole::Set(role) => Some(role),
            _ => None,
        }
    }
}

/// Every read and write of persisted page state goes through here.
pub struct AppState {
    durable: Box<dyn KeyValueStore>,
    session: Box<dyn KeyValueStore>,
}

impl AppState {
    pub fn new(durable: Box<dyn KeyValueStore>, session: Box<dyn KeyValueStore>) -> Self {
        Self { durable, session }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()), Box::new(MemoryStore::new()))
    }

    pub fn persisted_role(&self) -> PersistedRole {
        match self.durable.get(ROLE_KEY) {
            Ok(Some(raw)) => Role::parse(&raw)
                .map(PersistedRole::Set)
                .unwrap_or(PersistedRole::Unset),
            Ok(None) => PersistedRole::Unset,
            Err(_) => PersistedRole::Unreadable,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.persisted_role().role()
    }

    pub fn save_role(&self, role: Role) -> Result<(), StoreError> {
        self.durable.set(ROLE_KEY, role.as_str())
    }

    /// An unreadable session store counts as "not shown yet".
    pub fn notice_shown(&self) -> bool {
        matches!(self.session.get(NOTICE_SHOWN_KEY), Ok(Some(_)))
    }

    pub fn mark_notice_shown(&self) -> Result<(), StoreError> {
        self.session.set(NOTICE_SHOWN_KEY, NOTICE_SHOWN_VALUE)
    }
}

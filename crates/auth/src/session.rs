//! Tab-scoped session state.
//!
//! The session is the only piece of client-side auth state: one raw token
//! under one key. It is created on login, read by the route guard on every
//! navigation and by the API client on every request, and removed on logout.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::claims::{RoleClaim, decode_role, decode_subject};

/// Storage key holding the raw bearer token.
pub const TOKEN_KEY: &str = "jwtToken";

/// Key/value storage that lives exactly as long as one client "tab".
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: String);
    fn remove_item(&self, key: &str);
}

/// In-process storage; dropped together with the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        items.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: String) {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_string(), value);
    }

    fn remove_item(&self, key: &str) {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        items.remove(key);
    }
}

/// Handle to the current session, shared by the router and the API client.
///
/// Cloning is cheap; all clones observe the same token. Nothing derived from
/// the token is cached here: the role is recomputed on every call.
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn SessionStorage>,
}

impl Session {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Persist a freshly issued token, replacing any previous one.
    pub fn set(&self, token: impl Into<String>) {
        self.storage.set_item(TOKEN_KEY, token.into());
        tracing::debug!("session token stored");
    }

    pub fn get(&self) -> Option<String> {
        self.storage.get_item(TOKEN_KEY)
    }

    pub fn clear(&self) {
        self.storage.remove_item(TOKEN_KEY);
        tracing::debug!("session token cleared");
    }

    pub fn role_claim(&self) -> RoleClaim {
        decode_role(self.get().as_deref())
    }

    pub fn subject(&self) -> Option<String> {
        decode_subject(self.get().as_deref())
    }
}

impl core::fmt::Debug for Session {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // Never print the token itself.
        f.debug_struct("Session")
            .field("has_token", &self.get().is_some())
            .finish()
    }
}

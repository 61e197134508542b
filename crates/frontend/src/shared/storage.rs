use std::cell::RefCell;
use std::collections::HashMap;

use web_sys::window;

/// Durable keys (localStorage)
pub const TOKEN_KEY: &str = "token";
pub const ROLE_KEY: &str = "role";
pub const BASIC_AUTH_KEY: &str = "basicAuth";
/// Legacy key some builds wrote the whole user into
pub const LEGACY_USER_KEY: &str = "user";

/// Ephemeral key (sessionStorage) holding the catalog scroll offset
pub const SCROLL_POSITION_KEY: &str = "productsPageScrollPosition";

/// String key/value store. Browser storage in the app, an in-memory map in tests.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserStorage {
    Local,
    Session,
}

impl BrowserStorage {
    fn handle(&self) -> Option<web_sys::Storage> {
        let w = window()?;
        match self {
            BrowserStorage::Local => w.local_storage().ok()?,
            BrowserStorage::Session => w.session_storage().ok()?,
        }
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.handle()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = self.handle() {
            if storage.set_item(key, value).is_err() {
                log::warn!("storage: failed to write '{}'", key);
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.handle() {
            let _ = storage.remove_item(key);
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(entries: &[(&str, &str)]) -> Self {
        let storage = Self::new();
        for (k, v) in entries {
            storage.set(k, v);
        }
        storage
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_set_get_remove() {
        let s = MemoryStorage::with(&[(TOKEN_KEY, "abc")]);
        assert_eq!(s.get(TOKEN_KEY).as_deref(), Some("abc"));
        s.set(ROLE_KEY, "ADMIN");
        s.remove(TOKEN_KEY);
        assert_eq!(s.get(TOKEN_KEY), None);
        assert_eq!((&s).get(ROLE_KEY).as_deref(), Some("ADMIN"));
    }
}

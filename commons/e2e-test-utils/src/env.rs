//! Scoped environment overrides for configuration tests.
//!
//! Tests in one binary share the process environment, so every scope holds a
//! process-wide lock for its lifetime. Previous values are restored (or the
//! keys unset again) when the scope drops.

use std::sync::{Mutex, MutexGuard, PoisonError};

static ENV_LOCK: Mutex<()> = Mutex::new(());

struct Saved {
    key: String,
    prev: Option<String>,
}

/// Exclusive, restorable view of the process environment.
pub struct EnvScope {
    saved: Vec<Saved>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvScope {
    /// Take the environment lock. A panic in another scope does not poison it.
    pub fn new() -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        Self {
            saved: Vec::new(),
            _lock: lock,
        }
    }

    /// Set `key` for the lifetime of the scope.
    pub fn set(mut self, key: &str, val: &str) -> Self {
        self.remember(key);
        unsafe { std::env::set_var(key, val) }
        self
    }

    /// Unset `key` for the lifetime of the scope.
    pub fn unset(mut self, key: &str) -> Self {
        self.remember(key);
        unsafe { std::env::remove_var(key) }
        self
    }

    /// Unset every key in `keys`.
    pub fn clear<'a, I>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        for key in keys {
            self = self.unset(key);
        }
        self
    }

    fn remember(&mut self, key: &str) {
        if self.saved.iter().any(|s| s.key == key) {
            return;
        }
        self.saved.push(Saved {
            key: key.to_string(),
            prev: std::env::var(key).ok(),
        });
    }
}

impl Default for EnvScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        for saved in self.saved.drain(..).rev() {
            unsafe {
                match saved.prev {
                    Some(v) => std::env::set_var(&saved.key, v),
                    None => std::env::remove_var(&saved.key),
                }
            }
        }
    }
}

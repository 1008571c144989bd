//! Named singleton resources
//!
//! A resource is one value per string key, visible to every system and scene.
//! Registering a key again replaces the previous value.

use std::any::{type_name, Any};
use std::collections::HashMap;

use super::EcsError;

/// Registry of resources keyed by name
#[derive(Default)]
pub struct Resources {
    values: HashMap<String, Box<dyn Any>>,
}

impl Resources {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value` under `key`, returning whether a value was replaced
    pub fn insert<T: 'static>(&mut self, key: impl Into<String>, value: T) -> bool {
        self.insert_boxed(key.into(), Box::new(value))
    }

    pub(crate) fn insert_boxed(&mut self, key: String, value: Box<dyn Any>) -> bool {
        let replaced = self.values.insert(key.clone(), value).is_some();
        if replaced {
            log::debug!("Resource '{}' replaced", key);
        } else {
            log::debug!("Resource '{}' registered", key);
        }
        replaced
    }

    /// Required access: fails with `ResourceNotFound` or `ResourceTypeMismatch`
    pub fn get<T: 'static>(&self, key: &str) -> Result<&T, EcsError> {
        self.values
            .get(key)
            .ok_or_else(|| not_found(key))?
            .downcast_ref::<T>()
            .ok_or_else(|| mismatch::<T>(key))
    }

    /// Required mutable access
    pub fn get_mut<T: 'static>(&mut self, key: &str) -> Result<&mut T, EcsError> {
        self.values
            .get_mut(key)
            .ok_or_else(|| not_found(key))?
            .downcast_mut::<T>()
            .ok_or_else(|| mismatch::<T>(key))
    }

    /// Optional access; `None` if missing or of another type
    pub fn try_get<T: 'static>(&self, key: &str) -> Option<&T> {
        self.values.get(key)?.downcast_ref::<T>()
    }

    /// Optional mutable access
    pub fn try_get_mut<T: 'static>(&mut self, key: &str) -> Option<&mut T> {
        self.values.get_mut(key)?.downcast_mut::<T>()
    }

    /// Unregister a resource and hand it back
    ///
    /// A value of another type is left in place and reported as a mismatch.
    pub fn remove<T: 'static>(&mut self, key: &str) -> Result<T, EcsError> {
        self.take_boxed::<T>(key).map(|boxed| *boxed)
    }

    pub(crate) fn take_boxed<T: 'static>(&mut self, key: &str) -> Result<Box<T>, EcsError> {
        let value = self.values.remove(key).ok_or_else(|| not_found(key))?;
        match value.downcast::<T>() {
            Ok(typed) => Ok(typed),
            Err(original) => {
                self.values.insert(key.to_string(), original);
                Err(mismatch::<T>(key))
            }
        }
    }

    /// Put back a value lifted out by `take_boxed`, without logging a registration
    pub(crate) fn restore(&mut self, key: String, value: Box<dyn Any>) {
        self.values.insert(key, value);
    }

    /// Whether anything is registered under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of registered resources
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no resource is registered
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Registered keys, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

fn not_found(key: &str) -> EcsError {
    EcsError::ResourceNotFound { key: key.to_string() }
}

fn mismatch<T>(key: &str) -> EcsError {
    EcsError::ResourceTypeMismatch {
        key: key.to_string(),
        expected: type_name::<T>(),
    }
}

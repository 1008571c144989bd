//! Named event queues
//!
//! Producers append typed payloads under a name; consumers drain that name,
//! usually once per frame. Order is preserved within a name and nothing is
//! cleared automatically.

use std::any::{type_name, Any};
use std::collections::HashMap;

/// Event queues keyed by event name
#[derive(Default)]
pub struct EventQueue {
    queues: HashMap<String, Vec<Box<dyn Any>>>,
}

impl EventQueue {
    /// Create an empty event queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `payload` to the queue for `name`
    pub fn emit<T: 'static>(&mut self, name: impl Into<String>, payload: T) {
        self.queues.entry(name.into()).or_default().push(Box::new(payload));
    }

    /// Remove and return every pending `T` payload for `name`, oldest first
    ///
    /// Payloads of another type cannot be handed out and are dropped with a
    /// warning; the queue for `name` is empty afterwards.
    pub fn drain<T: 'static>(&mut self, name: &str) -> Vec<T> {
        let Some(pending) = self.queues.get_mut(name) else {
            return Vec::new();
        };

        let mut drained = Vec::with_capacity(pending.len());
        for payload in pending.drain(..) {
            match payload.downcast::<T>() {
                Ok(event) => drained.push(*event),
                Err(_) => log::warn!(
                    "Dropping event '{}' whose payload is not a {}",
                    name,
                    type_name::<T>()
                ),
            }
        }
        drained
    }

    /// Look at pending `T` payloads for `name` without consuming them
    pub fn peek<T: 'static>(&self, name: &str) -> impl Iterator<Item = &T> {
        self.queues
            .get(name)
            .into_iter()
            .flatten()
            .filter_map(|payload| payload.downcast_ref::<T>())
    }

    /// Number of pending payloads for `name`, of any type
    pub fn len(&self, name: &str) -> usize {
        self.queues.get(name).map_or(0, Vec::len)
    }

    /// Whether no event of any name is pending
    pub fn is_empty(&self) -> bool {
        self.queues.values().all(Vec::is_empty)
    }

    /// Discard pending payloads for `name`
    pub fn clear(&mut self, name: &str) {
        if let Some(pending) = self.queues.get_mut(name) {
            pending.clear();
        }
    }

    /// Discard every pending payload (useful for state transitions)
    pub fn clear_all(&mut self) {
        self.queues.clear();
    }
}

/// Thread-safe handle around a WeightedEventManager
use super::core::WeightedEventManager;
use super::stats::EventManagerStats;
use super::EventManager;
use crate::error::EventError;
use crate::event::Arguments;
use crate::listener::{Callback, Listener, ListenerSelector, Weight};
use crate::loader::EventLoader;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A [`WeightedEventManager`] shared between threads behind a single mutex.
///
/// Every operation, including the lazy load it may cause, runs under the
/// lock. Use [`SharedEventManager::with`] to run a sequence such as
/// check-then-add atomically.
///
/// Listener callbacks run while the lock is held and must not call back into
/// the same `SharedEventManager`.
#[derive(Debug, Clone, Default)]
pub struct SharedEventManager {
    inner: Arc<Mutex<WeightedEventManager>>,
}

impl SharedEventManager {
    /// Wraps a manager
    pub fn new(manager: WeightedEventManager) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, WeightedEventManager> {
        // The registry only changes through completed add/remove calls.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` with exclusive access to the manager
    pub fn with<R>(&self, f: impl FnOnce(&mut WeightedEventManager) -> R) -> R {
        f(&mut self.lock())
    }

    /// See [`EventManager::add_listener`]
    pub fn add_listener(
        &self,
        event: &str,
        callback: Callback,
        weight: Option<Weight>,
    ) -> Result<Listener, EventError> {
        self.lock().add_listener(event, callback, weight)
    }

    /// See [`EventManager::remove_listener`]
    pub fn remove_listener(&self, selector: ListenerSelector) -> Result<bool, EventError> {
        self.lock().remove_listener(selector)
    }

    /// See [`EventManager::has_listeners`]
    pub fn has_listeners(&self, event: &str) -> Result<bool, EventError> {
        self.lock().has_listeners(event)
    }

    /// See [`EventManager::trigger_event`]
    pub fn trigger_event(&self, event: &str, arguments: Option<Arguments>) -> Result<(), EventError> {
        self.lock().trigger_event(event, arguments)
    }

    /// See [`WeightedEventManager::set_loader`]
    pub fn set_loader(&self, loader: Arc<dyn EventLoader>) {
        self.lock().set_loader(loader);
    }

    /// Gets the current statistics
    pub fn stats(&self) -> EventManagerStats {
        self.lock().stats()
    }
}

impl From<WeightedEventManager> for SharedEventManager {
    fn from(manager: WeightedEventManager) -> Self {
        Self::new(manager)
    }
}

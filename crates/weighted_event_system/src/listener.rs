//! Listener definitions: callbacks, weights and removal selectors

use crate::error::EventError;
use crate::event::Event;
use crate::utils::validate_event_name;
use compact_str::CompactString;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Position of a listener in the invocation order of its event (lower fires first)
pub type Weight = u32;

/// Signature of a listener callback
pub type CallbackFn = dyn Fn(&mut Event) -> Result<(), EventError> + Send + Sync;

/// A named, invocable listener callback.
///
/// The name identifies the callback: two callbacks with the same name compare
/// equal, which is what removal by callback matches on. Loaders resolve
/// callbacks from their names as well.
#[derive(Clone)]
pub struct Callback {
    name: CompactString,
    handler: Arc<CallbackFn>,
}

impl Callback {
    /// Creates a new callback
    pub fn new<F>(name: &str, handler: F) -> Self
    where
        F: Fn(&mut Event) -> Result<(), EventError> + Send + Sync + 'static,
    {
        Self {
            name: CompactString::new(name),
            handler: Arc::new(handler),
        }
    }

    /// Name identifying this callback
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Calls the callback with the event
    pub fn call(&self, event: &mut Event) -> Result<(), EventError> {
        (self.handler)(event)
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Callback {}

impl Hash for Callback {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback").field("name", &self.name).finish()
    }
}

impl fmt::Display for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A callback bound to an event at a weight.
///
/// A listener without a weight gets one assigned by the manager on
/// registration; the listener returned from registration always has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listener {
    event: CompactString,
    callback: Callback,
    weight: Option<Weight>,
}

impl Listener {
    /// Creates a new listener.
    ///
    /// Fails with [`EventError::InvalidEvent`] for an empty event name and with
    /// [`EventError::InvalidListener`] for an unnamed callback or a zero weight.
    pub fn new(event: &str, callback: Callback, weight: Option<Weight>) -> Result<Self, EventError> {
        let event = validate_event_name(event, "set the event of the listener")?;

        if callback.name().is_empty() {
            return Err(EventError::InvalidListener(
                "Could not set the callback of the listener: provided callback is empty".to_string(),
            ));
        }

        let mut listener = Self {
            event,
            callback,
            weight: None,
        };
        listener.set_weight(weight)?;

        Ok(listener)
    }

    /// Sets the weight, `None` to have one assigned on registration
    pub fn set_weight(&mut self, weight: Option<Weight>) -> Result<(), EventError> {
        if weight == Some(0) {
            return Err(EventError::InvalidListener(
                "Could not set the weight of the listener: provided weight is not a positive number"
                    .to_string(),
            ));
        }

        self.weight = weight;
        Ok(())
    }

    /// Name of the event
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Callback of the listener
    pub fn callback(&self) -> &Callback {
        &self.callback
    }

    /// Weight of the listener
    pub fn weight(&self) -> Option<Weight> {
        self.weight
    }
}

impl fmt::Display for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.event, self.callback)?;
        if let Some(weight) = self.weight {
            write!(f, " #{}", weight)?;
        }
        Ok(())
    }
}

/// Selects which listeners [`crate::EventManager::remove_listener`] removes
#[derive(Debug, Clone)]
pub enum ListenerSelector {
    /// Every listener of every event
    All,
    /// The listener at an exact weight
    Weight { event: String, weight: Weight },
    /// The first listener, in weight order, with this callback
    Callback { event: String, callback: Callback },
    /// A listener equal to this one; the event is taken from the listener
    Listener(Listener),
}

impl ListenerSelector {
    /// Selects by weight
    pub fn weight(event: &str, weight: Weight) -> Self {
        ListenerSelector::Weight {
            event: event.to_string(),
            weight,
        }
    }

    /// Selects by callback
    pub fn callback(event: &str, callback: Callback) -> Self {
        ListenerSelector::Callback {
            event: event.to_string(),
            callback,
        }
    }
}

impl From<Listener> for ListenerSelector {
    fn from(listener: Listener) -> Self {
        ListenerSelector::Listener(listener)
    }
}

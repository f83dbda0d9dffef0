//! The event object handed to every listener of a trigger

use crate::error::EventError;
use crate::utils::validate_event_name;
use compact_str::CompactString;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Arguments carried by an event, keyed by name
pub type Arguments = HashMap<String, Value>;

/// A triggered event.
///
/// The manager builds one `Event` per trigger and passes it by mutable
/// reference to each listener in weight order. Listeners communicate through
/// the argument bag and can halt the chain with [`Event::stop_propagation`].
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    name: CompactString,
    arguments: Arguments,
    stopped: bool,
}

impl Event {
    /// Creates a new event, failing when the name is empty
    pub fn new(name: &str, arguments: Option<Arguments>) -> Result<Self, EventError> {
        let name = validate_event_name(name, "set the name of the event")?;

        Ok(Self {
            name,
            arguments: arguments.unwrap_or_default(),
            stopped: false,
        })
    }

    /// Name of the event
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets an argument. A `Value::Null` removes the argument instead.
    pub fn set_argument(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if value.is_null() {
            self.arguments.remove(&key);
        } else {
            self.arguments.insert(key, value);
        }
    }

    /// Removes an argument, returning its previous value
    pub fn remove_argument(&mut self, key: &str) -> Option<Value> {
        self.arguments.remove(key)
    }

    /// Gets an argument
    pub fn argument(&self, key: &str) -> Option<&Value> {
        self.arguments.get(key).filter(|value| !value.is_null())
    }

    /// Gets an argument or the provided default when it is not set
    pub fn argument_or(&self, key: &str, default: Value) -> Value {
        self.argument(key).cloned().unwrap_or(default)
    }

    /// Gets an argument converted to `T`.
    ///
    /// Returns `None` when the argument is missing or has another shape.
    pub fn argument_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.argument(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// All arguments of the event
    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    /// Stops invocation of the listeners after the current one
    pub fn stop_propagation(&mut self) {
        self.stopped = true;
    }

    /// Clears a previously requested stop
    pub fn resume_propagation(&mut self) {
        self.stopped = false;
    }

    /// Whether a listener requested to stop the chain
    pub fn is_propagation_stopped(&self) -> bool {
        self.stopped
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

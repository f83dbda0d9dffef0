//! Error types for the weighted event system

use crate::listener::Weight;

/// Errors raised by events, listeners, loaders and the event manager
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// Event name is empty or otherwise unusable
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    /// Listener callback or weight is invalid
    #[error("Invalid listener: {0}")]
    InvalidListener(String),

    /// Explicit weight does not fit below the listener limit
    #[error("Could not register listener for event {event}: weight {weight} is out of range, try a value below {max}")]
    WeightOutOfRange {
        event: String,
        weight: Weight,
        max: Weight,
    },

    /// Explicit weight is already occupied for the event
    #[error("Could not register listener for event {event}: weight {weight} is already set with listener {existing}")]
    WeightTaken {
        event: String,
        weight: Weight,
        existing: String,
    },

    /// Automatic weight search ran out of slots
    #[error("Could not get a new weight for event {event}: tried from {from} to {to}")]
    NoFreeWeight {
        event: String,
        from: Weight,
        to: Weight,
    },

    /// Manager configuration is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A listener callback failed
    #[error("Handler execution failed: {0}")]
    HandlerExecution(String),

    /// A listener definition names a callback nobody registered
    #[error("No callback registered under name '{0}'")]
    UnresolvedCallback(String),

    /// Listener definitions could not be read or parsed
    #[error("Listener source error: {0}")]
    Source(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for EventError {
    fn from(err: serde_json::Error) -> Self {
        EventError::Source(err.to_string())
    }
}

impl From<toml::de::Error> for EventError {
    fn from(err: toml::de::Error) -> Self {
        EventError::Source(err.to_string())
    }
}

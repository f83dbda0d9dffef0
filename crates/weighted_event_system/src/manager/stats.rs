/// Statistics tracking for the event manager
use serde::{Deserialize, Serialize};

/// Event manager statistics for monitoring
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventManagerStats {
    /// Triggers that reached at least one listener
    pub events_triggered: u64,
    /// Listener callbacks invoked
    pub listeners_invoked: u64,
    /// Triggers cut short by a listener stopping propagation
    pub propagation_stops: u64,
    /// Event names handed to the loader
    pub lazy_loads: u64,
    /// Currently registered listeners
    pub total_listeners: usize,
}

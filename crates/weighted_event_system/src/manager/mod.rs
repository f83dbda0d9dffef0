//! Event manager module - the weighted listener registry and its trigger loop
mod core;
mod dispatch;
mod registration;
mod shared;
mod stats;

pub use core::WeightedEventManager;
pub use shared::SharedEventManager;
pub use stats::EventManagerStats;

use crate::error::EventError;
use crate::event::Arguments;
use crate::listener::{Callback, Listener, ListenerSelector, Weight};

/// Operations of a manager of dynamic events.
///
/// This is the handle loaders receive: anything a loader registers goes
/// through `add_listener`.
pub trait EventManager {
    /// Adds a new listener.
    ///
    /// Without a weight the first free weight from the default weight upwards
    /// is assigned. The returned listener always carries its weight.
    fn add_listener(
        &mut self,
        event: &str,
        callback: Callback,
        weight: Option<Weight>,
    ) -> Result<Listener, EventError>;

    /// Removes listeners, returning whether anything was removed
    fn remove_listener(&mut self, selector: ListenerSelector) -> Result<bool, EventError>;

    /// Checks if there are listeners registered for the provided event.
    ///
    /// Listeners of a configured loader are loaded for the event first.
    fn has_listeners(&mut self, event: &str) -> Result<bool, EventError>;

    /// Triggers the listeners of the provided event with the provided arguments
    fn trigger_event(&mut self, event: &str, arguments: Option<Arguments>) -> Result<(), EventError>;
}

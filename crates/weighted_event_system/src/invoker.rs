//! Invocation of listener callbacks

use crate::error::EventError;
use crate::event::Event;
use crate::listener::Callback;

/// Trait for custom callback invocation.
///
/// The manager hands every listener callback of a trigger to the invoker
/// together with the shared event. Errors returned here abort the trigger and
/// reach the caller unmodified.
pub trait Invoker: Send + Sync + 'static {
    /// Invokes `callback` with the event
    fn invoke(&self, callback: &Callback, event: &mut Event) -> Result<(), EventError>;
}

/// Invoker that calls the callback directly
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectInvoker;

impl DirectInvoker {
    pub fn new() -> Self {
        Self
    }
}

impl Invoker for DirectInvoker {
    fn invoke(&self, callback: &Callback, event: &mut Event) -> Result<(), EventError> {
        callback.call(event)
    }
}

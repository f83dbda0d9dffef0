//! Lazy listener loading
//!
//! A loader fills in the listeners of an event the first time the manager is
//! asked about that event, instead of registering everything up front.
//!
//! - [`ChainedEventLoader`] runs several loaders for the same event
//! - [`DefinitionEventLoader`] registers listeners read from a [`ListenerSource`]

mod chained;
mod definition;
mod source;

pub use chained::ChainedEventLoader;
pub use definition::{CallbackRegistry, CallbackResolver, DefinitionEventLoader};
pub use source::{
    ChainedListenerSource, FileListenerSource, ListenerDefinition, ListenerDefinitions,
    ListenerSource, StaticListenerSource,
};

use crate::error::EventError;
use crate::manager::EventManager;

/// Trait for lazy listener loaders
pub trait EventLoader: Send + Sync + 'static {
    /// Loads the listeners for the provided event.
    ///
    /// Registers zero or more listeners through `manager`. The manager calls
    /// this at most once per event name.
    fn load_listeners(&self, event: &str, manager: &mut dyn EventManager) -> Result<(), EventError>;
}

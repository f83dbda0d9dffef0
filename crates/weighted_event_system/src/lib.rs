//! # Weighted Event System
//!
//! An in-process event manager: named events carry arguments to an ordered
//! chain of listeners. Listeners sit at unique integer weights per event and
//! fire in ascending weight; any listener can stop the rest of the chain.
//! Listener sets can be filled lazily by a loader the first time an event is
//! asked about.
//!
//! ## Key Features
//!
//! - **Deterministic Ordering**: Listeners fire by ascending weight, whatever the registration order
//! - **Collision Detection**: Explicit weights are unique per event and bounded
//! - **Automatic Weights**: Listeners without a weight get the first free slot from the middle up
//! - **Short-Circuit**: A listener can stop propagation for the current trigger
//! - **Lazy Loading**: Loaders and definition files populate events on first use
//!
//! ## Architecture
//!
//! - **Event**: Name, argument bag and stop flag shared along one trigger
//! - **Listener**: Event name, named [`Callback`] and weight
//! - **EventManager**: Registry of listeners and the trigger loop
//! - **EventLoader**: Lazy population of the registry, composable in chains
//! - **Invoker**: Pluggable callback invocation
//!
//! ## Usage Examples
//!
//! ### Basic Event Manager
//!
//! ```rust
//! use weighted_event_system::{Arguments, Callback, EventError, EventManager, WeightedEventManager};
//! use serde_json::json;
//!
//! let mut manager = WeightedEventManager::new();
//!
//! manager.add_listener("user.login", Callback::new("audit", |event| {
//!     let user = event.argument_or("user", json!("anonymous"));
//!     event.set_argument("audited", json!(user));
//!     Ok(())
//! }), Some(10))?;
//!
//! manager.add_listener("user.login", Callback::new("guard", |event| {
//!     event.stop_propagation();
//!     Ok(())
//! }), None)?;
//!
//! let mut arguments = Arguments::new();
//! arguments.insert("user".to_string(), json!("alice"));
//! manager.trigger_event("user.login", Some(arguments))?;
//! # Ok::<(), EventError>(())
//! ```
//!
//! ### Lazy Loading From Definitions
//!
//! ```rust
//! use weighted_event_system::{
//!     Callback, CallbackRegistry, DefinitionEventLoader, EventError, EventManager,
//!     StaticListenerSource, WeightedEventManager,
//! };
//! use std::sync::Arc;
//!
//! let callbacks = CallbackRegistry::new()
//!     .with(Callback::new("greet", |_event| Ok(())));
//! let source = StaticListenerSource::new()
//!     .with_listener("user.login", "greet", Some(20));
//!
//! let mut manager = WeightedEventManager::new();
//! manager.set_loader(Arc::new(DefinitionEventLoader::new(
//!     Arc::new(source),
//!     Arc::new(callbacks),
//! )));
//!
//! // the loader registers "greet" here
//! assert!(manager.has_listeners("user.login")?);
//! # Ok::<(), EventError>(())
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod invoker;
pub mod listener;
pub mod loader;
pub mod logging;
pub mod manager;
pub mod utils;

// Re-exports for convenience
pub use config::{EventSystemConfig, LoggingSettings, ManagerConfig, DEFAULT_MAX_LISTENERS};
pub use error::EventError;
pub use event::{Arguments, Event};
pub use invoker::{DirectInvoker, Invoker};
pub use listener::{Callback, CallbackFn, Listener, ListenerSelector, Weight};
pub use loader::{
    CallbackRegistry, CallbackResolver, ChainedEventLoader, ChainedListenerSource,
    DefinitionEventLoader, EventLoader, FileListenerSource, ListenerDefinition,
    ListenerDefinitions, ListenerSource, StaticListenerSource,
};
pub use logging::setup_logging;
pub use manager::{EventManager, EventManagerStats, SharedEventManager, WeightedEventManager};

/// Version of the crate
pub const WEIGHTED_EVENT_SYSTEM_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used throughout the system
pub type Result<T> = std::result::Result<T, EventError>;

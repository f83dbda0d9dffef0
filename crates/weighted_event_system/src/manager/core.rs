/// Core WeightedEventManager implementation
use super::stats::EventManagerStats;
use crate::config::ManagerConfig;
use crate::error::EventError;
use crate::invoker::{DirectInvoker, Invoker};
use crate::listener::{Listener, Weight};
use crate::loader::EventLoader;
use crate::utils::default_weight_for;
use compact_str::CompactString;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Manager of dynamic events with weighted listeners.
///
/// Listeners of one event live in an ordered map keyed by weight, so the
/// trigger loop walks them in ascending weight without re-sorting. Weights are
/// unique per event and stay below `max_listeners`.
///
/// With a loader configured, the listeners of an event are loaded the first
/// time any operation names that event. Every event name is handed to the
/// loader at most once over the lifetime of the manager, or until the loader
/// is replaced.
pub struct WeightedEventManager {
    /// Event name to its listeners, ordered by weight
    pub(super) events: HashMap<CompactString, BTreeMap<Weight, Listener>>,
    /// Exclusive upper bound for weights
    pub(super) max_listeners: Weight,
    /// First weight tried for listeners without one
    pub(super) default_weight: Weight,
    /// Lazy listener loader
    pub(super) loader: Option<Arc<dyn EventLoader>>,
    /// Events already handed to the loader; `Some` iff a loader is set
    pub(super) loaded: Option<HashSet<CompactString>>,
    /// Calls the listener callbacks
    pub(super) invoker: Arc<dyn Invoker>,
    pub(super) stats: EventManagerStats,
}

impl std::fmt::Debug for WeightedEventManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeightedEventManager")
            .field("events", &self.events.len())
            .field("max_listeners", &self.max_listeners)
            .field("default_weight", &self.default_weight)
            .field("loader", &self.loader.is_some())
            .field("stats", &self.stats)
            .finish()
    }
}

impl WeightedEventManager {
    /// Creates a manager with the default configuration and no listeners.
    pub fn new() -> Self {
        Self::from_valid_config(&ManagerConfig::default())
    }

    /// Creates a manager with the provided configuration.
    ///
    /// Fails with [`EventError::InvalidConfiguration`] when `max_listeners` is zero.
    pub fn with_config(config: ManagerConfig) -> Result<Self, EventError> {
        config.validate()?;
        Ok(Self::from_valid_config(&config))
    }

    /// Creates a manager allowing weights below `max_listeners`.
    pub fn with_max_listeners(max_listeners: Weight) -> Result<Self, EventError> {
        Self::with_config(ManagerConfig::with_max_listeners(max_listeners))
    }

    fn from_valid_config(config: &ManagerConfig) -> Self {
        Self {
            events: HashMap::new(),
            max_listeners: config.max_listeners,
            default_weight: default_weight_for(config.max_listeners),
            loader: None,
            loaded: None,
            invoker: Arc::new(DirectInvoker::new()),
            stats: EventManagerStats::default(),
        }
    }

    /// Replaces the invoker used to call listener callbacks.
    pub fn with_invoker<I: Invoker>(mut self, invoker: I) -> Self {
        self.invoker = Arc::new(invoker);
        self
    }

    /// Sets the invoker used to call listener callbacks.
    pub fn set_invoker(&mut self, invoker: Arc<dyn Invoker>) {
        self.invoker = invoker;
    }

    /// Sets the lazy listener loader.
    ///
    /// Forgets which events were loaded before; already registered listeners
    /// stay.
    pub fn set_loader(&mut self, loader: Arc<dyn EventLoader>) {
        self.loader = Some(loader);
        self.loaded = Some(HashSet::new());
    }

    /// Gets the lazy listener loader
    pub fn loader(&self) -> Option<Arc<dyn EventLoader>> {
        self.loader.clone()
    }

    /// Loads the listeners of `event` through the loader, once per event name.
    ///
    /// The event is marked before the loader runs: listeners the loader
    /// registers come back through `add_listener` without loading again, and
    /// a failed load is not retried.
    pub(super) fn ensure_loaded(&mut self, event: &CompactString) -> Result<(), EventError> {
        let Some(loader) = self.loader.clone() else {
            return Ok(());
        };

        let loaded = self.loaded.get_or_insert_with(HashSet::new);
        if !loaded.insert(event.clone()) {
            return Ok(());
        }

        self.stats.lazy_loads += 1;
        debug!("📥 Lazy loading listeners for event {}", event);

        loader.load_listeners(event, self)
    }

    /// Listeners of an event in invocation order, without loading
    pub fn listeners(&self, event: &str) -> Vec<Listener> {
        self.events
            .get(event)
            .map(|listeners| listeners.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Names of all events with at least one listener
    pub fn registered_events(&self) -> Vec<String> {
        self.events.keys().map(|name| name.to_string()).collect()
    }

    /// Number of registered listeners across all events
    pub fn listener_count(&self) -> usize {
        self.events.values().map(BTreeMap::len).sum()
    }

    /// Exclusive upper bound for weights
    #[inline]
    pub fn max_listeners(&self) -> Weight {
        self.max_listeners
    }

    /// First weight tried for listeners registered without one
    #[inline]
    pub fn default_weight(&self) -> Weight {
        self.default_weight
    }

    /// Gets the current statistics
    pub fn stats(&self) -> EventManagerStats {
        EventManagerStats {
            total_listeners: self.listener_count(),
            ..self.stats.clone()
        }
    }
}

impl Default for WeightedEventManager {
    fn default() -> Self {
        Self::new()
    }
}

//! Loader registering listeners from a definition source

use super::source::{ListenerDefinition, ListenerSource};
use super::EventLoader;
use crate::error::EventError;
use crate::listener::Callback;
use crate::manager::EventManager;
use compact_str::CompactString;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Trait for turning callback names from definitions into callbacks
pub trait CallbackResolver: Send + Sync + 'static {
    /// Resolves the callback registered under `name`
    fn resolve_callback(&self, name: &str) -> Result<Callback, EventError>;
}

/// Callbacks available to definition sources, by name
#[derive(Debug, Clone, Default)]
pub struct CallbackRegistry {
    callbacks: HashMap<CompactString, Callback>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback under its own name, replacing any previous one
    pub fn register(&mut self, callback: Callback) {
        self.callbacks
            .insert(CompactString::new(callback.name()), callback);
    }

    /// Registers a callback, builder style
    pub fn with(mut self, callback: Callback) -> Self {
        self.register(callback);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.callbacks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl CallbackResolver for CallbackRegistry {
    fn resolve_callback(&self, name: &str) -> Result<Callback, EventError> {
        self.callbacks
            .get(name)
            .cloned()
            .ok_or_else(|| EventError::UnresolvedCallback(name.to_string()))
    }
}

/// Loader backed by a [`ListenerSource`].
///
/// The source is read once, on the first load. Afterwards each load takes the
/// definitions of its event out of the cache and registers them in order, so
/// the cache only holds events that were never asked for.
pub struct DefinitionEventLoader {
    source: Arc<dyn ListenerSource>,
    resolver: Arc<dyn CallbackResolver>,
    pending: OnceCell<DashMap<CompactString, Vec<ListenerDefinition>>>,
}

impl DefinitionEventLoader {
    /// Creates a loader reading from `source` and resolving callbacks with `resolver`
    pub fn new(source: Arc<dyn ListenerSource>, resolver: Arc<dyn CallbackResolver>) -> Self {
        Self {
            source,
            resolver,
            pending: OnceCell::new(),
        }
    }

    fn pending(&self) -> Result<&DashMap<CompactString, Vec<ListenerDefinition>>, EventError> {
        self.pending.get_or_try_init(|| {
            let definitions = self.source.read_listener_definitions()?;
            debug!("📚 Cached listener definitions for {} events", definitions.len());

            Ok(definitions
                .into_iter()
                .map(|(event, definitions)| (CompactString::from(event), definitions))
                .collect())
        })
    }

    /// Number of events whose definitions are still cached.
    ///
    /// Zero before the source has been read.
    pub fn pending_event_count(&self) -> usize {
        self.pending.get().map_or(0, |pending| pending.len())
    }
}

impl std::fmt::Debug for DefinitionEventLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefinitionEventLoader")
            .field("read", &self.pending.get().is_some())
            .field("pending_events", &self.pending_event_count())
            .finish()
    }
}

impl EventLoader for DefinitionEventLoader {
    fn load_listeners(&self, event: &str, manager: &mut dyn EventManager) -> Result<(), EventError> {
        let pending = self.pending()?;

        // An unresolved callback leaves the cached definitions in place.
        let listeners = {
            let Some(definitions) = pending.get(event) else {
                return Ok(());
            };

            let resolved = definitions
                .iter()
                .map(|definition| {
                    self.resolver
                        .resolve_callback(&definition.callback)
                        .map(|callback| (callback, definition.weight))
                })
                .collect::<Result<Vec<_>, EventError>>()?;
            resolved
        };

        pending.remove(event);
        debug!("🔌 Registering {} listeners for event {}", listeners.len(), event);

        for (callback, weight) in listeners {
            manager.add_listener(event, callback, weight)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Arguments;
    use crate::listener::{Listener, ListenerSelector, Weight};
    use crate::loader::source::{ListenerDefinitions, StaticListenerSource};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Event manager recording the listeners added to it
    #[derive(Default)]
    struct RecordingManager {
        added: Vec<(String, String, Option<Weight>)>,
    }

    impl EventManager for RecordingManager {
        fn add_listener(
            &mut self,
            event: &str,
            callback: Callback,
            weight: Option<Weight>,
        ) -> Result<Listener, EventError> {
            self.added
                .push((event.to_string(), callback.name().to_string(), weight));
            Listener::new(event, callback, weight)
        }

        fn remove_listener(&mut self, _selector: ListenerSelector) -> Result<bool, EventError> {
            Ok(false)
        }

        fn has_listeners(&mut self, _event: &str) -> Result<bool, EventError> {
            Ok(false)
        }

        fn trigger_event(&mut self, _event: &str, _arguments: Option<Arguments>) -> Result<(), EventError> {
            Ok(())
        }
    }

    /// Source counting how often it is read
    struct CountingSource {
        inner: StaticListenerSource,
        reads: Arc<AtomicUsize>,
    }

    impl ListenerSource for CountingSource {
        fn read_listener_definitions(&self) -> Result<ListenerDefinitions, EventError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.read_listener_definitions()
        }
    }

    fn registry() -> Arc<CallbackRegistry> {
        Arc::new(
            CallbackRegistry::new()
                .with(Callback::new("callback", |_event| Ok(())))
                .with(Callback::new("callback2", |_event| Ok(()))),
        )
    }

    #[test]
    fn test_load_listeners() {
        let source = StaticListenerSource::new().with_listener("event", "callback", Some(10));
        let loader = DefinitionEventLoader::new(Arc::new(source), registry());
        let mut manager = RecordingManager::default();

        loader.load_listeners("event", &mut manager).unwrap();

        assert_eq!(
            manager.added,
            vec![("event".to_string(), "callback".to_string(), Some(10))]
        );
    }

    #[test]
    fn test_source_read_once_and_entries_evicted() {
        let reads = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            inner: StaticListenerSource::new()
                .with_listener("event", "callback", None)
                .with_listener("event", "callback2", Some(5))
                .with_listener("other", "callback", None),
            reads: reads.clone(),
        };
        let loader = DefinitionEventLoader::new(Arc::new(source), registry());
        let mut manager = RecordingManager::default();

        assert_eq!(loader.pending_event_count(), 0);

        loader.load_listeners("event", &mut manager).unwrap();
        assert_eq!(manager.added.len(), 2);
        assert_eq!(loader.pending_event_count(), 1);

        // already consumed
        loader.load_listeners("event", &mut manager).unwrap();
        assert_eq!(manager.added.len(), 2);

        loader.load_listeners("unknown", &mut manager).unwrap();
        loader.load_listeners("other", &mut manager).unwrap();
        assert_eq!(manager.added.len(), 3);
        assert_eq!(loader.pending_event_count(), 0);

        assert_eq!(reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unresolved_callback_registers_nothing_and_keeps_definitions() {
        let source = StaticListenerSource::new()
            .with_listener("event", "callback", Some(10))
            .with_listener("event", "missing", Some(20))
            .with_listener("event", "callback2", Some(30));
        let loader = DefinitionEventLoader::new(Arc::new(source), registry());
        let mut manager = RecordingManager::default();

        let result = loader.load_listeners("event", &mut manager);

        assert!(matches!(result, Err(EventError::UnresolvedCallback(name)) if name == "missing"));
        assert!(manager.added.is_empty());
        assert_eq!(loader.pending_event_count(), 1);

        // still failing, still nothing lost
        assert!(loader.load_listeners("event", &mut manager).is_err());
        assert!(manager.added.is_empty());
        assert_eq!(loader.pending_event_count(), 1);
    }

    #[test]
    fn test_resolved_definitions_after_registry_update() {
        /// Resolver whose callbacks can be added after the loader is built
        #[derive(Default)]
        struct LateRegistry(Mutex<CallbackRegistry>);

        impl CallbackResolver for LateRegistry {
            fn resolve_callback(&self, name: &str) -> Result<Callback, EventError> {
                self.0.lock().unwrap().resolve_callback(name)
            }
        }

        let source = StaticListenerSource::new()
            .with_listener("event", "a", Some(10))
            .with_listener("event", "missing", Some(20))
            .with_listener("event", "b", Some(30));
        let resolver = Arc::new(LateRegistry::default());
        {
            let mut callbacks = resolver.0.lock().unwrap();
            callbacks.register(Callback::new("a", |_event| Ok(())));
            callbacks.register(Callback::new("b", |_event| Ok(())));
        }
        let loader = DefinitionEventLoader::new(Arc::new(source), resolver.clone());
        let mut manager = RecordingManager::default();

        assert!(loader.load_listeners("event", &mut manager).is_err());

        resolver
            .0
            .lock()
            .unwrap()
            .register(Callback::new("missing", |_event| Ok(())));
        loader.load_listeners("event", &mut manager).unwrap();

        assert_eq!(
            manager.added,
            vec![
                ("event".to_string(), "a".to_string(), Some(10)),
                ("event".to_string(), "missing".to_string(), Some(20)),
                ("event".to_string(), "b".to_string(), Some(30)),
            ]
        );
        assert_eq!(loader.pending_event_count(), 0);
    }

    #[test]
    fn test_failed_read_is_retried() {
        struct FailingSource {
            attempts: Mutex<usize>,
        }

        impl ListenerSource for FailingSource {
            fn read_listener_definitions(&self) -> Result<ListenerDefinitions, EventError> {
                let mut attempts = self.attempts.lock().unwrap();
                *attempts += 1;
                if *attempts == 1 {
                    return Err(EventError::Source("unavailable".to_string()));
                }
                Ok(ListenerDefinitions::new())
            }
        }

        let loader = DefinitionEventLoader::new(
            Arc::new(FailingSource { attempts: Mutex::new(0) }),
            registry(),
        );
        let mut manager = RecordingManager::default();

        assert!(loader.load_listeners("event", &mut manager).is_err());
        assert!(loader.load_listeners("event", &mut manager).is_ok());
    }

    #[test]
    fn test_registry() {
        let registry = registry();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("callback"));
        assert_eq!(registry.resolve_callback("callback2").unwrap().name(), "callback2");
        assert!(registry.resolve_callback("nope").is_err());
    }
}

//! Chain of loaders contributing listeners to the same events

use super::EventLoader;
use crate::error::EventError;
use crate::manager::EventManager;
use smallvec::SmallVec;
use std::sync::Arc;

/// Loader delegating to an ordered list of loaders.
///
/// Each loader of the chain gets the same event, in chain order. The first
/// failing loader ends the load.
#[derive(Default)]
pub struct ChainedEventLoader {
    loaders: SmallVec<[Arc<dyn EventLoader>; 4]>,
}

impl ChainedEventLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a loader at the end of the chain
    pub fn add_loader(&mut self, loader: Arc<dyn EventLoader>) {
        self.loaders.push(loader);
    }

    /// Adds a loader at the beginning of the chain
    pub fn prepend_loader(&mut self, loader: Arc<dyn EventLoader>) {
        self.loaders.insert(0, loader);
    }

    /// Removes a loader from the chain.
    ///
    /// Loaders are matched by identity. Returns whether the loader was found.
    pub fn remove_loader(&mut self, loader: &Arc<dyn EventLoader>) -> bool {
        match self.loaders.iter().position(|candidate| Arc::ptr_eq(candidate, loader)) {
            Some(index) => {
                self.loaders.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of loaders in the chain
    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

impl std::fmt::Debug for ChainedEventLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainedEventLoader")
            .field("loaders", &self.loaders.len())
            .finish()
    }
}

impl EventLoader for ChainedEventLoader {
    fn load_listeners(&self, event: &str, manager: &mut dyn EventManager) -> Result<(), EventError> {
        for loader in &self.loaders {
            loader.load_listeners(event, manager)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Callback, WeightedEventManager};
    use std::sync::Mutex;

    /// Records every event it is asked to load and registers one listener
    struct RecordingLoader {
        name: &'static str,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl EventLoader for RecordingLoader {
        fn load_listeners(&self, event: &str, manager: &mut dyn EventManager) -> Result<(), EventError> {
            self.calls.lock().unwrap().push(format!("{}:{}", self.name, event));
            manager.add_listener(event, Callback::new(self.name, |_event| Ok(())), None)?;
            Ok(())
        }
    }

    fn loader(name: &'static str, calls: &Arc<Mutex<Vec<String>>>) -> Arc<dyn EventLoader> {
        Arc::new(RecordingLoader {
            name,
            calls: calls.clone(),
        })
    }

    #[test]
    fn test_add_and_remove() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let loader1 = loader("loader1", &calls);
        let loader2 = loader("loader2", &calls);
        let loader3 = loader("loader3", &calls);

        let mut chain = ChainedEventLoader::new();
        chain.add_loader(loader1.clone());
        chain.add_loader(loader2.clone());
        chain.prepend_loader(loader3.clone());
        assert_eq!(chain.len(), 3);

        assert!(chain.remove_loader(&loader1));
        assert_eq!(chain.len(), 2);
        assert!(!chain.remove_loader(&loader1));

        let mut manager = WeightedEventManager::new();
        chain.load_listeners("event", &mut manager).unwrap();

        assert_eq!(
            *calls.lock().unwrap(),
            vec!["loader3:event".to_string(), "loader2:event".to_string()]
        );
    }

    #[test]
    fn test_load_listeners_runs_every_loader() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut chain = ChainedEventLoader::new();
        chain.add_loader(loader("loader1", &calls));
        chain.add_loader(loader("loader2", &calls));

        let mut manager = WeightedEventManager::new();
        chain.load_listeners("event", &mut manager).unwrap();

        assert_eq!(calls.lock().unwrap().len(), 2);

        let listeners = manager.listeners("event");
        assert_eq!(listeners.len(), 2);
        assert_eq!(listeners[0].callback().name(), "loader1");
        assert_eq!(listeners[0].weight(), Some(50));
        assert_eq!(listeners[1].callback().name(), "loader2");
        assert_eq!(listeners[1].weight(), Some(51));
    }

    #[test]
    fn test_load_listeners_stops_at_first_error() {
        struct FailingLoader;

        impl EventLoader for FailingLoader {
            fn load_listeners(&self, _event: &str, _manager: &mut dyn EventManager) -> Result<(), EventError> {
                Err(EventError::Source("definitions unavailable".to_string()))
            }
        }

        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut chain = ChainedEventLoader::new();
        chain.add_loader(loader("loader1", &calls));
        chain.add_loader(Arc::new(FailingLoader));
        chain.add_loader(loader("loader3", &calls));

        let mut manager = WeightedEventManager::new();
        manager.set_loader(Arc::new(chain));

        let result = manager.has_listeners("event");

        assert!(matches!(result, Err(EventError::Source(msg)) if msg == "definitions unavailable"));
        assert_eq!(*calls.lock().unwrap(), vec!["loader1:event".to_string()]);

        let listeners = manager.listeners("event");
        assert_eq!(listeners.len(), 1);
        assert_eq!(listeners[0].callback().name(), "loader1");
    }
}

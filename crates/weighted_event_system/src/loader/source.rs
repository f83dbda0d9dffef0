//! Sources of listener definitions
//!
//! A source reads every listener definition it knows about at once, keyed by
//! event name. The [`super::DefinitionEventLoader`] turns definitions into
//! registered listeners on demand.

use crate::error::EventError;
use crate::listener::Weight;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// A listener as described in a definition source.
///
/// The callback is referenced by name and resolved when the listener is
/// registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerDefinition {
    /// Name of the callback to invoke
    pub callback: String,
    /// Weight of the listener, assigned automatically when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Weight>,
}

impl ListenerDefinition {
    pub fn new(callback: &str, weight: Option<Weight>) -> Self {
        Self {
            callback: callback.to_string(),
            weight,
        }
    }
}

/// Event name to its listener definitions, in registration order
pub type ListenerDefinitions = BTreeMap<String, Vec<ListenerDefinition>>;

/// Trait for reading listener definitions from a data source
pub trait ListenerSource: Send + Sync + 'static {
    /// Reads all the listener definitions of the source
    fn read_listener_definitions(&self) -> Result<ListenerDefinitions, EventError>;
}

/// In-memory listener definitions
#[derive(Debug, Clone, Default)]
pub struct StaticListenerSource {
    definitions: ListenerDefinitions,
}

impl StaticListenerSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a definition for `event`
    pub fn with_listener(mut self, event: &str, callback: &str, weight: Option<Weight>) -> Self {
        self.add_listener(event, callback, weight);
        self
    }

    /// Appends a definition for `event`
    pub fn add_listener(&mut self, event: &str, callback: &str, weight: Option<Weight>) {
        self.definitions
            .entry(event.to_string())
            .or_default()
            .push(ListenerDefinition::new(callback, weight));
    }
}

impl From<ListenerDefinitions> for StaticListenerSource {
    fn from(definitions: ListenerDefinitions) -> Self {
        Self { definitions }
    }
}

impl ListenerSource for StaticListenerSource {
    fn read_listener_definitions(&self) -> Result<ListenerDefinitions, EventError> {
        Ok(self.definitions.clone())
    }
}

/// Source merging the definitions of an ordered list of sources.
///
/// Definitions of the same event are appended in chain order.
#[derive(Default)]
pub struct ChainedListenerSource {
    sources: SmallVec<[Arc<dyn ListenerSource>; 4]>,
}

impl ChainedListenerSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a source at the end of the chain
    pub fn add_source(&mut self, source: Arc<dyn ListenerSource>) {
        self.sources.push(source);
    }

    /// Adds a source at the beginning of the chain
    pub fn prepend_source(&mut self, source: Arc<dyn ListenerSource>) {
        self.sources.insert(0, source);
    }

    /// Removes a source by identity, returning whether it was found
    pub fn remove_source(&mut self, source: &Arc<dyn ListenerSource>) -> bool {
        match self.sources.iter().position(|candidate| Arc::ptr_eq(candidate, source)) {
            Some(index) => {
                self.sources.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl std::fmt::Debug for ChainedListenerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainedListenerSource")
            .field("sources", &self.sources.len())
            .finish()
    }
}

impl ListenerSource for ChainedListenerSource {
    fn read_listener_definitions(&self) -> Result<ListenerDefinitions, EventError> {
        let mut merged = ListenerDefinitions::new();

        for source in &self.sources {
            for (event, definitions) in source.read_listener_definitions()? {
                merged.entry(event).or_default().extend(definitions);
            }
        }

        Ok(merged)
    }
}

/// Document layout of definition files
#[derive(Debug, Default, Serialize, Deserialize)]
struct ListenerDocument {
    #[serde(default)]
    events: ListenerDefinitions,
}

/// Listener definitions stored in a TOML or JSON file.
///
/// The format follows the file extension. Both describe the same document:
///
/// ```toml
/// [[events."user.login"]]
/// callback = "audit"
/// weight = 10
///
/// [[events."user.login"]]
/// callback = "greet"
/// ```
#[derive(Debug, Clone)]
pub struct FileListenerSource {
    path: PathBuf,
}

impl FileListenerSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ListenerSource for FileListenerSource {
    fn read_listener_definitions(&self) -> Result<ListenerDefinitions, EventError> {
        let extension = self
            .path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let document: ListenerDocument = match extension.as_str() {
            "toml" => toml::from_str(&std::fs::read_to_string(&self.path)?)?,
            "json" => serde_json::from_str(&std::fs::read_to_string(&self.path)?)?,
            _ => {
                return Err(EventError::Source(format!(
                    "Unsupported listener definition format: {}",
                    self.path.display()
                )))
            }
        };

        debug!(
            "📂 Read listener definitions for {} events from {}",
            document.events.len(),
            self.path.display()
        );
        Ok(document.events)
    }
}

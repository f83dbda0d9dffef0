//! # Lazy Loading Example
//!
//! Listeners for an order workflow are declared in a TOML definition file and
//! registered only when the event is first triggered. A second, in-code
//! loader adds an audit listener to every event it sees.

use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use tracing::info;
use weighted_event_system::{
    setup_logging, Arguments, Callback, CallbackRegistry, ChainedEventLoader,
    DefinitionEventLoader, EventError, EventLoader, EventManager, EventSystemConfig,
    FileListenerSource, WeightedEventManager,
};

const CONFIG: &str = r#"
[manager]
max_listeners = 100

[logging]
level = "debug"
"#;

const LISTENERS: &str = r#"
[[events."order.placed"]]
callback = "validate"
weight = 10

[[events."order.placed"]]
callback = "apply_discount"

[[events."order.placed"]]
callback = "invoice"
weight = 90
"#;

/// Adds an audit listener at the last weight of every loaded event
struct AuditLoader;

impl EventLoader for AuditLoader {
    fn load_listeners(&self, event: &str, manager: &mut dyn EventManager) -> Result<(), EventError> {
        manager.add_listener(
            event,
            Callback::new("audit", |event| {
                info!("🧾 Audit: {}", event);
                Ok(())
            }),
            Some(99),
        )?;
        Ok(())
    }
}

fn callbacks() -> CallbackRegistry {
    CallbackRegistry::new()
        .with(Callback::new("validate", |event| {
            let total = event.argument_as::<f64>("total").unwrap_or(0.0);
            if total <= 0.0 {
                info!("🚫 Rejecting order with total {}", total);
                event.set_argument("status", json!("rejected"));
                event.stop_propagation();
            }
            Ok(())
        }))
        .with(Callback::new("apply_discount", |event| {
            let total = event.argument_as::<f64>("total").unwrap_or(0.0);
            if total > 100.0 {
                event.set_argument("total", json!(total * 0.9));
            }
            Ok(())
        }))
        .with(Callback::new("invoice", |event| {
            let total = event.argument_or("total", json!(0));
            info!("💶 Invoicing order {} for {}", event.argument_or("id", json!("?")), total);
            event.set_argument("status", json!("invoiced"));
            Ok(())
        }))
}

fn order(id: &str, total: f64) -> Option<Arguments> {
    let mut arguments = Arguments::new();
    arguments.insert("id".to_string(), json!(id));
    arguments.insert("total".to_string(), json!(total));
    Some(arguments)
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = EventSystemConfig::from_toml_str(CONFIG)?;
    setup_logging(&config.logging, false)?;

    let mut definitions = tempfile::Builder::new().suffix(".toml").tempfile()?;
    definitions.write_all(LISTENERS.as_bytes())?;

    let mut loader = ChainedEventLoader::new();
    loader.add_loader(Arc::new(DefinitionEventLoader::new(
        Arc::new(FileListenerSource::new(definitions.path())),
        Arc::new(callbacks()),
    )));
    loader.add_loader(Arc::new(AuditLoader));

    let mut manager = WeightedEventManager::with_config(config.manager)?;
    manager.set_loader(Arc::new(loader));

    info!("📦 Listeners before the first trigger: {}", manager.listener_count());

    manager.trigger_event("order.placed", order("A-1", 250.0))?;
    manager.trigger_event("order.placed", order("A-2", 0.0))?;
    manager.trigger_event("order.cancelled", order("A-1", 250.0))?;

    for listener in manager.listeners("order.placed") {
        info!("🔗 {}", listener);
    }

    let stats = manager.stats();
    info!(
        "📊 {} triggers, {} invocations, {} stops, {} lazy loads, {} listeners",
        stats.events_triggered,
        stats.listeners_invoked,
        stats.propagation_stops,
        stats.lazy_loads,
        stats.total_listeners
    );

    Ok(())
}

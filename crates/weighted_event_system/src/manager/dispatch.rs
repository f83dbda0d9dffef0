/// Trigger loop and the EventManager trait implementation
use super::core::WeightedEventManager;
use super::EventManager;
use crate::error::EventError;
use crate::event::{Arguments, Event};
use crate::listener::{Callback, Listener, ListenerSelector, Weight};
use crate::utils::validate_event_name;
use tracing::{debug, error};

impl WeightedEventManager {
    /// Invokes the listeners of `event` in ascending weight.
    ///
    /// One [`Event`] is shared by the whole chain. The loop stops after a
    /// listener stops propagation, or at the first invoker error, which is
    /// returned as is.
    fn dispatch(&mut self, event: &str, arguments: Option<Arguments>) -> Result<(), EventError> {
        let name = validate_event_name(event, "trigger the event")?;
        self.ensure_loaded(&name)?;

        let Some(listeners) = self.events.get(&name) else {
            return Ok(());
        };

        let mut event = Event::new(&name, arguments)?;
        self.stats.events_triggered += 1;

        debug!("📤 Triggering {} for {} listeners", name, listeners.len());

        for listener in listeners.values() {
            self.stats.listeners_invoked += 1;

            if let Err(e) = self.invoker.invoke(listener.callback(), &mut event) {
                error!("❌ Listener {} failed: {}", listener, e);
                return Err(e);
            }

            if event.is_propagation_stopped() {
                self.stats.propagation_stops += 1;
                debug!("✋ Propagation of {} stopped by {}", name, listener);
                break;
            }
        }

        Ok(())
    }
}

impl EventManager for WeightedEventManager {
    fn add_listener(
        &mut self,
        event: &str,
        callback: Callback,
        weight: Option<Weight>,
    ) -> Result<Listener, EventError> {
        self.register_listener(event, callback, weight)
    }

    fn remove_listener(&mut self, selector: ListenerSelector) -> Result<bool, EventError> {
        self.unregister_listener(selector)
    }

    fn has_listeners(&mut self, event: &str) -> Result<bool, EventError> {
        let name = validate_event_name(event, "check the event listeners")?;
        self.ensure_loaded(&name)?;

        Ok(self.events.contains_key(&name))
    }

    fn trigger_event(&mut self, event: &str, arguments: Option<Arguments>) -> Result<(), EventError> {
        self.dispatch(event, arguments)
    }
}

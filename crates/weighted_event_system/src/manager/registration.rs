/// Listener registration and removal
use super::core::WeightedEventManager;
use crate::error::EventError;
use crate::listener::{Callback, Listener, ListenerSelector, Weight};
use crate::utils::validate_event_name;
use compact_str::CompactString;
use tracing::{debug, warn};

impl WeightedEventManager {
    /// Registers a listener, resolving or checking its weight.
    pub(super) fn register_listener(
        &mut self,
        event: &str,
        callback: Callback,
        weight: Option<Weight>,
    ) -> Result<Listener, EventError> {
        let mut listener = Listener::new(event, callback, weight)?;
        let name = CompactString::new(listener.event());

        self.ensure_loaded(&name)?;

        let weight = match weight {
            None => {
                let weight = self.next_free_weight(&name)?;
                listener.set_weight(Some(weight))?;
                weight
            }
            Some(weight) => {
                self.check_weight(&name, weight)?;
                weight
            }
        };

        self.events
            .entry(name)
            .or_default()
            .insert(weight, listener.clone());

        debug!("📝 Registered listener {}", listener);
        Ok(listener)
    }

    /// Finds the first unoccupied weight from the default weight upwards.
    ///
    /// Weight 0 is never handed out, so the scan starts at 1 at the lowest.
    fn next_free_weight(&self, event: &CompactString) -> Result<Weight, EventError> {
        let from = self.default_weight.max(1);
        let occupied = self.events.get(event);

        (from..self.max_listeners)
            .find(|weight| occupied.map_or(true, |listeners| !listeners.contains_key(weight)))
            .ok_or_else(|| {
                warn!("⚠️ No free weight left for event {}", event);
                EventError::NoFreeWeight {
                    event: event.to_string(),
                    from,
                    to: self.max_listeners.saturating_sub(1),
                }
            })
    }

    /// Checks an explicit weight against the bounds and the occupied slots
    fn check_weight(&self, event: &CompactString, weight: Weight) -> Result<(), EventError> {
        if weight >= self.max_listeners {
            warn!(
                "⚠️ Weight {} for event {} exceeds the listener limit {}",
                weight, event, self.max_listeners
            );
            return Err(EventError::WeightOutOfRange {
                event: event.to_string(),
                weight,
                max: self.max_listeners,
            });
        }

        if let Some(existing) = self.events.get(event).and_then(|listeners| listeners.get(&weight)) {
            warn!("⚠️ Weight {} for event {} is taken by {}", weight, event, existing);
            return Err(EventError::WeightTaken {
                event: event.to_string(),
                weight,
                existing: existing.to_string(),
            });
        }

        Ok(())
    }

    /// Removes the listeners picked by the selector
    pub(super) fn unregister_listener(&mut self, selector: ListenerSelector) -> Result<bool, EventError> {
        match selector {
            ListenerSelector::All => {
                let removed = self.listener_count();
                self.events.clear();
                debug!("🧹 Cleared {} listeners", removed);
                Ok(true)
            }
            ListenerSelector::Weight { event, weight } => {
                self.remove_first_match(&event, |listener_weight, _| listener_weight == weight)
            }
            ListenerSelector::Callback { event, callback } => {
                self.remove_first_match(&event, |_, listener| *listener.callback() == callback)
            }
            ListenerSelector::Listener(target) => {
                self.remove_first_match(target.event(), |_, listener| *listener == target)
            }
        }
    }

    /// Removes the first listener of `event`, in weight order, matching the predicate.
    ///
    /// An event whose last listener goes is dropped from the registry.
    fn remove_first_match<F>(&mut self, event: &str, matches: F) -> Result<bool, EventError>
    where
        F: Fn(Weight, &Listener) -> bool,
    {
        let name = validate_event_name(event, "remove the listener")?;
        self.ensure_loaded(&name)?;

        let Some(listeners) = self.events.get_mut(&name) else {
            return Ok(false);
        };

        let Some(weight) = listeners
            .iter()
            .find(|(weight, listener)| matches(**weight, *listener))
            .map(|(weight, _)| *weight)
        else {
            return Ok(false);
        };

        if let Some(listener) = listeners.remove(&weight) {
            debug!("🗑️ Removed listener {}", listener);
        }

        if listeners.is_empty() {
            self.events.remove(&name);
        }

        Ok(true)
    }
}

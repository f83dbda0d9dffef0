//! Utility functions and helpers

use crate::error::EventError;
use compact_str::CompactString;

/// Validates an event name and converts it to the stored representation.
///
/// `context` describes the operation for the error message, e.g.
/// `"check the event listeners"`.
pub fn validate_event_name(name: &str, context: &str) -> Result<CompactString, EventError> {
    if name.is_empty() {
        return Err(EventError::InvalidEvent(format!(
            "Could not {}: provided event name is empty",
            context
        )));
    }

    Ok(CompactString::new(name))
}

/// Default weight tried first for listeners registered without one.
pub fn default_weight_for(max_listeners: u32) -> u32 {
    max_listeners / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_event_name() {
        assert_eq!(validate_event_name("event", "test").unwrap(), "event");

        let err = validate_event_name("", "check the event listeners").unwrap_err();
        assert!(matches!(err, EventError::InvalidEvent(_)));
        assert!(err.to_string().contains("check the event listeners"));
    }

    #[test]
    fn test_default_weight() {
        assert_eq!(default_weight_for(100), 50);
        assert_eq!(default_weight_for(3), 1);
        assert_eq!(default_weight_for(1), 0);
    }
}

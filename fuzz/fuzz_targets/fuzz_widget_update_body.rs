//! Fuzz target: JSON decoding and validation of `WidgetUpdate` bodies.
//!
//! Arbitrary bytes must never panic the decoder, and every decoded update
//! either validates into a widget for the target id or names a missing field.

#![no_main]

use chrono::Utc;
use libfuzzer_sys::fuzz_target;
use stack_core::{CoreError, WidgetId, WidgetUpdate};

fuzz_target!(|data: &[u8]| {
    let Ok(update) = serde_json::from_slice::<WidgetUpdate>(data) else {
        return;
    };
    match update.into_widget(WidgetId::new("target"), Utc::now()) {
        Ok(widget) => assert_eq!(widget.id.as_str(), "target", "stored id must be the target"),
        Err(CoreError::MissingAttribute { field }) => assert!(!field.is_empty()),
    }
});

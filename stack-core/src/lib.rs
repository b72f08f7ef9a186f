//! Core types for the widget stack service.
//!
//! Defines the domain vocabulary shared by the store and the HTTP gateway:
//! widget identifiers, stored widgets, creation and update payloads, and the
//! bounding-rectangle read filter.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod examples;
pub mod filter;
pub mod id;
pub mod widget;

pub use error::CoreError;
pub use filter::Filter;
pub use id::WidgetId;
pub use widget::{NewWidget, Widget, WidgetUpdate};

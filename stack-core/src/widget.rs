use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::id::WidgetId;

/// A rectangle placed on the canvas at a stacking index.
///
/// Widgets are owned by the store; everything handed out is a copy, so
/// mutating a returned `Widget` never affects stored state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Widget {
    /// Store-assigned identifier, immutable after creation.
    pub id: WidgetId,
    /// Horizontal position.
    pub x: i32,
    /// Vertical position.
    pub y: i32,
    /// Stacking index. Higher values draw on top.
    ///
    /// Wider than the `i32` a caller may request, so widgets pushed above
    /// `i32::MAX` by later inserts keep distinct indices.
    pub z: i64,
    /// Width in canvas units.
    pub width: u32,
    /// Height in canvas units.
    pub height: u32,
    /// Stamped by the store on every create and update.
    pub last_modified: DateTime<Utc>,
}

/// Creation request for a widget.
///
/// `z` is optional: without it the store places the widget above everything
/// it already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWidget {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub z: Option<i32>,
    pub width: u32,
    pub height: u32,
}

impl NewWidget {
    /// Creates a request without an explicit stacking index.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            z: None,
            width,
            height,
        }
    }

    /// Requests explicit placement at stacking index `z`.
    #[must_use]
    pub const fn with_z(mut self, z: i32) -> Self {
        self.z = Some(z);
        self
    }

    /// Materialises the request into a stored widget.
    #[must_use]
    pub fn into_widget(self, id: WidgetId, z: i64, now: DateTime<Utc>) -> Widget {
        Widget {
            id,
            x: self.x,
            y: self.y,
            z,
            width: self.width,
            height: self.height,
            last_modified: now,
        }
    }
}

/// Full replacement payload for an existing widget.
///
/// Every field is optional at the type level because callers send partial
/// bodies; [`WidgetUpdate::into_widget`] rejects any that is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetUpdate {
    #[serde(default)]
    pub id: Option<WidgetId>,
    #[serde(default)]
    pub x: Option<i32>,
    #[serde(default)]
    pub y: Option<i32>,
    #[serde(default)]
    pub z: Option<i64>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
}

impl WidgetUpdate {
    /// Validates presence of every field and builds the replacement widget.
    ///
    /// The stored id is always `target`; the id carried in the payload only has
    /// to be present. `last_modified` is restamped with `now`.
    ///
    /// # Errors
    /// Returns [`CoreError::MissingAttribute`] naming the first absent field.
    pub fn into_widget(self, target: WidgetId, now: DateTime<Utc>) -> Result<Widget, CoreError> {
        require(self.id.as_ref(), "id")?;
        let height = require(self.height, "height")?;
        let width = require(self.width, "width")?;
        require(self.last_modified, "lastModified")?;
        let x = require(self.x, "x")?;
        let y = require(self.y, "y")?;
        let z = require(self.z, "z")?;

        Ok(Widget {
            id: target,
            x,
            y,
            z,
            width,
            height,
            last_modified: now,
        })
    }
}

impl From<Widget> for WidgetUpdate {
    fn from(widget: Widget) -> Self {
        Self {
            id: Some(widget.id),
            x: Some(widget.x),
            y: Some(widget.y),
            z: Some(widget.z),
            width: Some(widget.width),
            height: Some(widget.height),
            last_modified: Some(widget.last_modified),
        }
    }
}

fn require<T>(value: Option<T>, field: &'static str) -> Result<T, CoreError> {
    value.ok_or(CoreError::MissingAttribute { field })
}

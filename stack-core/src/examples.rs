//! Example widget requests used by tests across the workspace.
//!
//! All three share `z = 1`, so creating them in order pushes the earlier ones
//! upward: the last created ends at `z = 1`, the first at `z = 3`.

use crate::widget::NewWidget;

/// Returns three overlapping 100x100 widgets that all ask for `z = 1`.
///
/// Against `Filter::new(0, 0, 100, 150)` the first two match and the third
/// (at `x = 100`) does not.
#[must_use]
pub fn example_widgets() -> [NewWidget; 3] {
    [
        NewWidget::new(50, 50, 100, 100).with_z(1),
        NewWidget::new(50, 100, 100, 100).with_z(1),
        NewWidget::new(100, 100, 100, 100).with_z(1),
    ]
}

use std::fmt;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::ui::core::geom::{Size, Spacing};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(CompactString);

        impl $name {
            pub fn new(value: impl Into<CompactString>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }
    };
}

string_id!(
    /// Unique id of a drop zone.
    DroppableId
);
string_id!(DraggableId);
string_id!(
    /// Only draggables and droppables of the same type interact.
    DragType
);
string_id!(
    /// Identifies one drag-and-drop root; every zone under it shares the id.
    ContextId
);

impl Default for DragType {
    fn default() -> Self {
        Self::new("DEFAULT")
    }
}

/// How a zone holds its items while one is dragged.
///
/// Zones are single lists laid out along a [`Direction`]; multi-directional
/// grids are not supported.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DroppableMode {
    /// Items stay inline; a placeholder reserves the dragged item's space.
    #[default]
    Standard,
    /// A virtualised list: the dragged item is rendered as a clone.
    Virtual,
}

/// Axis of a single-list zone. There is no grid variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementMode {
    /// Pointer driven.
    Fluid,
    /// Keyboard driven, moves in steps.
    Snap,
}

/// The part of a zone's configuration that identifies its registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppableDescriptor {
    pub id: DroppableId,
    pub drag_type: DragType,
    pub mode: DroppableMode,
}

/// Behavioural flags; changing them updates a registration in place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneConfig {
    pub direction: Direction,
    pub is_drop_disabled: bool,
    pub is_combine_enabled: bool,
    pub ignore_container_clipping: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraggableLocation {
    pub droppable_id: DroppableId,
    pub index: usize,
}

/// What the engine knows about the item being dragged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraggableRubric {
    pub draggable_id: DraggableId,
    pub drag_type: DragType,
    pub source: DraggableLocation,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppableStateSnapshot {
    pub is_dragging_over: bool,
    pub dragging_over_with: Option<DraggableId>,
    pub dragging_from_this_with: Option<DraggableId>,
    pub is_using_placeholder: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraggableStateSnapshot {
    pub is_dragging: bool,
    pub is_drop_animating: bool,
    pub is_clone: bool,
    pub dragging_over: Option<DroppableId>,
    pub combine_with: Option<DraggableId>,
    pub combine_target_for: Option<DraggableId>,
    pub mode: Option<MovementMode>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Display {
    #[default]
    Block,
    Flex,
    Inline,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoxModel {
    pub border_box: Size,
    pub margin: Spacing,
}

/// Space the engine asks a zone to reserve, usually the dragged item's box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placeholder {
    pub client: BoxModel,
    pub display: Display,
}

impl Placeholder {
    pub fn sized(border_box: Size) -> Self {
        Self {
            client: BoxModel {
                border_box,
                margin: Spacing::ZERO,
            },
            display: Display::Block,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dnd/types.rs"]
mod tests;

//! Values a zone shares with the components around it.

use std::fmt;
use std::rc::Rc;

use crate::ui::core::surface::SurfaceRef;

use super::types::{ContextId, DragType, DraggableId, DroppableId, Placeholder};

/// What every zone needs from the drag-and-drop root it lives under.
#[derive(Clone)]
pub struct AppContext {
    context_id: ContextId,
    is_movement_allowed: Rc<dyn Fn() -> bool>,
}

impl AppContext {
    pub fn new(context_id: ContextId, is_movement_allowed: impl Fn() -> bool + 'static) -> Self {
        Self {
            context_id,
            is_movement_allowed: Rc::new(is_movement_allowed),
        }
    }

    pub fn context_id(&self) -> &ContextId {
        &self.context_id
    }

    /// Whether items may currently move (a drag is live and not dropping).
    pub fn is_movement_allowed(&self) -> bool {
        (self.is_movement_allowed)()
    }
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("context_id", &self.context_id)
            .finish_non_exhaustive()
    }
}

/// Zone identity as seen by the draggables inside it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DroppableContext {
    pub droppable_id: DroppableId,
    pub drag_type: DragType,
    pub is_using_clone_for: Option<DraggableId>,
}

impl DroppableContext {
    pub fn is_clone_target(&self, draggable_id: &DraggableId) -> bool {
        self.is_using_clone_for.as_ref() == Some(draggable_id)
    }
}

/// What the zone's placeholder renderer needs.
#[derive(Clone)]
pub struct PlaceholderContext {
    pub on: Option<Placeholder>,
    pub should_animate: bool,
    pub inner_ref: SurfaceRef,
    pub on_transition_end: Rc<dyn Fn()>,
    pub context_id: ContextId,
}

impl fmt::Debug for PlaceholderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaceholderContext")
            .field("on", &self.on)
            .field("should_animate", &self.should_animate)
            .field("context_id", &self.context_id)
            .finish_non_exhaustive()
    }
}

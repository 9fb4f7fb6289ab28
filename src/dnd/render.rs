use std::rc::Rc;

use crate::ui::core::geom::Rect;
use crate::ui::core::painter::Painter;

use super::context::DroppableContext;
use super::draggable::DraggableProvided;
use super::droppable::DroppableProvided;
use super::types::{DraggableRubric, DraggableStateSnapshot, DroppableStateSnapshot};

/// Where a render callback draws, plus the zone it logically belongs to.
///
/// The zone travels with the context even when `painter` is an alternate
/// render target, so a clone drawn into a portal still sees its zone.
pub struct RenderCx<'a> {
    pub area: Rect,
    pub painter: &'a mut Painter,
    zone: Rc<DroppableContext>,
}

impl<'a> RenderCx<'a> {
    pub fn new(area: Rect, painter: &'a mut Painter, zone: Rc<DroppableContext>) -> Self {
        Self {
            area,
            painter,
            zone,
        }
    }

    pub fn zone(&self) -> &Rc<DroppableContext> {
        &self.zone
    }
}

/// The zone's content.
pub type Children = Rc<dyn Fn(&DroppableProvided, &DroppableStateSnapshot, &mut RenderCx<'_>)>;

/// Draws the floating copy of a dragged item.
pub type RenderClone =
    Rc<dyn Fn(&DraggableProvided, &DraggableStateSnapshot, &DraggableRubric, &mut RenderCx<'_>)>;

/// Builds [`Children`] from a closure.
pub fn children(
    f: impl Fn(&DroppableProvided, &DroppableStateSnapshot, &mut RenderCx<'_>) + 'static,
) -> Children {
    Rc::new(f)
}

/// Builds a [`RenderClone`] from a closure.
pub fn render_clone(
    f: impl Fn(&DraggableProvided, &DraggableStateSnapshot, &DraggableRubric, &mut RenderCx<'_>)
        + 'static,
) -> RenderClone {
    Rc::new(f)
}

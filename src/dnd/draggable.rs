//! The draggable side of a zone: the clone the zone renders itself, and the
//! view an ordinary draggable keeps of the zone it sits in.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use compact_str::CompactString;

use crate::ui::core::channel::{Channel, Subscription};

use super::context::DroppableContext;
use super::types::{ContextId, DraggableId, DraggableRubric};

pub const DRAGGABLE_CONTEXT_ID_ATTR: &str = "data-rbd-draggable-context-id";
pub const DRAGGABLE_ID_ATTR: &str = "data-rbd-draggable-id";
pub const DRAG_HANDLE_DRAGGABLE_ID_ATTR: &str = "data-rbd-drag-handle-draggable-id";
pub const DRAG_HANDLE_CONTEXT_ID_ATTR: &str = "data-rbd-drag-handle-context-id";

/// Attribute annotations keyed by stable names, for tooling and styling hooks.
pub type Attributes = BTreeMap<&'static str, CompactString>;

/// A draggable the library creates on its own behalf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateDraggable {
    pub draggable_id: DraggableId,
    pub index: usize,
    pub is_clone: bool,
    pub is_enabled: bool,
    pub should_respect_force_press: bool,
    pub can_drag_interactive_elements: bool,
}

impl PrivateDraggable {
    /// The visual echo of an item whose drag is already under way.
    ///
    /// Force press is irrelevant once the drag has started, and the clone may
    /// sit over interactive children without that blocking anything.
    pub fn clone_of(rubric: &DraggableRubric) -> Self {
        Self {
            draggable_id: rubric.draggable_id.clone(),
            index: rubric.source.index,
            is_clone: true,
            is_enabled: true,
            should_respect_force_press: false,
            can_drag_interactive_elements: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DraggableProvided {
    pub draggable_props: Attributes,
    /// `None` while the draggable is disabled.
    pub drag_handle_props: Option<Attributes>,
}

impl DraggableProvided {
    pub fn new(context_id: &ContextId, draggable: &PrivateDraggable) -> Self {
        let id = CompactString::from(draggable.draggable_id.as_str());
        let ctx = CompactString::from(context_id.as_str());
        let draggable_props = Attributes::from([
            (DRAGGABLE_CONTEXT_ID_ATTR, ctx.clone()),
            (DRAGGABLE_ID_ATTR, id.clone()),
        ]);
        let drag_handle_props = draggable.is_enabled.then(|| {
            Attributes::from([
                (DRAG_HANDLE_DRAGGABLE_ID_ATTR, id),
                (DRAG_HANDLE_CONTEXT_ID_ATTR, ctx),
            ])
        });
        Self {
            draggable_props,
            drag_handle_props,
        }
    }
}

/// A draggable's live view of its zone, fed by the zone's context channel.
pub struct DraggableView {
    draggable_id: DraggableId,
    zone: Rc<RefCell<Option<Rc<DroppableContext>>>>,
    notifications: Rc<Cell<u64>>,
    _subscription: Subscription,
}

impl DraggableView {
    pub fn attach(channel: &Channel<DroppableContext>, draggable_id: DraggableId) -> Self {
        let zone = Rc::new(RefCell::new(channel.current()));
        let notifications = Rc::new(Cell::new(0));
        let (slot, count) = (zone.clone(), notifications.clone());
        let subscription = channel.subscribe(move |ctx| {
            *slot.borrow_mut() = ctx.clone();
            count.set(count.get() + 1);
        });
        Self {
            draggable_id,
            zone,
            notifications,
            _subscription: subscription,
        }
    }

    pub fn draggable_id(&self) -> &DraggableId {
        &self.draggable_id
    }

    pub fn zone(&self) -> Option<Rc<DroppableContext>> {
        self.zone.borrow().clone()
    }

    /// The zone is drawing a clone of this item; the original should stay put.
    pub fn is_clone_target(&self) -> bool {
        self.zone
            .borrow()
            .as_ref()
            .is_some_and(|zone| zone.is_clone_target(&self.draggable_id))
    }

    /// How many zone-context changes this view has been woken for.
    pub fn notifications(&self) -> u64 {
        self.notifications.get()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dnd/draggable.rs"]
mod tests;

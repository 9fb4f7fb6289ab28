use super::*;
use crate::dnd::types::{DragType, DraggableLocation, DroppableId};

fn rubric(id: &str, index: usize) -> DraggableRubric {
    DraggableRubric {
        draggable_id: DraggableId::new(id),
        drag_type: DragType::new("TASK"),
        source: DraggableLocation {
            droppable_id: DroppableId::new("list-1"),
            index,
        },
    }
}

fn zone(clone_for: Option<&str>) -> Rc<DroppableContext> {
    Rc::new(DroppableContext {
        droppable_id: DroppableId::new("list-1"),
        drag_type: DragType::new("TASK"),
        is_using_clone_for: clone_for.map(DraggableId::new),
    })
}

#[test]
fn clone_keeps_identity_and_index() {
    let clone = PrivateDraggable::clone_of(&rubric("item-7", 3));
    assert_eq!(clone.draggable_id.as_str(), "item-7");
    assert_eq!(clone.index, 3);
    assert!(clone.is_clone && clone.is_enabled && clone.can_drag_interactive_elements);
    assert!(!clone.should_respect_force_press);
}

#[test]
fn provided_carries_attributes() {
    let clone = PrivateDraggable::clone_of(&rubric("item-7", 0));
    let provided = DraggableProvided::new(&ContextId::new("4"), &clone);
    assert_eq!(provided.draggable_props[DRAGGABLE_ID_ATTR], "item-7");
    assert_eq!(provided.draggable_props[DRAGGABLE_CONTEXT_ID_ATTR], "4");

    let handle = provided.drag_handle_props.unwrap();
    assert_eq!(handle[DRAG_HANDLE_DRAGGABLE_ID_ATTR], "item-7");

    let disabled = PrivateDraggable {
        is_enabled: false,
        ..clone
    };
    assert!(DraggableProvided::new(&ContextId::new("4"), &disabled)
        .drag_handle_props
        .is_none());
}

#[test]
fn view_tracks_which_item_is_cloned() {
    let channel = Channel::new();
    channel.publish(zone(None));

    let seven = DraggableView::attach(&channel, DraggableId::new("item-7"));
    let eight = DraggableView::attach(&channel, DraggableId::new("item-8"));
    assert!(!seven.is_clone_target());

    channel.publish(zone(Some("item-7")));
    assert!(seven.is_clone_target());
    assert!(!eight.is_clone_target());
    assert_eq!(seven.notifications(), 1);

    channel.retract();
    assert!(seven.zone().is_none());
    assert!(!seven.is_clone_target());
}

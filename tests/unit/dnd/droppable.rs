use super::*;
use crate::dnd::draggable::{DraggableView, DRAGGABLE_ID_ATTR};
use crate::dnd::placeholder::{PlaceholderPhase, TransitionProperty};
use crate::dnd::registry::InMemoryRegistry;
use crate::dnd::render::render_clone;
use crate::dnd::types::DraggableLocation;
use crate::dnd::viewport::ContentViewport;
use crate::ui::core::geom::{Pos, Size};
use crate::ui::core::painter::PaintCmd;
use crate::ui::core::style::Style;

const AREA: Rect = Rect {
    x: 0,
    y: 0,
    w: 20,
    h: 8,
};

struct Host {
    registry: Rc<InMemoryRegistry>,
    viewport: Rc<ContentViewport>,
    movement: Rc<Cell<bool>>,
    updates: Rc<RefCell<Vec<MaxScrollUpdate>>>,
}

impl Host {
    fn new() -> Self {
        Self {
            registry: Rc::new(InMemoryRegistry::new()),
            viewport: Rc::new(ContentViewport::new(Size::new(20, 30), Size::new(20, 8))),
            movement: Rc::new(Cell::new(true)),
            updates: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn app(&self, context_id: &str) -> AppContext {
        let movement = self.movement.clone();
        AppContext::new(ContextId::new(context_id), move || movement.get())
    }

    fn deps(&self) -> DroppableDeps {
        DroppableDeps {
            app: Some(self.app("ctx-0")),
            registry: Some(self.registry.clone() as Rc<dyn DroppableRegistry>),
            viewport: Some(self.viewport.clone() as Rc<dyn Viewport>),
            settings: DndSettings::default(),
        }
    }

    fn droppable(&self) -> Droppable {
        Droppable::new(self.deps()).unwrap()
    }

    /// A zone that mounts its root and renders its placeholder under one card.
    fn props(&self, id: &str) -> DroppableProps {
        let mut props = DroppableProps::new(id, |provided, _, cx| {
            provided.inner_ref(Some(cx.area));
            cx.painter.text(cx.area.origin(), "card", Style::default());
            provided
                .placeholder()
                .paint(cx.painter, Pos::new(cx.area.x, cx.area.y + 1));
        });
        let updates = self.updates.clone();
        props.update_viewport_max_scroll = Rc::new(move |update| updates.borrow_mut().push(update));
        props
    }
}

fn frame() -> Frame {
    Frame::new(Rect::new(0, 0, 40, 10))
}

fn card() -> Placeholder {
    Placeholder::sized(Size::new(20, 2))
}

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

fn clone_drawing_its_id() -> RenderClone {
    render_clone(|provided, snapshot, rubric, cx| {
        assert!(snapshot.is_clone);
        let id = &provided.draggable_props[DRAGGABLE_ID_ATTR];
        assert_eq!(id.as_str(), rubric.draggable_id.as_str());
        cx.painter.text(cx.area.origin(), id.as_str(), Style::default());
    })
}

#[test]
fn zone_attributes_carry_its_id_and_context() {
    let host = Host::new();
    let mut drop = host.droppable();
    let mut props = host.props("list-1");
    props.drag_type = DragType::new("TASK");

    let mut frame = frame();
    let rendered = drop.render(&props, &mut frame, AREA).unwrap();

    let attrs: Vec<(&str, &str)> = rendered
        .provided
        .droppable_props
        .iter()
        .map(|(k, v)| (*k, v.as_str()))
        .collect();
    assert_eq!(
        attrs,
        vec![
            (DROPPABLE_CONTEXT_ID_ATTR, "ctx-0"),
            (DROPPABLE_ID_ATTR, "list-1"),
        ]
    );
    assert!(rendered.clone.is_none());
    assert_eq!(frame.portals().count(), 0);
    assert!(rendered.warnings.is_empty());
    assert_eq!(drop.root_surface().map(|s| s.rect), Some(AREA));
}

#[test]
fn registers_on_render_and_unregisters_on_unmount() {
    let host = Host::new();
    let mut drop = host.droppable();
    let props = host.props("list-1");
    drop.render(&props, &mut frame(), AREA).unwrap();

    let id = DroppableId::new("list-1");
    assert!(host.registry.exists(&id));
    assert_eq!(host.registry.dimension(&id).map(|d| d.rect), Some(AREA));

    drop.unmount();
    drop.unmount();
    assert!(host.registry.is_empty());
    assert!(drop.registration().is_none());
    assert!(drop.root_surface().is_none());
    assert_eq!(
        drop.render(&props, &mut frame(), AREA).unwrap_err(),
        DroppableError::Unmounted
    );
}

#[test]
fn dropping_the_zone_unregisters_it() {
    let host = Host::new();
    let mut drop = host.droppable();
    drop.render(&host.props("list-1"), &mut frame(), AREA).unwrap();
    assert_eq!(host.registry.len(), 1);

    std::mem::drop(drop);
    assert!(host.registry.is_empty());
}

#[test]
fn config_change_updates_registration_and_id_change_replaces_it() {
    let host = Host::new();
    let mut drop = host.droppable();
    let mut props = host.props("list-1");
    drop.render(&props, &mut frame(), AREA).unwrap();
    let first = drop.registration().unwrap().unique_id;

    props.is_drop_disabled = true;
    drop.render(&props, &mut frame(), AREA).unwrap();
    let entry = drop.registration().unwrap();
    assert_eq!(entry.unique_id, first);
    assert!(host.registry.get_by_id(&DroppableId::new("list-1")).unwrap().config.is_drop_disabled);

    props.droppable_id = DroppableId::new("list-2");
    drop.render(&props, &mut frame(), AREA).unwrap();
    assert_ne!(drop.registration().unwrap().unique_id, first);
    assert!(!host.registry.exists(&DroppableId::new("list-1")));
    assert!(host.registry.exists(&DroppableId::new("list-2")));
}

#[test]
fn clone_is_drawn_into_the_requested_mount_point() {
    let host = Host::new();
    let mut drop = host.droppable();
    let mount = MountPoint::named("clones");
    let mut props = host.props("list-1");
    props.use_clone = Some(UseClone {
        dragging: rubric("task-7", 3),
        snapshot: DraggableStateSnapshot {
            is_dragging: true,
            ..Default::default()
        },
        render: clone_drawing_its_id(),
    });
    props.get_container_for_clone = Some(Rc::new(move || mount));

    let mut frame = frame();
    let rendered = drop.render(&props, &mut frame, AREA).unwrap();

    let clone = rendered.clone.unwrap();
    assert_eq!(clone.mount, mount);
    assert_eq!(clone.draggable.draggable_id, DraggableId::new("task-7"));
    assert_eq!(clone.draggable.index, 3);
    assert!(clone.draggable.is_clone);
    assert!(!clone.draggable.should_respect_force_press);
    assert!(clone.draggable.can_drag_interactive_elements);

    let portal = frame.portal(mount).unwrap();
    assert!(portal
        .cmds()
        .iter()
        .any(|cmd| matches!(cmd, PaintCmd::Text { text, .. } if text == "task-7")));
    assert!(!frame
        .root()
        .cmds()
        .iter()
        .any(|cmd| matches!(cmd, PaintCmd::Text { text, .. } if text == "task-7")));
    assert_eq!(
        rendered.zone.is_using_clone_for,
        Some(DraggableId::new("task-7"))
    );
}

#[test]
fn clone_without_container_is_fatal_and_poisons_the_zone() {
    let host = Host::new();
    let mut drop = host.droppable();
    let mut props = host.props("list-1");
    props.use_clone = Some(UseClone {
        dragging: rubric("task-7", 0),
        snapshot: DraggableStateSnapshot::default(),
        render: clone_drawing_its_id(),
    });

    let err = drop.render(&props, &mut frame(), AREA).unwrap_err();
    assert!(matches!(err, DroppableError::MissingCloneContainer { .. }));

    props.use_clone = None;
    assert_eq!(drop.render(&props, &mut frame(), AREA).unwrap_err(), err);
}

#[test]
fn missing_app_context_is_fatal() {
    let host = Host::new();
    let deps = DroppableDeps {
        app: None,
        ..host.deps()
    };
    assert_eq!(
        Droppable::new(deps).err(),
        Some(DroppableError::MissingAppContext)
    );

    let deps = DroppableDeps {
        registry: None,
        ..host.deps()
    };
    assert_eq!(
        Droppable::new(deps).err(),
        Some(DroppableError::MissingCollaborator("registry"))
    );
}

#[test]
fn unmounted_root_surface_is_fatal() {
    let host = Host::new();
    let mut drop = host.droppable();
    let props = DroppableProps::new("list-1", |_, _, _| {});

    let err = drop.render(&props, &mut frame(), AREA).unwrap_err();
    assert_eq!(
        err,
        DroppableError::MissingRootSurface {
            droppable_id: DroppableId::new("list-1")
        }
    );
    assert!(host.registry.is_empty());
    assert!(drop.registration().is_none());

    // Later renders refuse too, even with a well-formed tree, and stay unregistered.
    assert_eq!(
        drop.render(&host.props("list-1"), &mut frame(), AREA).unwrap_err(),
        err
    );
    assert!(host.registry.is_empty());
}

#[test]
fn virtual_zone_requires_clone_renderer() {
    let host = Host::new();
    let mut drop = host.droppable();
    let mut props = DroppableProps::new("rows", |provided, _, cx| {
        provided.inner_ref(Some(cx.area));
    });
    props.mode = DroppableMode::Virtual;

    assert_eq!(
        drop.render(&props, &mut frame(), AREA).unwrap_err(),
        DroppableError::MissingCloneRenderer {
            droppable_id: DroppableId::new("rows")
        }
    );

    let mut drop = host.droppable();
    props.render_clone = Some(clone_drawing_its_id());
    assert!(drop.render(&props, &mut frame(), AREA).is_ok());
}

#[test]
fn unrendered_placeholder_is_a_warning() {
    let host = Host::new();
    let mut drop = host.droppable();
    let mut props = DroppableProps::new("list-1", |provided, _, cx| {
        provided.inner_ref(Some(cx.area));
    });
    props.placeholder = Some(card());

    let rendered = drop.render(&props, &mut frame(), AREA).unwrap();
    assert_eq!(
        rendered.warnings,
        vec![SetupWarning::PlaceholderNotFound {
            droppable_id: DroppableId::new("list-1")
        }]
    );

    let mut quiet = Droppable::new(DroppableDeps {
        settings: DndSettings {
            setup_warnings: false,
            ..DndSettings::default()
        },
        ..host.deps()
    })
    .unwrap();
    assert!(quiet.render(&props, &mut frame(), AREA).unwrap().warnings.is_empty());
}

#[test]
fn placeholder_without_animation_never_updates_the_viewport() {
    let host = Host::new();
    let mut drop = host.droppable();
    let mut props = host.props("list-1");

    props.placeholder = Some(card());
    drop.render(&props, &mut frame(), AREA).unwrap();
    assert_eq!(drop.placeholder().phase(), PlaceholderPhase::Present);
    assert_eq!(
        drop.placeholder_surface().map(|s| s.rect),
        Some(Rect::new(0, 1, 20, 2))
    );

    props.placeholder = None;
    drop.render(&props, &mut frame(), AREA).unwrap();
    assert_eq!(drop.placeholder().phase(), PlaceholderPhase::Absent);
    assert!(drop.placeholder_surface().is_none());

    assert_eq!(drop.placeholder().commits(), 2);
    assert!(host.updates.borrow().is_empty());
}

#[test]
fn each_settled_animation_updates_the_viewport_once() {
    let host = Host::new();
    let mut drop = host.droppable();
    let mut props = host.props("list-1");
    props.should_animate_placeholder = true;

    props.placeholder = Some(card());
    drop.render(&props, &mut frame(), AREA).unwrap();
    assert_eq!(drop.placeholder().phase(), PlaceholderPhase::Requested);
    drop.placeholder().frame();
    drop.placeholder().transition_end(TransitionProperty::Height);
    assert_eq!(host.updates.borrow().len(), 1);

    props.placeholder = None;
    drop.render(&props, &mut frame(), AREA).unwrap();
    assert_eq!(drop.placeholder().phase(), PlaceholderPhase::AnimatingOut);
    drop.placeholder().transition_end(TransitionProperty::Height);
    assert_eq!(drop.placeholder().phase(), PlaceholderPhase::Absent);

    let updates = host.updates.borrow();
    assert_eq!(updates.len(), 2);
    assert!(updates
        .iter()
        .all(|u| u.max_scroll == Pos::new(0, 22)));
}

#[test]
fn settled_animation_while_movement_is_blocked_is_ignored() {
    let host = Host::new();
    host.movement.set(false);
    let mut drop = host.droppable();
    let mut props = host.props("list-1");
    props.should_animate_placeholder = true;

    props.placeholder = Some(card());
    drop.render(&props, &mut frame(), AREA).unwrap();
    drop.placeholder().frame();
    drop.placeholder().transition_end(TransitionProperty::Height);

    props.placeholder = None;
    drop.render(&props, &mut frame(), AREA).unwrap();
    drop.placeholder().transition_end(TransitionProperty::Height);

    assert_eq!(drop.placeholder().completions(), 2);
    assert!(host.updates.borrow().is_empty());
}

#[test]
fn reduce_motion_turns_animation_off() {
    let host = Host::new();
    let mut drop = Droppable::new(DroppableDeps {
        settings: DndSettings {
            reduce_motion: true,
            ..DndSettings::default()
        },
        ..host.deps()
    })
    .unwrap();
    let mut props = host.props("list-1");
    props.should_animate_placeholder = true;
    props.placeholder = Some(card());

    drop.render(&props, &mut frame(), AREA).unwrap();
    assert_eq!(drop.placeholder().phase(), PlaceholderPhase::Present);
    assert!(!drop.placeholder().style().unwrap().animated);
}

#[test]
fn zone_context_is_stable_across_snapshot_changes() {
    let host = Host::new();
    let mut drop = host.droppable();
    let mut props = host.props("list-1");
    let view = DraggableView::attach(drop.zone_channel(), DraggableId::new("task-1"));

    let a = drop.render(&props, &mut frame(), AREA).unwrap();
    assert_eq!(view.notifications(), 1);

    props.snapshot = DroppableStateSnapshot {
        is_dragging_over: true,
        dragging_over_with: Some(DraggableId::new("task-1")),
        ..Default::default()
    };
    let b = drop.render(&props, &mut frame(), AREA).unwrap();
    assert!(Rc::ptr_eq(&a.zone, &b.zone));
    assert!(Rc::ptr_eq(&a.provided, &b.provided));
    assert_eq!(view.notifications(), 1);

    props.droppable_id = DroppableId::new("list-2");
    let c = drop.render(&props, &mut frame(), AREA).unwrap();
    assert!(!Rc::ptr_eq(&b.zone, &c.zone));
    assert_eq!(c.provided.droppable_props[DROPPABLE_ID_ATTR], "list-2");
    assert_eq!(view.notifications(), 2);
    assert_eq!(view.zone().unwrap().droppable_id, DroppableId::new("list-2"));
}

#[test]
fn new_app_context_changes_the_attributes() {
    let host = Host::new();
    let mut drop = host.droppable();
    let props = host.props("list-1");
    let a = drop.render(&props, &mut frame(), AREA).unwrap();

    drop.set_app_context(host.app("ctx-1"));
    let b = drop.render(&props, &mut frame(), AREA).unwrap();

    assert!(!Rc::ptr_eq(&a.provided, &b.provided));
    assert_eq!(b.provided.droppable_props[DROPPABLE_CONTEXT_ID_ATTR], "ctx-1");
    assert_eq!(drop.context_id(), ContextId::new("ctx-1"));
}

#[test]
fn clone_target_is_known_to_the_zone_draggables() {
    let host = Host::new();
    let mut drop = host.droppable();
    let dragged = DraggableView::attach(drop.zone_channel(), DraggableId::new("task-7"));
    let other = DraggableView::attach(drop.zone_channel(), DraggableId::new("task-8"));

    let mut props = host.props("list-1");
    props.use_clone = Some(UseClone {
        dragging: rubric("task-7", 0),
        snapshot: DraggableStateSnapshot::default(),
        render: clone_drawing_its_id(),
    });
    props.get_container_for_clone = Some(Rc::new(|| MountPoint::named("clones")));
    drop.render(&props, &mut frame(), AREA).unwrap();

    assert!(dragged.is_clone_target());
    assert!(!other.is_clone_target());

    drop.unmount();
    assert!(dragged.zone().is_none());
}

#[test]
fn unmount_mid_animation_abandons_it_quietly() {
    let host = Host::new();
    let mut drop = host.droppable();
    let mut props = host.props("list-1");
    props.should_animate_placeholder = true;
    props.placeholder = Some(card());
    drop.render(&props, &mut frame(), AREA).unwrap();
    drop.placeholder().frame();
    assert_eq!(drop.placeholder().phase(), PlaceholderPhase::AnimatingIn);

    let view = drop.placeholder().clone();
    drop.unmount();
    view.transition_end(TransitionProperty::Height);

    assert_eq!(view.phase(), PlaceholderPhase::Absent);
    assert_eq!(view.completions(), 0);
    assert!(host.updates.borrow().is_empty());
}

#[test]
fn clone_is_always_rendered_as_dragging() {
    let host = Host::new();
    let mut drop = host.droppable();
    let seen = Rc::new(Cell::new(None));
    let record = seen.clone();
    let mut props = host.props("list-1");
    props.use_clone = Some(UseClone {
        dragging: rubric("task-7", 0),
        snapshot: DraggableStateSnapshot::default(),
        render: render_clone(move |_, snapshot, _, _| {
            record.set(Some((snapshot.is_dragging, snapshot.is_clone)));
        }),
    });
    props.get_container_for_clone = Some(Rc::new(|| MountPoint::named("clones")));

    drop.render(&props, &mut frame(), AREA).unwrap();
    assert_eq!(seen.get(), Some((true, true)));
}

#[test]
fn turning_animation_off_mid_entry_never_updates_the_viewport() {
    let host = Host::new();
    let mut drop = host.droppable();
    let mut props = host.props("list-1");
    props.should_animate_placeholder = true;
    props.placeholder = Some(card());
    drop.render(&props, &mut frame(), AREA).unwrap();
    drop.placeholder().frame();

    props.should_animate_placeholder = false;
    drop.render(&props, &mut frame(), AREA).unwrap();
    assert_eq!(drop.placeholder().phase(), PlaceholderPhase::Present);
    drop.placeholder().transition_end(TransitionProperty::Height);

    assert_eq!(drop.placeholder().completions(), 0);
    assert!(host.updates.borrow().is_empty());
}

//! A drop zone.
//!
//! [`Droppable`] subscribes one zone to the drag engine and turns the
//! engine's view of that zone into output:
//!
//! - keeps the zone registered with the engine's [`DroppableRegistry`] as its
//!   configuration changes, handing the engine a reader for its geometry;
//! - publishes the placeholder request on a channel its [`PlaceholderView`]
//!   follows, and asks the host to recompute max scroll when a placeholder
//!   animation settles while items may move;
//! - publishes the zone's identity to its draggables;
//! - draws the dragged item's clone into an alternate render target when the
//!   engine drags this zone's item in clone mode;
//! - validates its setup after every render.
//!
//! Dependencies come in through [`DroppableDeps`]; nothing is looked up
//! ambiently.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use compact_str::CompactString;

use crate::ui::core::channel::Channel;
use crate::ui::core::frame::{Frame, MountPoint};
use crate::ui::core::geom::Rect;
use crate::ui::core::id::{Id, IdPath};
use crate::ui::core::memo::Memo;
use crate::ui::core::surface::{Surface, SurfaceRef};

use super::context::{AppContext, DroppableContext, PlaceholderContext};
use super::draggable::{Attributes, DraggableProvided, PrivateDraggable};
use super::error::{DroppableError, Result, SetupWarning};
use super::placeholder::PlaceholderView;
use super::publisher::DroppablePublisher;
use super::registry::{DroppableEntry, DroppableRegistry};
use super::render::{Children, RenderClone, RenderCx};
use super::settings::DndSettings;
use super::types::{
    ContextId, DragType, DraggableId, DraggableRubric, DraggableStateSnapshot, Direction,
    DroppableDescriptor, DroppableId, DroppableMode, DroppableStateSnapshot, Placeholder,
    ZoneConfig,
};
use super::validation::{validate, ValidationInput};
use super::viewport::{MaxScrollUpdate, UpdateViewportMaxScroll, Viewport};

pub const DROPPABLE_ID_ATTR: &str = "data-rbd-droppable-id";
pub const DROPPABLE_CONTEXT_ID_ATTR: &str = "data-rbd-droppable-context-id";

pub type GetContainerForClone = Rc<dyn Fn() -> MountPoint>;

/// Present while the engine drags this zone's item in clone mode.
#[derive(Clone)]
pub struct UseClone {
    pub dragging: DraggableRubric,
    /// Live snapshot of the drag, as the engine sees it.
    pub snapshot: DraggableStateSnapshot,
    pub render: RenderClone,
}

impl fmt::Debug for UseClone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UseClone")
            .field("dragging", &self.dragging)
            .field("snapshot", &self.snapshot)
            .finish_non_exhaustive()
    }
}

/// Everything a zone is rendered from: the caller's own options plus what
/// the engine currently says about the zone.
#[derive(Clone)]
pub struct DroppableProps {
    pub droppable_id: DroppableId,
    pub drag_type: DragType,
    pub mode: DroppableMode,
    pub direction: Direction,
    pub ignore_container_clipping: bool,
    pub is_drop_disabled: bool,
    pub is_combine_enabled: bool,
    pub snapshot: DroppableStateSnapshot,
    pub placeholder: Option<Placeholder>,
    pub should_animate_placeholder: bool,
    pub use_clone: Option<UseClone>,
    pub render_clone: Option<RenderClone>,
    pub update_viewport_max_scroll: UpdateViewportMaxScroll,
    pub get_container_for_clone: Option<GetContainerForClone>,
    pub children: Children,
}

impl DroppableProps {
    pub fn new(
        droppable_id: impl Into<DroppableId>,
        children: impl Fn(&DroppableProvided, &DroppableStateSnapshot, &mut RenderCx<'_>) + 'static,
    ) -> Self {
        Self {
            droppable_id: droppable_id.into(),
            drag_type: DragType::default(),
            mode: DroppableMode::Standard,
            direction: Direction::Vertical,
            ignore_container_clipping: false,
            is_drop_disabled: false,
            is_combine_enabled: false,
            snapshot: DroppableStateSnapshot::default(),
            placeholder: None,
            should_animate_placeholder: false,
            use_clone: None,
            render_clone: None,
            update_viewport_max_scroll: Rc::new(|_| {}),
            get_container_for_clone: None,
            children: Rc::new(children),
        }
    }

    pub fn descriptor(&self) -> DroppableDescriptor {
        DroppableDescriptor {
            id: self.droppable_id.clone(),
            drag_type: self.drag_type.clone(),
            mode: self.mode,
        }
    }

    pub fn config(&self) -> ZoneConfig {
        ZoneConfig {
            direction: self.direction,
            is_drop_disabled: self.is_drop_disabled,
            is_combine_enabled: self.is_combine_enabled,
            ignore_container_clipping: self.ignore_container_clipping,
        }
    }
}

impl fmt::Debug for DroppableProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DroppableProps")
            .field("droppable_id", &self.droppable_id)
            .field("drag_type", &self.drag_type)
            .field("mode", &self.mode)
            .field("config", &self.config())
            .field("placeholder", &self.placeholder)
            .field("use_clone", &self.use_clone)
            .finish_non_exhaustive()
    }
}

/// Handed to the zone's children on every render.
#[derive(Debug)]
pub struct DroppableProvided {
    root: SurfaceRef,
    root_id: Id,
    placeholder: Rc<PlaceholderView>,
    pub droppable_props: Attributes,
}

impl DroppableProvided {
    /// Root ref setter: records where the zone's surface is, or that it is gone.
    pub fn inner_ref(&self, rect: Option<Rect>) {
        self.root.set(rect.map(|rect| Surface {
            id: self.root_id,
            rect,
        }));
    }

    pub fn placeholder(&self) -> &PlaceholderView {
        &self.placeholder
    }
}

#[derive(Default)]
pub struct DroppableDeps {
    pub app: Option<AppContext>,
    pub registry: Option<Rc<dyn DroppableRegistry>>,
    pub viewport: Option<Rc<dyn Viewport>>,
    pub settings: DndSettings,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedClone {
    pub draggable: PrivateDraggable,
    pub mount: MountPoint,
}

#[derive(Debug)]
pub struct Rendered {
    pub provided: Rc<DroppableProvided>,
    pub zone: Rc<DroppableContext>,
    pub clone: Option<RenderedClone>,
    pub warnings: Vec<SetupWarning>,
}

/// Forwards settled placeholder animations to the host's max-scroll update.
struct ViewportSync {
    app: RefCell<AppContext>,
    viewport: Rc<dyn Viewport>,
    update: RefCell<Option<UpdateViewportMaxScroll>>,
}

impl ViewportSync {
    fn on_placeholder_transition_end(&self) {
        // A placeholder change can change how far the viewport can scroll.
        if !self.app.borrow().is_movement_allowed() {
            tracing::debug!("movement not allowed; max scroll left alone");
            return;
        }
        let Some(update) = self.update.borrow().clone() else {
            return;
        };
        let max_scroll = self.viewport.max_scroll();
        tracing::debug!(?max_scroll, "update viewport max scroll");
        update(MaxScrollUpdate { max_scroll });
    }
}

type PlaceholderKey = (Option<Placeholder>, bool, ContextId);
type ProvidedKey = (ContextId, DroppableId);
type ZoneKey = (DroppableId, DragType, Option<DraggableId>);

pub struct Droppable {
    settings: DndSettings,
    viewport_sync: Rc<ViewportSync>,
    on_transition_end: Rc<dyn Fn()>,
    root: SurfaceRef,
    root_id: Id,
    placeholder_ref: SurfaceRef,
    publisher: DroppablePublisher,
    placeholder_channel: Channel<PlaceholderContext>,
    zone_channel: Channel<DroppableContext>,
    placeholder_view: Rc<PlaceholderView>,
    placeholder_memo: Memo<PlaceholderKey, Rc<PlaceholderContext>>,
    provided_memo: Memo<ProvidedKey, Rc<DroppableProvided>>,
    zone_memo: Memo<ZoneKey, Rc<DroppableContext>>,
    poisoned: Option<DroppableError>,
    unmounted: bool,
}

impl Droppable {
    pub fn new(deps: DroppableDeps) -> Result<Self> {
        let app = deps.app.ok_or(DroppableError::MissingAppContext)?;
        let registry = deps
            .registry
            .ok_or(DroppableError::MissingCollaborator("registry"))?;
        let viewport = deps
            .viewport
            .ok_or(DroppableError::MissingCollaborator("viewport"))?;

        let instance = IdPath::root("droppable").push_u64(next_instance());
        let root = SurfaceRef::new();
        let placeholder_ref = SurfaceRef::new();
        let placeholder_channel = Channel::new();
        let placeholder_view = Rc::new(PlaceholderView::attach(
            &placeholder_channel,
            instance.push_str("placeholder").finish(),
        ));

        let viewport_sync = Rc::new(ViewportSync {
            app: RefCell::new(app),
            viewport,
            update: RefCell::new(None),
        });
        let weak: Weak<ViewportSync> = Rc::downgrade(&viewport_sync);
        // Outlives the zone inside in-flight animations; a torn-down zone ignores it.
        let on_transition_end: Rc<dyn Fn()> = Rc::new(move || {
            if let Some(sync) = weak.upgrade() {
                sync.on_placeholder_transition_end();
            }
        });

        Ok(Self {
            settings: deps.settings,
            viewport_sync,
            on_transition_end,
            publisher: DroppablePublisher::new(registry, root.reader()),
            root,
            root_id: instance.push_str("root").finish(),
            placeholder_ref,
            placeholder_channel,
            zone_channel: Channel::new(),
            placeholder_view,
            placeholder_memo: Memo::new(),
            provided_memo: Memo::new(),
            zone_memo: Memo::new(),
            poisoned: None,
            unmounted: false,
        })
    }

    pub fn context_id(&self) -> ContextId {
        self.viewport_sync.app.borrow().context_id().clone()
    }

    /// The drag-and-drop root above the zone changed.
    pub fn set_app_context(&mut self, app: AppContext) {
        *self.viewport_sync.app.borrow_mut() = app;
    }

    pub fn placeholder(&self) -> &Rc<PlaceholderView> {
        &self.placeholder_view
    }

    /// Channel the zone's draggables follow.
    pub fn zone_channel(&self) -> &Channel<DroppableContext> {
        &self.zone_channel
    }

    pub fn registration(&self) -> Option<&DroppableEntry> {
        self.publisher.entry()
    }

    pub fn root_surface(&self) -> Option<Surface> {
        self.root.get()
    }

    pub fn placeholder_surface(&self) -> Option<Surface> {
        self.placeholder_ref.get()
    }

    /// Renders the zone's children into `frame` within `area`.
    ///
    /// A returned error is fatal: the zone refuses every later render.
    pub fn render(&mut self, props: &DroppableProps, frame: &mut Frame, area: Rect) -> Result<Rendered> {
        if self.unmounted {
            return Err(DroppableError::Unmounted);
        }
        if let Some(e) = &self.poisoned {
            return Err(e.clone());
        }
        let result = self.render_inner(props, frame, area);
        if let Err(e) = &result {
            // The engine must not keep reading a zone that failed its checks.
            self.publisher.unpublish();
            self.poisoned = Some(e.clone());
        }
        result
    }

    fn render_inner(&mut self, props: &DroppableProps, frame: &mut Frame, area: Rect) -> Result<Rendered> {
        let context_id = self.context_id();
        *self.viewport_sync.update.borrow_mut() = Some(props.update_viewport_max_scroll.clone());

        self.publisher.publish(props.descriptor(), props.config());

        let should_animate = props.should_animate_placeholder && !self.settings.reduce_motion;
        let placeholder_key = (props.placeholder, should_animate, context_id.clone());
        let (inner_ref, on_transition_end) =
            (self.placeholder_ref.clone(), self.on_transition_end.clone());
        let placeholder_ctx = self.placeholder_memo.get(placeholder_key, |(on, animate, ctx)| {
            Rc::new(PlaceholderContext {
                on: *on,
                should_animate: *animate,
                inner_ref,
                on_transition_end,
                context_id: ctx.clone(),
            })
        });
        self.placeholder_channel.publish(placeholder_ctx);

        let provided_key = (context_id.clone(), props.droppable_id.clone());
        let (root, root_id, placeholder) =
            (self.root.clone(), self.root_id, self.placeholder_view.clone());
        let provided = self.provided_memo.get(provided_key, |(ctx, id)| {
            Rc::new(DroppableProvided {
                root,
                root_id,
                placeholder,
                droppable_props: Attributes::from([
                    (DROPPABLE_ID_ATTR, CompactString::from(id.as_str())),
                    (DROPPABLE_CONTEXT_ID_ATTR, CompactString::from(ctx.as_str())),
                ]),
            })
        });

        let is_using_clone_for = props
            .use_clone
            .as_ref()
            .map(|c| c.dragging.draggable_id.clone());
        let zone_key = (props.droppable_id.clone(), props.drag_type.clone(), is_using_clone_for);
        let zone = self.zone_memo.get(zone_key, |(droppable_id, drag_type, clone_for)| {
            Rc::new(DroppableContext {
                droppable_id: droppable_id.clone(),
                drag_type: drag_type.clone(),
                is_using_clone_for: clone_for.clone(),
            })
        });
        self.zone_channel.publish(zone.clone());

        {
            let mut cx = RenderCx::new(area, frame.root_mut(), zone.clone());
            (props.children)(&provided, &props.snapshot, &mut cx);
        }

        let clone = self.render_clone(props, &context_id, &zone, frame)?;

        let root = self.root.reader();
        let placeholder = self.placeholder_ref.reader();
        let warnings = validate(
            &ValidationInput {
                droppable_id: &props.droppable_id,
                mode: props.mode,
                has_clone_renderer: props.render_clone.is_some(),
                placeholder_committed: props.placeholder.is_some()
                    && self.placeholder_view.style().is_some(),
                root: &root,
                placeholder: &placeholder,
            },
            self.settings.setup_warnings,
        )?;

        Ok(Rendered {
            provided,
            zone,
            clone,
            warnings,
        })
    }

    fn render_clone(
        &self,
        props: &DroppableProps,
        context_id: &ContextId,
        zone: &Rc<DroppableContext>,
        frame: &mut Frame,
    ) -> Result<Option<RenderedClone>> {
        let Some(use_clone) = &props.use_clone else {
            return Ok(None);
        };
        let container = props.get_container_for_clone.as_ref().ok_or_else(|| {
            DroppableError::MissingCloneContainer {
                droppable_id: props.droppable_id.clone(),
            }
        })?;
        let mount = container();

        let draggable = PrivateDraggable::clone_of(&use_clone.dragging);
        let provided = DraggableProvided::new(context_id, &draggable);
        // The clone only exists while its item is being dragged.
        let snapshot = DraggableStateSnapshot {
            is_dragging: true,
            is_clone: true,
            ..use_clone.snapshot.clone()
        };

        let area = frame.area();
        let mut cx = RenderCx::new(area, frame.portal_mut(mount), zone.clone());
        (use_clone.render)(&provided, &snapshot, &use_clone.dragging, &mut cx);
        tracing::trace!(draggable_id = %draggable.draggable_id, mount = %mount.id(), "clone rendered");

        Ok(Some(RenderedClone { draggable, mount }))
    }

    /// Tears the zone down: unregisters, withdraws its channels, forgets its
    /// surfaces. Idempotent.
    pub fn unmount(&mut self) {
        if self.unmounted {
            return;
        }
        self.unmounted = true;
        self.publisher.unpublish();
        self.zone_channel.retract();
        self.placeholder_channel.retract();
        *self.viewport_sync.update.borrow_mut() = None;
        self.root.set(None);
        self.placeholder_ref.set(None);
        self.placeholder_memo.reset();
        self.provided_memo.reset();
        self.zone_memo.reset();
        tracing::debug!("droppable unmounted");
    }
}

impl Drop for Droppable {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn next_instance() -> u64 {
    thread_local! {
        static NEXT: Cell<u64> = const { Cell::new(0) };
    }
    NEXT.with(|next| {
        let id = next.get();
        next.set(id + 1);
        id
    })
}

#[cfg(test)]
#[path = "../../tests/unit/dnd/droppable.rs"]
mod tests;

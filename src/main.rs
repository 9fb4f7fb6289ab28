//! Scripted drag session against one zone, drawn with the headless backend.

use std::cell::{Cell, RefCell};
use std::error::Error;
use std::rc::Rc;

use zdnd::dnd::placeholder::TransitionProperty;
use zdnd::dnd::render::render_clone;
use zdnd::dnd::settings::settings_path;
use zdnd::dnd::types::{DraggableLocation, DraggableStateSnapshot, MovementMode};
use zdnd::dnd::{
    AppContext, ContentViewport, ContextId, DndSettings, DragType, DraggableId, DraggableRubric,
    Droppable, DroppableDeps, DroppableProps, DroppableRegistry, InMemoryRegistry, MaxScrollUpdate,
    Placeholder, UseClone, Viewport,
};
use zdnd::ui::backend::test::TestBackend;
use zdnd::ui::backend::Backend;
use zdnd::ui::core::frame::{Frame, MountPoint};
use zdnd::ui::core::geom::{Pos, Rect, Size};
use zdnd::ui::core::painter::BorderKind;
use zdnd::ui::core::style::{Color, Style};

mod logging;

const CARDS: [&str; 4] = ["write tests", "review diff", "ship it", "celebrate"];
const WIDTH: u16 = 48;
const HEIGHT: u16 = 10;

fn zone_props(dragging: Option<usize>, updates: Rc<RefCell<Vec<MaxScrollUpdate>>>) -> DroppableProps {
    let mut props = DroppableProps::new("todo", |provided, snapshot, cx| {
        provided.inner_ref(Some(cx.area));
        let border = if snapshot.is_dragging_over {
            Style::default().fg(Color::Indexed(3))
        } else {
            Style::default()
        };
        cx.painter.border(cx.area, border, BorderKind::Plain);

        let x = cx.area.x + 1;
        for (i, card) in CARDS.iter().enumerate() {
            let mut style = Style::default();
            if cx.zone().is_clone_target(&DraggableId::new(format!("card-{i}"))) {
                style = style.dim();
            }
            cx.painter.text_clipped(
                Pos::new(x, cx.area.y + 1 + i as u16),
                format!("{}. {card}", i + 1),
                style,
                cx.area,
            );
        }
        let below = Pos::new(x, cx.area.y + 1 + CARDS.len() as u16);
        if let Some(occupied) = provided.placeholder().paint(cx.painter, below) {
            tracing::debug!(?occupied, "placeholder painted");
        }
    });
    props.drag_type = DragType::new("TASK");
    props.should_animate_placeholder = true;
    props.update_viewport_max_scroll = Rc::new(move |update| updates.borrow_mut().push(update));
    props.get_container_for_clone = Some(Rc::new(|| MountPoint::named("clones")));

    if let Some(index) = dragging {
        props.snapshot.is_dragging_over = true;
        props.snapshot.is_using_placeholder = true;
        props.placeholder = Some(Placeholder::sized(Size::new(20, 1)));
        props.use_clone = Some(UseClone {
            dragging: DraggableRubric {
                draggable_id: DraggableId::new(format!("card-{index}")),
                drag_type: DragType::new("TASK"),
                source: DraggableLocation {
                    droppable_id: props.droppable_id.clone(),
                    index,
                },
            },
            snapshot: DraggableStateSnapshot {
                is_dragging: true,
                mode: Some(MovementMode::Fluid),
                ..Default::default()
            },
            render: render_clone(|_, snapshot, rubric, cx| {
                let rect = Rect::new(cx.area.right().saturating_sub(20), 3, 18, 3);
                let style = if snapshot.is_clone {
                    Style::default().bold()
                } else {
                    Style::default()
                };
                cx.painter.border(rect, style, BorderKind::Dashed);
                let label = CARDS.get(rubric.source.index).copied().unwrap_or("?");
                cx.painter
                    .text_clipped(Pos::new(rect.x + 1, rect.y + 1), label, style, rect);
            }),
        });
    }
    props
}

fn show(step: &str, droppable: &mut Droppable, props: &DroppableProps) -> Result<(), Box<dyn Error>> {
    let area = Rect::new(0, 0, WIDTH, HEIGHT);
    let mut frame = Frame::new(area);
    let rendered = droppable.render(props, &mut frame, Rect::new(0, 0, 26, HEIGHT))?;
    for warning in &rendered.warnings {
        println!("warning: {warning}");
    }

    let mut backend = TestBackend::new(WIDTH, HEIGHT);
    backend.draw(&frame);
    println!(
        "== {step} (placeholder: {:?}, reserved: {:?})",
        droppable.placeholder().phase(),
        backend.reserved()
    );
    for line in backend.lines() {
        println!("{line}");
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let settings = DndSettings::load_or_default(settings_path().as_deref());
    let _logging = logging::init(&settings);

    let registry = Rc::new(InMemoryRegistry::new());
    let _events = registry.subscribe(|event| tracing::info!(?event, "registry"));
    let viewport = Rc::new(ContentViewport::new(
        Size::new(WIDTH, 24),
        Size::new(WIDTH, HEIGHT),
    ));
    let dragging = Rc::new(Cell::new(false));
    let movement = dragging.clone();
    let updates = Rc::new(RefCell::new(Vec::new()));

    let mut droppable = Droppable::new(DroppableDeps {
        app: Some(AppContext::new(ContextId::new("0"), move || movement.get())),
        registry: Some(registry.clone() as Rc<dyn DroppableRegistry>),
        viewport: Some(viewport.clone() as Rc<dyn Viewport>),
        settings,
    })?;

    show("idle", &mut droppable, &zone_props(None, updates.clone()))?;

    dragging.set(true);
    let props = zone_props(Some(1), updates.clone());
    show("drag start", &mut droppable, &props)?;
    droppable.placeholder().frame();
    droppable.placeholder().transition_end(TransitionProperty::Height);
    show("placeholder open", &mut droppable, &props)?;

    let props = zone_props(None, updates.clone());
    show("dropping", &mut droppable, &props)?;
    droppable.placeholder().transition_end(TransitionProperty::Height);
    dragging.set(false);
    show("dropped", &mut droppable, &props)?;

    for update in updates.borrow().iter() {
        println!("max scroll update: {:?}", update.max_scroll);
    }
    println!("registered zones: {}", registry.len());
    droppable.unmount();
    println!("registered zones after unmount: {}", registry.len());
    Ok(())
}

//! Drop zones for a retained UI.
//!
//! The engine that tracks drags lives elsewhere; this module is the adapter
//! between it and one zone of the UI tree. Start at [`Droppable`].

pub mod context;
pub mod draggable;
pub mod droppable;
pub mod error;
pub mod placeholder;
pub mod publisher;
pub mod registry;
pub mod render;
pub mod settings;
pub mod types;
pub mod validation;
pub mod viewport;

pub use context::{AppContext, DroppableContext, PlaceholderContext};
pub use draggable::{DraggableProvided, DraggableView, PrivateDraggable};
pub use droppable::{
    Droppable, DroppableDeps, DroppableProps, DroppableProvided, Rendered, RenderedClone, UseClone,
};
pub use error::{DroppableError, SetupWarning};
pub use placeholder::{PlaceholderPhase, PlaceholderView, TransitionProperty};
pub use registry::{DroppableRegistry, InMemoryRegistry, RegistryEvent};
pub use render::RenderCx;
pub use settings::DndSettings;
pub use types::{
    ContextId, DragType, DraggableId, DraggableRubric, DroppableId, DroppableMode, Placeholder,
};
pub use viewport::{ContentViewport, MaxScrollUpdate, Viewport};

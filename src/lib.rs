//! zdnd - drop zones for terminal UIs
//!
//! Modules:
//! - ui: paint primitives, frames with alternate render targets, channels, backends
//! - dnd: the droppable adapter and what it talks to (registry, viewport, placeholder)

pub mod dnd;
pub mod ui;

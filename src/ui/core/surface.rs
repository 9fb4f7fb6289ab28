//! Handles to rendered surfaces.
//!
//! A [`SurfaceRef`] is the writable slot a component fills when its surface
//! mounts and clears when it unmounts. Everything else (the drag engine,
//! validation) only ever sees a [`SurfaceReader`].

use std::cell::Cell;
use std::rc::Rc;

use super::geom::Rect;
use super::id::Id;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Surface {
    pub id: Id,
    pub rect: Rect,
}

#[derive(Clone, Debug, Default)]
pub struct SurfaceRef {
    slot: Rc<Cell<Option<Surface>>>,
}

impl SurfaceRef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the slot changed.
    pub fn set(&self, surface: Option<Surface>) -> bool {
        self.slot.replace(surface) != surface
    }

    pub fn get(&self) -> Option<Surface> {
        self.slot.get()
    }

    pub fn reader(&self) -> SurfaceReader {
        SurfaceReader {
            slot: self.slot.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SurfaceReader {
    slot: Rc<Cell<Option<Surface>>>,
}

impl SurfaceReader {
    pub fn get(&self) -> Option<Surface> {
        self.slot.get()
    }

    pub fn rect(&self) -> Option<Rect> {
        self.slot.get().map(|s| s.rect)
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/surface.rs"]
mod tests;

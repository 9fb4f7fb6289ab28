//! Rendering backends.
//!
//! The drag-and-drop layer only produces [`Frame`]s; a backend turns them
//! into something visible.

use crate::ui::core::frame::Frame;

pub trait Backend {
    /// Draws the root painter first, then every portal on top of it.
    /// Portals are clipped to the frame area only, never to a zone.
    fn draw(&mut self, frame: &Frame);
}

use std::cell::Cell;
use std::rc::Rc;

use crate::ui::core::geom::{Pos, Size};

/// Answers how far the scroll container around all zones can scroll.
pub trait Viewport {
    fn max_scroll(&self) -> Pos;
}

/// Payload handed to `update_viewport_max_scroll`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaxScrollUpdate {
    pub max_scroll: Pos,
}

pub type UpdateViewportMaxScroll = Rc<dyn Fn(MaxScrollUpdate)>;

/// A scroll container whose content size is tracked by the host.
#[derive(Debug, Default)]
pub struct ContentViewport {
    content: Cell<Size>,
    viewport: Cell<Size>,
}

impl ContentViewport {
    pub fn new(content: Size, viewport: Size) -> Self {
        Self {
            content: Cell::new(content),
            viewport: Cell::new(viewport),
        }
    }

    pub fn set_content(&self, content: Size) {
        self.content.set(content);
    }

    pub fn set_viewport(&self, viewport: Size) {
        self.viewport.set(viewport);
    }
}

impl Viewport for ContentViewport {
    fn max_scroll(&self) -> Pos {
        let (content, viewport) = (self.content.get(), self.viewport.get());
        Pos::new(
            content.w.saturating_sub(viewport.w),
            content.h.saturating_sub(viewport.h),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dnd/viewport.rs"]
mod tests;

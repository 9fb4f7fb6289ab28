//! One rendered frame: the inline tree plus any alternate render targets.
//!
//! An alternate target (a "mount point") is where a subtree is drawn when it
//! must not share the clipping/scrolling context of its logical parent, for
//! example a floating drag clone.

use super::geom::Rect;
use super::id::{Id, IdPath};
use super::painter::Painter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MountPoint(Id);

impl MountPoint {
    pub fn named(name: &str) -> Self {
        Self(IdPath::root("mount").push_str(name).finish())
    }

    pub fn id(self) -> Id {
        self.0
    }
}

#[derive(Debug)]
pub struct Frame {
    area: Rect,
    root: Painter,
    // First-mounted first; portals draw in this order on top of the root.
    portals: Vec<(MountPoint, Painter)>,
}

impl Frame {
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            root: Painter::new(),
            portals: Vec::new(),
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn root(&self) -> &Painter {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Painter {
        &mut self.root
    }

    pub fn portal(&self, at: MountPoint) -> Option<&Painter> {
        self.portals
            .iter()
            .find(|(mount, _)| *mount == at)
            .map(|(_, painter)| painter)
    }

    pub fn portal_mut(&mut self, at: MountPoint) -> &mut Painter {
        let idx = match self.portals.iter().position(|(mount, _)| *mount == at) {
            Some(idx) => idx,
            None => {
                self.portals.push((at, Painter::new()));
                self.portals.len() - 1
            }
        };
        &mut self.portals[idx].1
    }

    pub fn portals(&self) -> impl Iterator<Item = (MountPoint, &Painter)> + '_ {
        self.portals.iter().map(|(mount, painter)| (*mount, painter))
    }

    /// Starts the next frame, keeping the area.
    pub fn clear(&mut self) {
        self.root.clear();
        self.portals.clear();
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/frame.rs"]
mod tests;

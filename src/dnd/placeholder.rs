//! The zone's placeholder: a spacer that reserves the dragged item's space.
//!
//! The view follows the zone's placeholder channel and runs this machine:
//!
//! ```text
//! Absent -> Requested -> AnimatingIn -> Present -> AnimatingOut -> Absent
//!    \________________ (no animation) __/  \______ (no animation) ___/
//! ```
//!
//! `Requested` is the first committed frame of an animated entry: the spacer
//! is mounted collapsed and grows on the next host frame ([`PlaceholderView::frame`]).
//! Growing or shrinking under animation is a height transition that the host
//! reports back through [`PlaceholderView::transition_end`]; each report is one
//! completion, which is forwarded to the zone.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ui::core::channel::{Channel, Subscription};
use crate::ui::core::geom::{Pos, Rect, Size, Spacing};
use crate::ui::core::id::Id;
use crate::ui::core::painter::Painter;
use crate::ui::core::surface::Surface;

use super::context::PlaceholderContext;
use super::types::{Display, Placeholder};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Animate {
    None,
    Open,
    Close,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaceholderPhase {
    Absent,
    Requested,
    AnimatingIn,
    Present,
    AnimatingOut,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionProperty {
    Height,
    Width,
    Margin,
    Opacity,
}

/// What the spacer looks like in the committed output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaceholderStyle {
    pub display: Display,
    pub size: Size,
    pub margin: Spacing,
    /// A height transition is attached.
    pub animated: bool,
}

/// Keeps a closing placeholder visible until its exit animation is done.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct AnimateInOut {
    is_visible: bool,
    data: Option<Placeholder>,
    animate: Animate,
}

impl AnimateInOut {
    const HIDDEN: Self = Self {
        is_visible: false,
        data: None,
        animate: Animate::None,
    };

    fn derive(self, on: Option<Placeholder>, should_animate: bool) -> Self {
        if !should_animate {
            return Self {
                is_visible: on.is_some(),
                data: on,
                animate: Animate::None,
            };
        }
        if on.is_some() {
            return Self {
                is_visible: true,
                data: on,
                animate: Animate::Open,
            };
        }
        if self.is_visible {
            return Self {
                is_visible: true,
                data: self.data,
                animate: Animate::Close,
            };
        }
        Self {
            is_visible: false,
            data: None,
            animate: Animate::Close,
        }
    }

    fn close(&mut self) -> bool {
        if self.animate != Animate::Close || !self.is_visible {
            return false;
        }
        self.is_visible = false;
        true
    }
}

struct ViewState {
    context: Option<Rc<PlaceholderContext>>,
    animate: AnimateInOut,
    // Animated entry mounts collapsed and grows one frame later.
    collapsed_on_mount: bool,
    in_flight: bool,
    rendered: Option<PlaceholderStyle>,
    commits: u64,
    completions: u64,
}

impl ViewState {
    fn new() -> Self {
        Self {
            context: None,
            animate: AnimateInOut::HIDDEN,
            collapsed_on_mount: false,
            in_flight: false,
            rendered: None,
            commits: 0,
            completions: 0,
        }
    }

    fn receive(&mut self, context: Option<Rc<PlaceholderContext>>) {
        let (on, should_animate) = match &context {
            Some(ctx) => (ctx.on, ctx.should_animate),
            None => (None, false),
        };
        if context.is_none() {
            self.release_ref();
        }
        self.context = context;

        let was_visible = self.animate.is_visible;
        self.animate = self.animate.derive(on, should_animate);
        if !was_visible && self.animate.is_visible {
            self.collapsed_on_mount = self.animate.animate == Animate::Open;
        }
        if self.animate.animate != Animate::Open {
            self.collapsed_on_mount = false;
        }
        self.commit();

        // Closing something that never grew has nothing to animate.
        if self.animate.animate == Animate::Close
            && !self.in_flight
            && self.rendered.is_some_and(|s| s.size == Size::ZERO)
            && self.animate.close()
        {
            self.commit();
        }
    }

    fn style(&self) -> Option<PlaceholderStyle> {
        if !self.animate.is_visible {
            return None;
        }
        let placeholder = self.animate.data.unwrap_or_default();
        let collapsed = self.collapsed_on_mount || self.animate.animate == Animate::Close;
        let (size, margin) = if collapsed {
            (Size::ZERO, Spacing::ZERO)
        } else {
            (placeholder.client.border_box, placeholder.client.margin)
        };
        Some(PlaceholderStyle {
            display: placeholder.display,
            size,
            margin,
            animated: self.animate.animate != Animate::None,
        })
    }

    fn commit(&mut self) {
        let next = self.style();
        if next == self.rendered {
            return;
        }
        match (self.rendered, next) {
            (Some(prev), Some(cur)) if cur.animated && prev.size != cur.size => {
                self.in_flight = true;
            }
            (_, None) => {
                self.in_flight = false;
                self.release_ref();
            }
            // Animation switched off mid-flight: nothing is left to complete.
            (_, Some(cur)) if !cur.animated => {
                self.in_flight = false;
            }
            _ => {}
        }
        self.rendered = next;
        self.commits += 1;
        tracing::debug!(phase = ?self.phase(), commits = self.commits, "placeholder commit");
    }

    fn release_ref(&self) {
        if let Some(ctx) = &self.context {
            ctx.inner_ref.set(None);
        }
    }

    fn phase(&self) -> PlaceholderPhase {
        if !self.animate.is_visible {
            return PlaceholderPhase::Absent;
        }
        match self.animate.animate {
            Animate::None => PlaceholderPhase::Present,
            Animate::Open if self.collapsed_on_mount => PlaceholderPhase::Requested,
            Animate::Open if self.in_flight => PlaceholderPhase::AnimatingIn,
            Animate::Open => PlaceholderPhase::Present,
            Animate::Close => PlaceholderPhase::AnimatingOut,
        }
    }
}

/// Renders a zone's placeholder from its placeholder channel.
pub struct PlaceholderView {
    state: Rc<RefCell<ViewState>>,
    surface_id: Id,
    _subscription: Subscription,
}

impl PlaceholderView {
    pub fn attach(channel: &Channel<PlaceholderContext>, surface_id: Id) -> Self {
        let state = Rc::new(RefCell::new(ViewState::new()));
        if let Some(ctx) = channel.current() {
            state.borrow_mut().receive(Some(ctx));
        }
        let weak = Rc::downgrade(&state);
        let subscription = channel.subscribe(move |ctx| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().receive(ctx.clone());
            }
        });
        Self {
            state,
            surface_id,
            _subscription: subscription,
        }
    }

    pub fn phase(&self) -> PlaceholderPhase {
        self.state.borrow().phase()
    }

    pub fn style(&self) -> Option<PlaceholderStyle> {
        self.state.borrow().rendered
    }

    /// Number of times the committed output changed.
    pub fn commits(&self) -> u64 {
        self.state.borrow().commits
    }

    /// Number of animations that ran to completion.
    pub fn completions(&self) -> u64 {
        self.state.borrow().completions
    }

    /// The host's next animation frame: a collapsed animated entry starts growing.
    pub fn frame(&self) {
        let mut state = self.state.borrow_mut();
        if state.collapsed_on_mount {
            state.collapsed_on_mount = false;
            state.commit();
        }
    }

    /// The host finished a transition on the spacer.
    ///
    /// Only height transitions count; everything else is ignored.
    pub fn transition_end(&self, property: TransitionProperty) {
        if property != TransitionProperty::Height {
            return;
        }
        let callback = {
            let mut state = self.state.borrow_mut();
            if !state.in_flight {
                return;
            }
            state.in_flight = false;
            state.completions += 1;
            state.context.as_ref().map(|ctx| ctx.on_transition_end.clone())
        };
        // The zone may re-render from inside the callback.
        if let Some(on_transition_end) = callback {
            on_transition_end();
        }

        let mut state = self.state.borrow_mut();
        if state.animate.close() {
            state.commit();
        } else {
            tracing::debug!(phase = ?state.phase(), "placeholder settled");
        }
    }

    /// Paints the spacer at `origin` and records its surface.
    ///
    /// Returns the margin box the spacer occupies, for the caller's layout.
    pub fn paint(&self, painter: &mut Painter, origin: Pos) -> Option<Rect> {
        let state = self.state.borrow();
        let style = state.rendered?;
        let border_box = Rect::at(
            Pos::new(
                origin.x.saturating_add(style.margin.left),
                origin.y.saturating_add(style.margin.top),
            ),
            style.size,
        );
        painter.spacer(self.surface_id, border_box);
        if let Some(ctx) = &state.context {
            ctx.inner_ref.set(Some(Surface {
                id: self.surface_id,
                rect: border_box,
            }));
        }
        Some(border_box.outset(style.margin))
    }
}

impl Drop for PlaceholderView {
    fn drop(&mut self) {
        if let Ok(state) = self.state.try_borrow() {
            state.release_ref();
        }
    }
}

impl std::fmt::Debug for PlaceholderView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceholderView")
            .field("surface_id", &self.surface_id)
            .field("phase", &self.phase())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dnd/placeholder.rs"]
mod tests;

//! Placement geometry: viewport clamping and edge snapping.
//!
//! All functions here are pure and total over `f64`. Degenerate inputs
//! (zero-size boxes, a viewport smaller than the element) produce ordinary
//! numbers rather than errors.
//!
//! ## Snap policy
//!
//! The search keeps a *single* closest candidate across both axes. Plain
//! elements are visited first, then containers; within each element the
//! order is left, right, top, bottom. A candidate replaces the current best
//! only when strictly closer, so the earliest one wins a tie. The winning
//! candidate overrides exactly one coordinate; the other axis keeps its
//! clamped value even if it had an in-threshold match of its own.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use crate::geom::{Point, Rect, Viewport};

/// Which coordinate a snap overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Edge of the dragged box that matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    #[must_use]
    pub fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::X,
            Self::Top | Self::Bottom => Axis::Y,
        }
    }
}

/// How the dragged box relates to the matched box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapKind {
    /// Butt up against the outside of another element (left to its right, ...).
    Abut,
    /// Align flush with the same edge of a container.
    Inset,
}

/// A winning snap candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snap {
    pub edge: Edge,
    pub kind: SnapKind,
    /// New value of the overridden coordinate (box left for X, top for Y).
    pub value: f64,
    /// Distance between the matched edges before snapping.
    pub distance: f64,
}

impl Snap {
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.edge.axis()
    }

    /// `position` with this snap's coordinate replaced.
    #[must_use]
    pub fn apply(&self, position: Point) -> Point {
        match self.axis() {
            Axis::X => Point::new(self.value, position.y),
            Axis::Y => Point::new(position.x, self.value),
        }
    }
}

/// Clamp one coordinate into `[padding, extent - size - padding]`.
///
/// When the range is empty the lower bound wins, so an element larger than the
/// viewport is pinned at `padding` instead of panicking like `f64::clamp`.
#[must_use]
pub fn clamp_axis(value: f64, size: f64, extent: f64, padding: f64) -> f64 {
    let max = extent - size - padding;
    value.min(max).max(padding)
}

/// Clamp a candidate top-left so a `width` x `height` box stays inside the viewport.
#[must_use]
pub fn clamp_to_viewport(candidate: Point, width: f64, height: f64, viewport: &Viewport, padding: f64) -> Point {
    Point::new(
        clamp_axis(candidate.x, width, viewport.width, padding),
        clamp_axis(candidate.y, height, viewport.height, padding),
    )
}

/// Running best candidate for one search.
struct Search {
    threshold: f64,
    best: Option<Snap>,
}

impl Search {
    fn offer(&mut self, edge: Edge, kind: SnapKind, distance: f64, value: f64) {
        if distance.is_nan() || distance >= self.threshold {
            return;
        }
        if self.best.is_some_and(|b| distance >= b.distance) {
            return;
        }
        self.best = Some(Snap { edge, kind, value, distance });
    }
}

/// Find the single closest snap for a box of size `width` x `height` at `position`.
///
/// `elements` contribute outside (abutting) matches and `containers` inside
/// (flush) matches. Returns `None` when no edge pair is strictly closer than
/// `threshold`.
#[must_use]
pub fn find_snap(
    position: Point,
    width: f64,
    height: f64,
    elements: &[Rect],
    containers: &[Rect],
    threshold: f64,
) -> Option<Snap> {
    let left = position.x;
    let right = position.x + width;
    let top = position.y;
    let bottom = position.y + height;

    let mut search = Search { threshold, best: None };

    for other in elements {
        search.offer(Edge::Left, SnapKind::Abut, (left - other.right()).abs(), other.right());
        search.offer(Edge::Right, SnapKind::Abut, (right - other.left).abs(), other.left - width);
        search.offer(Edge::Top, SnapKind::Abut, (top - other.bottom()).abs(), other.bottom());
        search.offer(Edge::Bottom, SnapKind::Abut, (bottom - other.top).abs(), other.top - height);
    }

    for c in containers {
        search.offer(Edge::Left, SnapKind::Inset, (left - c.left).abs(), c.left);
        search.offer(Edge::Right, SnapKind::Inset, (right - c.right()).abs(), c.right() - width);
        search.offer(Edge::Top, SnapKind::Inset, (top - c.top).abs(), c.top);
        search.offer(Edge::Bottom, SnapKind::Inset, (bottom - c.bottom()).abs(), c.bottom() - height);
    }

    search.best
}

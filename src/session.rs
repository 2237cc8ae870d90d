//! One drag, from press to release.
//!
//! A `DragSession` is created on press with everything it needs frozen: the
//! target's box, the pointer offset, and the geometry of every other element.
//! Per-move placement is a pure function of that frozen state, the pointer,
//! the current viewport, and the *live* restricted zones.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::config::DragConfig;
use crate::geom::{Point, Rect, Viewport};
use crate::page::{ElementId, ElementKey, ElementSnapshot};
use crate::snap::{Snap, clamp_to_viewport, find_snap};
use crate::zone;

/// Where an open session is in its lifecycle. `Idle` is the absence of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// Pressed, no move seen yet.
    Armed,
    /// At least one move has been placed.
    Tracking,
}

/// Result of placing the target for one pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Top-left after the first clamp, before snapping.
    pub clamped: Point,
    /// The closest snap found, if any. The final clamp may pull `position`
    /// back from it near the viewport edge.
    pub snap: Option<Snap>,
    /// Final top-left to apply.
    pub position: Point,
    /// The final box's center lies in a restricted zone.
    pub forbidden: bool,
}

#[derive(Debug, Clone)]
pub struct DragSession {
    target: ElementKey,
    target_id: ElementId,
    origin: Rect,
    offset: Point,
    position: Point,
    phase: DragPhase,
    forbidden: bool,
    elements: Vec<Rect>,
    containers: Vec<Rect>,
}

impl DragSession {
    /// Freeze the geometry for a new drag of `target` grabbed at `pointer`.
    ///
    /// `page` may include the target itself and elements already mid-drag;
    /// both are excluded from the snapshot.
    #[must_use]
    pub fn start(target: &ElementSnapshot, pointer: Point, page: &[ElementSnapshot], config: &DragConfig) -> Self {
        let others: Vec<&ElementSnapshot> = page
            .iter()
            .filter(|el| el.key != target.key && !el.dragging)
            .collect();
        let containers = others
            .iter()
            .filter(|el| el.is_container(config))
            .map(|el| el.rect)
            .collect();
        let elements = others.iter().map(|el| el.rect).collect();

        Self {
            target: target.key,
            target_id: target.id.clone(),
            origin: target.rect,
            offset: pointer.offset_from(target.rect.origin()),
            position: target.rect.origin(),
            phase: DragPhase::Armed,
            forbidden: false,
            elements,
            containers,
        }
    }

    #[must_use]
    pub fn target(&self) -> ElementKey {
        self.target
    }

    /// The target's DOM id, for logs and errors.
    #[must_use]
    pub fn target_id(&self) -> &ElementId {
        &self.target_id
    }

    /// The target's box at press time. Width and height never change.
    #[must_use]
    pub fn origin(&self) -> Rect {
        self.origin
    }

    /// Pointer position minus the box's top-left at press time.
    #[must_use]
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Last applied top-left.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Whether the last placement was flagged as inside a restricted zone.
    #[must_use]
    pub fn forbidden(&self) -> bool {
        self.forbidden
    }

    /// Frozen boxes of every other element.
    #[must_use]
    pub fn elements(&self) -> &[Rect] {
        &self.elements
    }

    /// Frozen boxes of the container subset.
    #[must_use]
    pub fn containers(&self) -> &[Rect] {
        &self.containers
    }

    /// The target's box at the last applied position.
    #[must_use]
    pub fn current_rect(&self) -> Rect {
        self.origin.at(self.position)
    }

    /// Compute the placement for `pointer` without changing the session.
    #[must_use]
    pub fn place(&self, pointer: Point, viewport: &Viewport, zones: &[Rect], config: &DragConfig) -> Placement {
        let candidate = pointer.offset_from(self.offset);
        let (width, height) = (self.origin.width, self.origin.height);
        let clamped = clamp_to_viewport(candidate, width, height, viewport, config.viewport_padding);
        let snap = find_snap(clamped, width, height, &self.elements, &self.containers, config.snap_threshold);
        // A container edge can sit inside the padding band, so the snapped
        // position is clamped again.
        let position = snap.map_or(clamped, |s| {
            clamp_to_viewport(s.apply(clamped), width, height, viewport, config.viewport_padding)
        });
        let forbidden = zone::center_in_any(&self.origin.at(position), zones);
        Placement { clamped, snap, position, forbidden }
    }

    /// Record `placement` as applied.
    pub fn commit(&mut self, placement: &Placement) {
        self.position = placement.position;
        self.forbidden = placement.forbidden;
        self.phase = DragPhase::Tracking;
    }
}

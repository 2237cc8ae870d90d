use crate::config::DragConfig;
use crate::error::DragError;
use crate::geom::{Point, Rect, Viewport};
use crate::page::{ElementKey, ElementSnapshot};
use crate::session::{DragPhase, DragSession};
use crate::zone;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Class markers the engine toggles. The host maps them to configured names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Hover,
    Dragging,
    Floating,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Released outside every restricted zone; the position stands.
    Accepted,
    /// Released inside a restricted zone; moved back to the press-time position.
    Reverted,
    /// Ended by the cancel transition; moved back to the press-time position.
    Cancelled,
}

/// Document mutations returned from engine handlers for the host to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Switch to absolute positioning pinned at `rect`, zero margin, raised stacking order.
    Float { key: ElementKey, rect: Rect, z_index: i32 },
    /// Move the element to be a direct child of the document body.
    Reparent { key: ElementKey },
    SetMarker { key: ElementKey, marker: Marker, on: bool },
    /// Set inline left/top.
    MoveTo { key: ElementKey, position: Point },
    /// Show or clear the restricted-zone outline.
    SetForbidden { key: ElementKey, on: bool },
    /// The session is over; the host detaches its document listeners.
    SessionEnded { key: ElementKey, outcome: DropOutcome },
}

/// Core engine state: the drag state machine with no browser dependencies.
///
/// Separated from the DOM host so it can be tested natively.
pub struct EngineCore {
    pub config: DragConfig,
    session: Option<DragSession>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(DragConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: DragConfig) -> Self {
        Self { config, session: None }
    }

    // --- Queries ---

    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// `None` when idle.
    #[must_use]
    pub fn phase(&self) -> Option<DragPhase> {
        self.session.as_ref().map(DragSession::phase)
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn is_target(&self, key: ElementKey) -> bool {
        self.session.as_ref().is_some_and(|s| s.target() == key)
    }

    // --- Hover ---

    /// Highlight `key` unless it is being dragged.
    #[must_use]
    pub fn hover_enter(&self, key: ElementKey, dragging: bool) -> Vec<Action> {
        if dragging || self.is_target(key) {
            return Vec::new();
        }
        vec![Action::SetMarker { key, marker: Marker::Hover, on: true }]
    }

    #[must_use]
    pub fn hover_leave(&self, key: ElementKey) -> Vec<Action> {
        vec![Action::SetMarker { key, marker: Marker::Hover, on: false }]
    }

    // --- Session lifecycle ---

    /// Start dragging `target`, grabbed at page-space `pointer`.
    ///
    /// `page` is every instrumented element as measured now; the target and any
    /// element already dragging are left out of the snapshot.
    ///
    /// # Errors
    ///
    /// Returns `SessionActive` if a session is already open. The open session
    /// is left untouched.
    pub fn press(&mut self, target: &ElementSnapshot, pointer: Point, page: &[ElementSnapshot]) -> Result<Vec<Action>, DragError> {
        if let Some(active) = &self.session {
            return Err(DragError::SessionActive { target: active.target_id().clone() });
        }

        let session = DragSession::start(target, pointer, page, &self.config);
        let key = target.key;

        let mut actions = vec![Action::Float { key, rect: target.rect, z_index: self.config.z_index }];
        if !target.floating {
            actions.push(Action::Reparent { key });
            actions.push(Action::SetMarker { key, marker: Marker::Floating, on: true });
        }
        actions.push(Action::SetMarker { key, marker: Marker::Hover, on: false });
        actions.push(Action::SetMarker { key, marker: Marker::Dragging, on: true });

        log::debug!(
            "drag start: {} ({key}) at ({}, {}), {} elements, {} containers",
            target.id,
            target.rect.left,
            target.rect.top,
            session.elements().len(),
            session.containers().len()
        );
        self.session = Some(session);
        Ok(actions)
    }

    /// Place the target for a pointer move. No-op when idle.
    ///
    /// `zones` must be measured fresh for this call.
    pub fn pointer_move(&mut self, pointer: Point, viewport: &Viewport, zones: &[Rect]) -> Vec<Action> {
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };

        let placement = session.place(pointer, viewport, zones, &self.config);
        if let Some(snap) = placement.snap {
            log::trace!("snap {:?}/{:?} by {:.1}px", snap.edge, snap.kind, snap.distance);
        }

        let key = session.target();
        let mut actions = Vec::with_capacity(2);
        if placement.forbidden != session.forbidden() {
            actions.push(Action::SetForbidden { key, on: placement.forbidden });
        }
        actions.push(Action::MoveTo { key, position: placement.position });
        session.commit(&placement);
        actions
    }

    /// End the session, reverting if the last position is in a restricted zone.
    ///
    /// # Errors
    ///
    /// Returns `NoSession` when idle.
    pub fn release(&mut self, zones: &[Rect]) -> Result<Vec<Action>, DragError> {
        let session = self.session.take().ok_or(DragError::NoSession)?;
        let restricted = zone::center_in_any(&session.current_rect(), zones);
        let outcome = if restricted { DropOutcome::Reverted } else { DropOutcome::Accepted };
        Ok(finish(&session, outcome))
    }

    /// End the session and move the target back to where it was pressed.
    ///
    /// # Errors
    ///
    /// Returns `NoSession` when idle.
    pub fn cancel(&mut self) -> Result<Vec<Action>, DragError> {
        let session = self.session.take().ok_or(DragError::NoSession)?;
        Ok(finish(&session, DropOutcome::Cancelled))
    }
}

fn finish(session: &DragSession, outcome: DropOutcome) -> Vec<Action> {
    let key = session.target();
    let id = session.target_id();
    let mut actions = vec![
        Action::SetMarker { key, marker: Marker::Dragging, on: false },
        Action::SetForbidden { key, on: false },
    ];
    if outcome == DropOutcome::Accepted {
        let at = session.position();
        log::debug!("drag accepted: {id} at ({}, {})", at.x, at.y);
    } else {
        let origin = session.origin().origin();
        log::debug!("drag {outcome:?}: {id} back to ({}, {})", origin.x, origin.y);
        actions.push(Action::MoveTo { key, position: origin });
    }
    actions.push(Action::SessionEnded { key, outcome });
    actions
}

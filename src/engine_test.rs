#![allow(clippy::float_cmp)]

use super::*;
use crate::page::ElementId;

// =============================================================
// Helpers
// =============================================================

const A: ElementKey = ElementKey(0);
const B: ElementKey = ElementKey(1);
const X: ElementKey = ElementKey(2);

fn el(key: ElementKey, x: f64, y: f64, w: f64, h: f64) -> ElementSnapshot {
    ElementSnapshot::new(key, format!("el-{}", key.0), "span", Rect::new(x, y, w, h))
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn viewport() -> Viewport {
    Viewport::new(1024.0, 768.0)
}

fn last_move(actions: &[Action]) -> Option<Point> {
    actions.iter().rev().find_map(|a| match a {
        Action::MoveTo { position, .. } => Some(*position),
        _ => None,
    })
}

fn has_marker(actions: &[Action], marker: Marker, on: bool) -> bool {
    actions
        .iter()
        .any(|a| matches!(a, Action::SetMarker { marker: m, on: o, .. } if *m == marker && *o == on))
}

fn outcome(actions: &[Action]) -> Option<DropOutcome> {
    actions.iter().find_map(|a| match a {
        Action::SessionEnded { outcome, .. } => Some(*outcome),
        _ => None,
    })
}

// =============================================================
// Construction
// =============================================================

#[test]
fn core_starts_idle() {
    let core = EngineCore::default();
    assert!(!core.is_dragging());
    assert!(core.phase().is_none());
    assert!(core.session().is_none());
}

// =============================================================
// press
// =============================================================

#[test]
fn press_floats_reparents_and_marks() {
    let mut core = EngineCore::default();
    let a = el(A, 100.0, 100.0, 50.0, 50.0);
    let actions = core.press(&a, pt(110.0, 110.0), &[]).unwrap();

    assert_eq!(
        actions[0],
        Action::Float { key: A, rect: Rect::new(100.0, 100.0, 50.0, 50.0), z_index: 9999 }
    );
    assert!(actions.contains(&Action::Reparent { key: A }));
    assert!(has_marker(&actions, Marker::Floating, true));
    assert!(has_marker(&actions, Marker::Dragging, true));
    assert!(has_marker(&actions, Marker::Hover, false));
    assert_eq!(core.phase(), Some(DragPhase::Armed));
    assert!(core.is_target(A));
}

#[test]
fn press_on_floating_element_skips_reparent() {
    let mut core = EngineCore::default();
    let a = el(A, 100.0, 100.0, 50.0, 50.0).floating();
    let actions = core.press(&a, pt(110.0, 110.0), &[]).unwrap();
    assert!(!actions.iter().any(|a| matches!(a, Action::Reparent { .. })));
    assert!(!has_marker(&actions, Marker::Floating, true));
}

#[test]
fn press_while_active_is_rejected() {
    let mut core = EngineCore::default();
    core.press(&el(A, 0.0, 0.0, 10.0, 10.0), pt(0.0, 0.0), &[]).unwrap();
    let err = core.press(&el(B, 50.0, 50.0, 10.0, 10.0), pt(50.0, 50.0), &[]).unwrap_err();
    assert_eq!(err, DragError::SessionActive { target: ElementId::new("el-0") });
    assert!(core.is_target(A));
    assert!(!core.is_target(B));
}

#[test]
fn press_targets_key_when_dom_ids_repeat() {
    let mut core = EngineCore::default();
    let first = ElementSnapshot::new(A, "dup", "p", Rect::new(0.0, 0.0, 50.0, 50.0));
    let second = ElementSnapshot::new(B, "dup", "p", Rect::new(300.0, 300.0, 50.0, 50.0));
    let page = [first.clone(), second.clone()];

    let actions = core.press(&second, pt(300.0, 300.0), &page).unwrap();
    assert_eq!(actions[0], Action::Float { key: B, rect: second.rect, z_index: 9999 });
    assert!(core.is_target(B));
    assert!(!core.is_target(A));
    // The other "dup" stays in the snapshot.
    assert_eq!(core.session().unwrap().elements(), &[first.rect]);

    let actions = core.pointer_move(pt(500.0, 500.0), &viewport(), &[]);
    assert!(actions.iter().all(|a| matches!(a, Action::MoveTo { key: B, .. })));
}

#[test]
fn press_uses_configured_z_index() {
    let mut core = EngineCore::new(DragConfig { z_index: 42, ..DragConfig::default() });
    let actions = core.press(&el(A, 0.0, 0.0, 10.0, 10.0), pt(0.0, 0.0), &[]).unwrap();
    assert!(matches!(actions[0], Action::Float { z_index: 42, .. }));
}

// =============================================================
// pointer_move
// =============================================================

#[test]
fn move_while_idle_is_noop() {
    let mut core = EngineCore::default();
    assert!(core.pointer_move(pt(10.0, 10.0), &viewport(), &[]).is_empty());
}

#[test]
fn first_move_enters_tracking() {
    let mut core = EngineCore::default();
    core.press(&el(A, 100.0, 100.0, 50.0, 50.0), pt(100.0, 100.0), &[]).unwrap();
    let actions = core.pointer_move(pt(300.0, 300.0), &viewport(), &[]);
    assert_eq!(last_move(&actions), Some(pt(300.0, 300.0)));
    assert_eq!(core.phase(), Some(DragPhase::Tracking));
}

#[test]
fn move_snaps_against_press_time_snapshot() {
    let mut core = EngineCore::default();
    let a = el(A, 100.0, 100.0, 50.0, 50.0);
    let b = el(B, 160.0, 100.0, 50.0, 50.0);
    core.press(&a, pt(125.0, 125.0), &[a.clone(), b]).unwrap();
    let actions = core.pointer_move(pt(133.0, 125.0), &viewport(), &[]);
    assert_eq!(last_move(&actions), Some(pt(110.0, 100.0)));
}

#[test]
fn forbidden_outline_toggles_only_on_change() {
    let mut core = EngineCore::default();
    core.press(&el(A, 500.0, 500.0, 50.0, 50.0), pt(500.0, 500.0), &[]).unwrap();
    let zone = [Rect::new(0.0, 0.0, 200.0, 200.0)];

    let enter = core.pointer_move(pt(75.0, 75.0), &viewport(), &zone);
    assert!(enter.contains(&Action::SetForbidden { key: A, on: true }));

    let inside = core.pointer_move(pt(80.0, 80.0), &viewport(), &zone);
    assert!(!inside.iter().any(|a| matches!(a, Action::SetForbidden { .. })));

    let leave = core.pointer_move(pt(400.0, 400.0), &viewport(), &zone);
    assert!(leave.contains(&Action::SetForbidden { key: A, on: false }));
}

#[test]
fn zones_are_read_per_move() {
    let mut core = EngineCore::default();
    core.press(&el(A, 500.0, 500.0, 50.0, 50.0), pt(500.0, 500.0), &[]).unwrap();
    let none = core.pointer_move(pt(75.0, 75.0), &viewport(), &[]);
    assert!(!none.iter().any(|a| matches!(a, Action::SetForbidden { .. })));

    let appeared = core.pointer_move(pt(75.0, 75.0), &viewport(), &[Rect::new(0.0, 0.0, 200.0, 200.0)]);
    assert!(appeared.contains(&Action::SetForbidden { key: A, on: true }));
}

// =============================================================
// release
// =============================================================

#[test]
fn release_outside_zone_accepts() {
    let mut core = EngineCore::default();
    core.press(&el(A, 500.0, 500.0, 50.0, 50.0), pt(500.0, 500.0), &[]).unwrap();
    core.pointer_move(pt(300.0, 300.0), &viewport(), &[]);
    let actions = core.release(&[Rect::new(0.0, 0.0, 200.0, 200.0)]).unwrap();

    assert_eq!(outcome(&actions), Some(DropOutcome::Accepted));
    assert!(last_move(&actions).is_none());
    assert!(has_marker(&actions, Marker::Dragging, false));
    assert!(actions.contains(&Action::SetForbidden { key: A, on: false }));
    assert!(!core.is_dragging());
}

#[test]
fn release_inside_zone_reverts_to_press_position() {
    let mut core = EngineCore::default();
    core.press(&el(A, 500.25, 433.75, 50.0, 50.0), pt(510.0, 440.0), &[]).unwrap();
    let zone = [Rect::new(0.0, 0.0, 200.0, 200.0)];
    core.pointer_move(pt(85.0, 81.25), &viewport(), &zone);
    let actions = core.release(&zone).unwrap();

    assert_eq!(outcome(&actions), Some(DropOutcome::Reverted));
    assert_eq!(last_move(&actions), Some(pt(500.25, 433.75)));
}

#[test]
fn release_uses_live_zones_not_move_time_flag() {
    let mut core = EngineCore::default();
    core.press(&el(A, 500.0, 500.0, 50.0, 50.0), pt(500.0, 500.0), &[]).unwrap();
    let zone = [Rect::new(0.0, 0.0, 200.0, 200.0)];
    core.pointer_move(pt(75.0, 75.0), &viewport(), &zone);
    // Zone removed by page script before release.
    let actions = core.release(&[]).unwrap();
    assert_eq!(outcome(&actions), Some(DropOutcome::Accepted));
}

#[test]
fn release_without_move_checks_press_position() {
    let mut core = EngineCore::default();
    core.press(&el(A, 75.0, 75.0, 50.0, 50.0), pt(80.0, 80.0), &[]).unwrap();
    let actions = core.release(&[Rect::new(0.0, 0.0, 200.0, 200.0)]).unwrap();
    assert_eq!(outcome(&actions), Some(DropOutcome::Reverted));
    assert_eq!(last_move(&actions), Some(pt(75.0, 75.0)));
}

#[test]
fn release_while_idle_is_error() {
    let mut core = EngineCore::default();
    assert_eq!(core.release(&[]).unwrap_err(), DragError::NoSession);
}

#[test]
fn release_allows_next_press() {
    let mut core = EngineCore::default();
    core.press(&el(A, 0.0, 0.0, 10.0, 10.0), pt(0.0, 0.0), &[]).unwrap();
    core.release(&[]).unwrap();
    assert!(core.press(&el(B, 0.0, 0.0, 10.0, 10.0), pt(0.0, 0.0), &[]).is_ok());
}

// =============================================================
// cancel
// =============================================================

#[test]
fn cancel_reverts_and_ends_session() {
    let mut core = EngineCore::default();
    core.press(&el(A, 100.0, 100.0, 50.0, 50.0), pt(100.0, 100.0), &[]).unwrap();
    core.pointer_move(pt(400.0, 400.0), &viewport(), &[]);
    let actions = core.cancel().unwrap();
    assert_eq!(outcome(&actions), Some(DropOutcome::Cancelled));
    assert_eq!(last_move(&actions), Some(pt(100.0, 100.0)));
    assert!(!core.is_dragging());
}

#[test]
fn cancel_while_idle_is_error() {
    let mut core = EngineCore::default();
    assert_eq!(core.cancel().unwrap_err(), DragError::NoSession);
}

// =============================================================
// hover
// =============================================================

#[test]
fn hover_enter_highlights_idle_element() {
    let core = EngineCore::default();
    let actions = core.hover_enter(X, false);
    assert_eq!(actions, vec![Action::SetMarker { key: X, marker: Marker::Hover, on: true }]);
}

#[test]
fn hover_enter_skips_dragging_element() {
    let core = EngineCore::default();
    assert!(core.hover_enter(X, true).is_empty());
}

#[test]
fn hover_enter_skips_active_target() {
    let mut core = EngineCore::default();
    core.press(&el(A, 0.0, 0.0, 10.0, 10.0), pt(0.0, 0.0), &[]).unwrap();
    assert!(core.hover_enter(A, false).is_empty());
    assert_eq!(core.hover_enter(B, false).len(), 1);
}

#[test]
fn hover_leave_always_clears() {
    let core = EngineCore::default();
    let actions = core.hover_leave(X);
    assert!(has_marker(&actions, Marker::Hover, false));
}

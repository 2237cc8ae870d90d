#[cfg(test)]
#[path = "zone_test.rs"]
mod zone_test;

use crate::geom::Rect;

/// Whether the center of `rect` lies inside any of `zones` (edges inclusive).
///
/// `zones` is always a fresh measurement: restricted zones may be toggled by
/// page script mid-drag, so callers never cache them.
#[must_use]
pub fn center_in_any(rect: &Rect, zones: &[Rect]) -> bool {
    let center = rect.center();
    zones.iter().any(|zone| zone.contains(center))
}

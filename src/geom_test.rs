#![allow(clippy::float_cmp)]

use super::*;

// --- Point ---

#[test]
fn point_offset_from_subtracts_componentwise() {
    let p = Point::new(130.0, 120.0).offset_from(Point::new(100.0, 100.0));
    assert_eq!(p, Point::new(30.0, 20.0));
}

#[test]
fn point_default_is_origin() {
    assert_eq!(Point::default(), Point::new(0.0, 0.0));
}

// --- Rect ---

#[test]
fn rect_edges_derive_from_size() {
    let r = Rect::new(100.0, 40.0, 50.0, 20.0);
    assert_eq!(r.right(), 150.0);
    assert_eq!(r.bottom(), 60.0);
}

#[test]
fn rect_center_is_midpoint() {
    let r = Rect::new(0.0, 0.0, 200.0, 100.0);
    assert_eq!(r.center(), Point::new(100.0, 50.0));
}

#[test]
fn rect_at_keeps_size() {
    let r = Rect::new(10.0, 10.0, 50.0, 30.0).at(Point::new(200.0, 5.0));
    assert_eq!(r, Rect::new(200.0, 5.0, 50.0, 30.0));
}

#[test]
fn rect_contains_is_inclusive_on_edges() {
    let r = Rect::new(0.0, 0.0, 200.0, 200.0);
    assert!(r.contains(Point::new(0.0, 0.0)));
    assert!(r.contains(Point::new(200.0, 200.0)));
    assert!(r.contains(Point::new(100.0, 100.0)));
    assert!(!r.contains(Point::new(200.5, 100.0)));
    assert!(!r.contains(Point::new(100.0, -0.5)));
}

#[test]
fn zero_size_rect_contains_only_its_corner() {
    let r = Rect::new(5.0, 5.0, 0.0, 0.0);
    assert!(r.contains(Point::new(5.0, 5.0)));
    assert!(!r.contains(Point::new(5.1, 5.0)));
}

// --- Viewport ---

#[test]
fn viewport_new_has_no_scroll() {
    let vp = Viewport::new(800.0, 600.0);
    assert_eq!(vp.scroll_x, 0.0);
    assert_eq!(vp.scroll_y, 0.0);
}

#[test]
fn client_to_page_adds_scroll_offset() {
    let vp = Viewport { width: 800.0, height: 600.0, scroll_x: 15.0, scroll_y: 300.0 };
    let page = vp.client_to_page(Rect::new(10.0, 20.0, 30.0, 40.0));
    assert_eq!(page, Rect::new(25.0, 320.0, 30.0, 40.0));
}

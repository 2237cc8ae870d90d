#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

/// A point in page coordinates (CSS pixels from the document origin).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn offset_from(self, other: Point) -> Point {
        Point { x: self.x - other.x, y: self.y - other.y }
    }
}

/// Axis-aligned box in page coordinates.
///
/// `left`/`top` is the top-left corner; `width`/`height` are never re-derived
/// from the edges, so a zero-size box stays zero-size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// The same size, moved so its top-left corner sits at `origin`.
    #[must_use]
    pub fn at(&self, origin: Point) -> Rect {
        Rect { left: origin.x, top: origin.y, ..*self }
    }

    /// Containment test with inclusive edges on all four sides.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.left && pt.x <= self.right() && pt.y >= self.top && pt.y <= self.bottom()
    }
}

/// Visible viewport size plus the current scroll offset of the document.
///
/// Bounding boxes measured by the browser are viewport-relative; adding the
/// scroll offset moves them into page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, scroll_x: 0.0, scroll_y: 0.0 }
    }

    /// Convert a viewport-relative box to page coordinates.
    #[must_use]
    pub fn client_to_page(&self, client: Rect) -> Rect {
        Rect { left: client.left + self.scroll_x, top: client.top + self.scroll_y, ..client }
    }
}

//! Page model: element identifiers and the geometry snapshot the engine works on.
//!
//! The engine never touches the live document. The DOM host measures each
//! instrumented element into an [`ElementSnapshot`] when a drag starts, and the
//! engine freezes those snapshots for the rest of the session.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use std::fmt;

use crate::config::DragConfig;
use crate::geom::Rect;

/// The DOM `id` of an instrumented element. Pages may repeat one, so it names
/// elements in logs and errors but never identifies them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub String);

impl ElementId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Host-assigned handle of a registered element, unique within one host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementKey(pub usize);

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One element's state as measured at a single instant.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSnapshot {
    pub key: ElementKey,
    pub id: ElementId,
    /// Lowercase tag name.
    pub tag: String,
    /// Bounding box in page coordinates.
    pub rect: Rect,
    /// Number of child elements (text nodes excluded).
    pub child_count: u32,
    /// Already converted to absolute positioning and reparented to the body.
    pub floating: bool,
    /// Currently the target of a drag.
    pub dragging: bool,
}

impl ElementSnapshot {
    #[must_use]
    pub fn new(key: ElementKey, id: impl Into<String>, tag: impl Into<String>, rect: Rect) -> Self {
        Self {
            key,
            id: ElementId::new(id),
            tag: tag.into().to_ascii_lowercase(),
            rect,
            child_count: 0,
            floating: false,
            dragging: false,
        }
    }

    #[must_use]
    pub fn with_children(mut self, child_count: u32) -> Self {
        self.child_count = child_count;
        self
    }

    #[must_use]
    pub fn floating(mut self) -> Self {
        self.floating = true;
        self
    }

    #[must_use]
    pub fn dragging(mut self) -> Self {
        self.dragging = true;
        self
    }

    /// Whether this element acts as a container for inner-edge alignment.
    ///
    /// Requires a container tag, and either at least one child element or both
    /// sides strictly larger than the configured minimum.
    #[must_use]
    pub fn is_container(&self, config: &DragConfig) -> bool {
        let tag_ok = config.container_tags.iter().any(|t| t.eq_ignore_ascii_case(&self.tag));
        let big = self.rect.width > config.container_min_side && self.rect.height > config.container_min_side;
        tag_ok && (self.child_count > 0 || big)
    }
}

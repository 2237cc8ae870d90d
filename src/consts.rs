//! Shared numeric and naming defaults for the drag tool.

// ── Geometry ────────────────────────────────────────────────────

/// Maximum edge distance, exclusive, at which a snap triggers.
pub const SNAP_THRESHOLD_PX: f64 = 10.0;

/// Gap kept between a dragged element and every viewport edge.
pub const VIEWPORT_PADDING_PX: f64 = 5.0;

/// A childless container qualifies only when both sides exceed this.
pub const CONTAINER_MIN_SIDE_PX: f64 = 100.0;

/// Stacking order applied to an element once it floats.
pub const FLOATING_Z_INDEX: i32 = 9999;

// ── Naming ──────────────────────────────────────────────────────

/// Prefix of generated element identifiers (`free-float-0`, `free-float-1`, ...).
pub const ID_PREFIX: &str = "free-float-";

/// Tags that may be classified as containers.
pub const CONTAINER_TAGS: [&str; 5] = ["div", "section", "article", "main", "aside"];

/// Tags never instrumented.
pub const SKIPPED_TAGS: [&str; 2] = ["script", "style"];

/// Inline outline applied while the dragged element hovers a restricted zone.
pub const FORBIDDEN_OUTLINE: &str = "2px solid red";

// ── Banner ──────────────────────────────────────────────────────

pub const BANNER_TEXT: &str = "This tool is for testing layouts using drag and drop. Use it on any website!";

/// How long the notice banner stays visible before fading.
pub const BANNER_VISIBLE_MS: u32 = 10_000;

/// Length of the banner's fade transition; it is hidden outright afterwards.
pub const BANNER_FADE_MS: u32 = 300;

//! Shared numeric constants for the editor crate.

// ── Canvas ──────────────────────────────────────────────────────

/// Default landscape canvas width in design units (A4 at 72 dpi).
pub const DEFAULT_CANVAS_WIDTH: f64 = 842.0;

/// Default landscape canvas height in design units (A4 at 72 dpi).
pub const DEFAULT_CANVAS_HEIGHT: f64 = 595.0;

/// High-resolution landscape canvas width (A4 at 96 dpi).
pub const HIGH_RES_CANVAS_WIDTH: f64 = 1123.0;

/// High-resolution landscape canvas height (A4 at 96 dpi).
pub const HIGH_RES_CANVAS_HEIGHT: f64 = 794.0;

/// Default canvas background color.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

// ── Snapping ────────────────────────────────────────────────────

/// Grid pitch in design units when snap-to-grid is enabled.
pub const GRID_SIZE: f64 = 20.0;

/// Maximum distance (design units, exclusive) at which a dragged center is
/// pulled onto an alignment target.
pub const SNAP_THRESHOLD: f64 = 5.0;

// ── Sizing ──────────────────────────────────────────────────────

/// Minimum element width after a resize.
pub const MIN_ELEMENT_WIDTH: f64 = 30.0;

/// Minimum element height after a resize.
pub const MIN_ELEMENT_HEIGHT: f64 = 20.0;

// ── Editing ─────────────────────────────────────────────────────

/// Maximum number of snapshots kept by the undo log.
pub const HISTORY_LIMIT: usize = 50;

/// Offset applied to both axes of a duplicated element.
pub const DUPLICATE_OFFSET: f64 = 20.0;

/// Arrow-key nudge distance in design units.
pub const NUDGE_STEP: f64 = 1.0;

/// Arrow-key nudge distance with Shift held.
pub const NUDGE_STEP_LARGE: f64 = 10.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels for the resize handle.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

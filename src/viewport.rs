//! Design-space points and the screen to design-unit conversion.
//!
//! The canvas is drawn at whatever width the page gives it, while element
//! geometry lives in the template's own units. `Viewport` holds the ratio.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

/// A point in either screen (CSS pixel) or design space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// Mapping between the rendered canvas (CSS pixels) and the template's design units.
///
/// The canvas is drawn scaled to fit its container, so `rendered_width_px`
/// is usually smaller than `design_width`. Only the horizontal ratio is used;
/// the canvas keeps its aspect ratio when scaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub rendered_width_px: f64,
    pub design_width: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(rendered_width_px: f64, design_width: f64) -> Self {
        Self { rendered_width_px, design_width }
    }

    /// An unscaled viewport: one CSS pixel per design unit.
    #[must_use]
    pub fn identity(design_width: f64) -> Self {
        Self::new(design_width, design_width)
    }

    /// Rendered pixels per design unit. Degenerate sizes fall back to 1.0.
    #[must_use]
    pub fn scale(&self) -> f64 {
        let scale = self.rendered_width_px / self.design_width;
        if scale.is_finite() && scale > 0.0 { scale } else { 1.0 }
    }

    /// Convert a screen-space point (CSS pixels, canvas-relative) to design units.
    #[must_use]
    pub fn screen_to_design(&self, screen: Point) -> Point {
        let scale = self.scale();
        Point::new(screen.x / scale, screen.y / scale)
    }

    /// Convert a screen-space pointer delta to a design-space delta.
    #[must_use]
    pub fn screen_delta_to_design(&self, delta: Point) -> Point {
        self.screen_to_design(delta)
    }

    /// Convert a screen-space distance (pixels) to design units.
    #[must_use]
    pub fn screen_dist_to_design(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::identity(crate::consts::DEFAULT_CANVAS_WIDTH)
    }
}

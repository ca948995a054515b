//! Geometry and snapping: pure functions behind drag and resize gestures.
//!
//! Everything here works in design units and is free of editor state, so
//! the interaction controller can call it on every pointer-move and tests can
//! exercise it directly.
//!
//! Drag moves the whole selection by a single *effective* delta derived from
//! the primary element: the primary's candidate position is snapped (grid or
//! alignment guides) and clamped to the canvas, and whatever offset that
//! produces is applied unchanged to every other selected element. Relative
//! layout inside a multi-selection is therefore always preserved.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::collections::HashMap;

use serde::Serialize;

use crate::config::EditorConfig;
use crate::element::{Element, ElementId};
use crate::viewport::Point;

/// Alignment lines to display while dragging. `x` holds vertical lines, `y`
/// horizontal ones, both in design units.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Guides {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Guides {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() && self.y.is_empty()
    }

    pub fn clear(&mut self) {
        self.x.clear();
        self.y.clear();
    }
}

/// Element dimensions in design units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Everything a drag step needs.
#[derive(Debug, Clone, Copy)]
pub struct DragInput<'a> {
    /// Center of every dragged element at gesture start.
    pub initial_positions: &'a HashMap<ElementId, Point>,
    /// The element whose position drives snapping.
    pub primary_id: &'a str,
    /// Pointer travel since gesture start, already converted to design units.
    pub delta: Point,
    /// Centers of elements that are not being dragged (alignment targets).
    pub others: &'a [Point],
    pub snap_to_grid: bool,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub config: &'a EditorConfig,
}

/// Outcome of a drag step.
#[derive(Debug, Clone, PartialEq)]
pub struct DragResult {
    pub positions: HashMap<ElementId, Point>,
    pub guides: Guides,
    /// The offset actually applied to every element.
    pub delta: Point,
}

/// Round `value` to the nearest multiple of `grid`.
#[must_use]
pub fn snap_to_grid(value: f64, grid: f64) -> f64 {
    if grid <= 0.0 || !grid.is_finite() {
        return value;
    }
    (value / grid).round() * grid
}

/// Nearest target strictly closer than `threshold` to `candidate`.
fn nearest_within<I>(candidate: f64, targets: I, threshold: f64) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    targets
        .into_iter()
        .map(|t| (t, (t - candidate).abs()))
        .filter(|(_, d)| *d < threshold)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(t, _)| t)
}

/// Compute new positions for a drag step.
///
/// Unknown `primary_id` leaves every element where it started.
#[must_use]
pub fn compute_drag(input: &DragInput<'_>) -> DragResult {
    let Some(start) = input.initial_positions.get(input.primary_id).copied() else {
        return DragResult {
            positions: input.initial_positions.clone(),
            guides: Guides::default(),
            delta: Point::default(),
        };
    };

    let candidate = start + input.delta;
    let mut guides = Guides::default();

    let snapped = if input.snap_to_grid {
        Point::new(snap_to_grid(candidate.x, input.config.grid_size), snap_to_grid(candidate.y, input.config.grid_size))
    } else {
        let threshold = input.config.snap_threshold;
        let x_targets = std::iter::once(input.canvas_width / 2.0).chain(input.others.iter().map(|p| p.x));
        let y_targets = input.others.iter().map(|p| p.y);

        let x = match nearest_within(candidate.x, x_targets, threshold) {
            Some(tx) => {
                guides.x.push(tx);
                tx
            }
            None => candidate.x,
        };
        let y = match nearest_within(candidate.y, y_targets, threshold) {
            Some(ty) => {
                guides.y.push(ty);
                ty
            }
            None => candidate.y,
        };
        Point::new(x, y)
    };

    let clamped = Point::new(
        snapped.x.clamp(0.0, input.canvas_width.max(0.0)),
        snapped.y.clamp(0.0, input.canvas_height.max(0.0)),
    );
    // A guide only makes sense if the clamp left the element on it.
    guides.x.retain(|gx| (gx - clamped.x).abs() < f64::EPSILON);
    guides.y.retain(|gy| (gy - clamped.y).abs() < f64::EPSILON);

    let delta = clamped - start;
    let positions = input.initial_positions.iter().map(|(id, p)| (id.clone(), *p + delta)).collect();

    tracing::trace!(dx = delta.x, dy = delta.y, guides_x = guides.x.len(), guides_y = guides.y.len(), "drag step");
    DragResult { positions, guides, delta }
}

/// Compute the new size for a resize gesture.
///
/// The element is resized symmetrically around its center: each dimension is
/// twice the cursor's distance from the center, measured in the element's own
/// (un-rotated) frame. With `maintain_aspect`, the axis whose size changed
/// more drives the other through `start_aspect` (width / height at gesture
/// start). Floors are applied last and win over the aspect ratio.
#[must_use]
pub fn compute_resize(
    element: &Element,
    cursor: Point,
    maintain_aspect: bool,
    start_aspect: f64,
    config: &EditorConfig,
) -> Size {
    let local = to_local(element, cursor);
    let mut width = (local.x * 2.0).abs();
    let mut height = (local.y * 2.0).abs();

    if maintain_aspect && start_aspect.is_finite() && start_aspect > 0.0 {
        let dw = (width - element.width).abs();
        let dh = (height - element.height).abs();
        if dw >= dh {
            height = width / start_aspect;
        } else {
            width = height * start_aspect;
        }
    }

    Size { width: width.max(config.min_width), height: height.max(config.min_height) }
}

/// Express `world` relative to the element's center, undoing its rotation.
#[must_use]
pub fn to_local(element: &Element, world: Point) -> Point {
    let d = world - Point::new(element.x, element.y);
    let (sin, cos) = (-element.rotation.to_radians()).sin_cos();
    Point::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
}

/// Inverse of [`to_local`]: map an element-relative offset back to design space.
#[must_use]
pub fn to_world(element: &Element, local: Point) -> Point {
    let (sin, cos) = element.rotation.to_radians().sin_cos();
    Point::new(local.x * cos - local.y * sin + element.x, local.x * sin + local.y * cos + element.y)
}

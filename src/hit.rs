//! Hit-testing against template elements.
//!
//! The selected element's resize handle wins over any body. Bodies are
//! tested topmost-first in each element's rotated frame.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::element::ElementId;
use crate::geometry::{to_local, to_world};
use crate::template::Template;
use crate::viewport::Point;

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    /// The bottom-right resize handle of the primary selected element.
    ResizeHandle,
}

/// Result of a hit test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub element_id: ElementId,
    pub part: HitPart,
}

/// Design-space position of an element's resize handle (its rotated bottom-right corner).
#[must_use]
pub fn resize_handle_position(template: &Template, id: &str) -> Option<Point> {
    let el = template.get(id)?;
    Some(to_world(el, Point::new(el.width / 2.0, el.height / 2.0)))
}

/// Find what lies under `design_pt`.
///
/// The primary element's resize handle is checked first (within
/// `handle_radius` design units), then element bodies from the top of the
/// paint order down, honoring rotation.
#[must_use]
pub fn hit_test(template: &Template, design_pt: Point, primary: Option<&str>, handle_radius: f64) -> Option<Hit> {
    if let Some(pid) = primary {
        if let Some(handle) = resize_handle_position(template, pid) {
            let d = design_pt - handle;
            if d.x.hypot(d.y) <= handle_radius {
                return Some(Hit { element_id: pid.to_string(), part: HitPart::ResizeHandle });
            }
        }
    }

    template.elements.iter().rev().find_map(|el| {
        let local = to_local(el, design_pt);
        let inside = local.x.abs() <= el.width / 2.0 && local.y.abs() <= el.height / 2.0;
        inside.then(|| Hit { element_id: el.id.clone(), part: HitPart::Body })
    })
}

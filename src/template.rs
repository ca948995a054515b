//! Document model: the certificate template being edited.
//!
//! A [`Template`] is the canvas (fixed size, background) plus an ordered list
//! of [`Element`]s. Array order is paint order: later elements are drawn on
//! top. The editor mutates the template in place; the history log stores deep
//! copies of it.
//!
//! The JSON layout produced here is exactly what the storage layer persists:
//! `{ id, name, elements, backgroundColor, backgroundImage?, width, height, thumbnail? }`.

#[cfg(test)]
#[path = "template_test.rs"]
mod template_test;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{
    DEFAULT_BACKGROUND, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, HIGH_RES_CANVAS_HEIGHT, HIGH_RES_CANVAS_WIDTH,
};
use crate::element::{Element, ElementId, GroupId};

/// Error returned when decoding or validating a template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// The input is not valid template JSON.
    #[error("invalid template JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Canvas width or height is zero, negative or not finite.
    #[error("invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },
    /// Two elements share the same id.
    #[error("duplicate element id: {0}")]
    DuplicateElementId(ElementId),
}

/// Page orientation used when creating a blank template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
}

/// Canvas size presets for blank templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    /// A4 at 72 dpi (842 × 595 landscape).
    #[default]
    A4,
    /// A4 at 96 dpi (1123 × 794 landscape).
    A4HighRes,
}

impl PageSize {
    /// `(width, height)` in design units for the given orientation.
    #[must_use]
    pub fn dimensions(self, orientation: Orientation) -> (f64, f64) {
        let (w, h) = match self {
            Self::A4 => (DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT),
            Self::A4HighRes => (HIGH_RES_CANVAS_WIDTH, HIGH_RES_CANVAS_HEIGHT),
        };
        match orientation {
            Orientation::Landscape => (w, h),
            Orientation::Portrait => (h, w),
        }
    }
}

/// A certificate template: canvas settings and the z-ordered element list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    /// Paint order: index 0 is the bottom-most element.
    pub elements: Vec<Element>,
    pub background_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    pub width: f64,
    pub height: f64,
    /// Data URL or storage URL of the last rendered preview.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl Default for Template {
    fn default() -> Self {
        Self::blank("Untitled Certificate", PageSize::A4, Orientation::Landscape)
    }
}

impl Template {
    /// Create an empty template of the given size.
    #[must_use]
    pub fn blank(name: &str, size: PageSize, orientation: Orientation) -> Self {
        let (width, height) = size.dimensions(orientation);
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            elements: Vec::new(),
            background_color: DEFAULT_BACKGROUND.to_string(),
            background_image: None,
            width,
            height,
            thumbnail: None,
        }
    }

    /// Create a template holding `elements` on a `width` × `height` canvas.
    #[must_use]
    pub fn with_elements(width: f64, height: f64, elements: Vec<Element>) -> Self {
        Self { width, height, elements, ..Self::default() }
    }

    /// Decode and validate a persisted template.
    ///
    /// Singleton groups are stripped on load so the editor only ever sees
    /// groups of two or more elements.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Json`] for malformed input,
    /// [`TemplateError::InvalidDimensions`] for a degenerate canvas and
    /// [`TemplateError::DuplicateElementId`] when ids collide.
    pub fn from_json(raw: &str) -> Result<Self, TemplateError> {
        let mut template: Self = serde_json::from_str(raw)?;
        template.validate()?;
        template.normalize_groups();
        Ok(template)
    }

    /// Encode the template in its persisted layout.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, TemplateError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check canvas dimensions and id uniqueness.
    ///
    /// # Errors
    ///
    /// See [`Template::from_json`].
    pub fn validate(&self) -> Result<(), TemplateError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(self.width) || !valid(self.height) {
            return Err(TemplateError::InvalidDimensions { width: self.width, height: self.height });
        }
        let mut seen = HashSet::new();
        for el in &self.elements {
            if !seen.insert(el.id.as_str()) {
                return Err(TemplateError::DuplicateElementId(el.id.clone()));
            }
        }
        Ok(())
    }

    // --- Lookup ---

    /// Position of an element in paint order.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.elements.iter().position(|el| el.id == id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index_of(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    // --- Mutation ---

    /// Append an element on top of the stack, replacing its id if it collides.
    /// Returns the id the element was stored under.
    pub fn push(&mut self, mut element: Element) -> ElementId {
        while self.contains(&element.id) {
            element.id = crate::element::new_element_id();
        }
        let id = element.id.clone();
        self.elements.push(element);
        id
    }

    /// Remove an element by id, returning it if present.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let idx = self.index_of(id)?;
        Some(self.elements.remove(idx))
    }

    // --- Groups ---

    /// Ids of every element carrying `group_id`, in paint order.
    #[must_use]
    pub fn group_members(&self, group_id: &str) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|el| el.group_id.as_deref() == Some(group_id))
            .map(|el| el.id.clone())
            .collect()
    }

    /// The ids that move and select together with `id`: its whole group, or
    /// just itself when ungrouped. Empty when `id` is unknown.
    #[must_use]
    pub fn selection_unit(&self, id: &str) -> Vec<ElementId> {
        match self.get(id) {
            None => Vec::new(),
            Some(el) => match &el.group_id {
                Some(gid) => self.group_members(gid),
                None => vec![el.id.clone()],
            },
        }
    }

    /// Distinct group ids in first-seen paint order.
    #[must_use]
    pub fn group_ids(&self) -> Vec<GroupId> {
        let mut out: Vec<GroupId> = Vec::new();
        for gid in self.elements.iter().filter_map(|el| el.group_id.as_ref()) {
            if !out.contains(gid) {
                out.push(gid.clone());
            }
        }
        out
    }

    /// Strip group ids held by a single element. Returns how many were stripped.
    pub fn normalize_groups(&mut self) -> usize {
        let mut counts: HashMap<GroupId, usize> = HashMap::new();
        for gid in self.elements.iter().filter_map(|el| el.group_id.clone()) {
            *counts.entry(gid).or_default() += 1;
        }
        let mut stripped = 0;
        for el in &mut self.elements {
            let lonely = el.group_id.as_ref().is_some_and(|gid| counts.get(gid).copied().unwrap_or(0) < 2);
            if lonely {
                el.group_id = None;
                stripped += 1;
            }
        }
        stripped
    }
}

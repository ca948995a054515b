//! Element model: the placeable objects of a certificate template.
//!
//! An [`Element`] carries the geometry and effects every kind shares (center
//! position, size, rotation, opacity, shadow, group membership) and a tagged
//! [`ElementKind`] with the per-kind attributes. On the wire an element is a
//! single flat camelCase object discriminated by `"type"`, which is the shape
//! the storage layer persists.
//!
//! [`ElementPatch`] is the sparse update used both for creation overrides and
//! for live edits from the inspector. Typed geometry fields cover the hot path
//! (drag, resize, nudge); everything else flows through a JSON attribute bag
//! merged key-by-key, where `null` clears an optional attribute.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an element within a template.
pub type ElementId = String;

/// Shared identifier carried by every member of a group.
pub type GroupId = String;

/// Attribute keys the JSON bag may never touch. Identity and grouping are
/// owned by the editor, not by inspector edits.
const PROTECTED_KEYS: [&str; 3] = ["id", "type", "groupId"];

/// Generate a fresh element id.
#[must_use]
pub fn new_element_id() -> ElementId {
    format!("el-{}", Uuid::new_v4().simple())
}

/// The discriminant of an element, used to request creation of a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Text,
    Image,
    Shape,
    Placeholder,
    Icon,
    Qr,
}

impl ElementType {
    /// All element types, in toolbar order.
    pub const ALL: [ElementType; 6] = [Self::Text, Self::Image, Self::Shape, Self::Placeholder, Self::Icon, Self::Qr];

    /// Default `(width, height)` for a freshly created element of this type.
    #[must_use]
    pub fn default_size(self) -> (f64, f64) {
        match self {
            Self::Shape | Self::Icon => (60.0, 60.0),
            Self::Image | Self::Qr => (100.0, 100.0),
            Self::Text | Self::Placeholder => (200.0, 40.0),
        }
    }

    /// Lowercase wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Shape => "shape",
            Self::Placeholder => "placeholder",
            Self::Icon => "icon",
            Self::Qr => "qr",
        }
    }
}

/// Drop shadow applied behind an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    pub enabled: bool,
    pub color: String,
    pub blur: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for Shadow {
    fn default() -> Self {
        Self { enabled: true, color: "rgba(0,0,0,0.25)".into(), blur: 8.0, offset_x: 2.0, offset_y: 2.0 }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Text slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Outline drawn around glyphs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStroke {
    pub color: String,
    pub width: f64,
}

/// Typography shared by literal text and data placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f64,
    /// CSS weight keyword or number (`"normal"`, `"bold"`, `"600"`).
    pub font_weight: String,
    pub font_style: FontStyle,
    pub color: String,
    pub text_align: TextAlign,
    pub line_height: f64,
    pub letter_spacing: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<TextStroke>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "Inter".into(),
            font_size: 24.0,
            font_weight: "normal".into(),
            font_style: FontStyle::Normal,
            color: "#1f2937".into(),
            text_align: TextAlign::Center,
            line_height: 1.2,
            letter_spacing: 0.0,
            stroke: None,
        }
    }
}

/// Live data a placeholder resolves to at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderKind {
    #[default]
    Name,
    Program,
    Date,
    Signature,
    Expiry,
}

impl PlaceholderKind {
    /// Text shown on the design surface before data is bound.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "{Recipient Name}",
            Self::Program => "{Program Name}",
            Self::Date => "{Issue Date}",
            Self::Signature => "{Signature}",
            Self::Expiry => "{Expiry Date}",
        }
    }
}

/// Primitive shape geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Circle,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAttrs {
    #[serde(default)]
    pub content: String,
    #[serde(flatten)]
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderAttrs {
    #[serde(default)]
    pub placeholder: PlaceholderKind,
    #[serde(flatten)]
    pub style: TextStyle,
}

/// Raster image with CSS-style filters. Filter values are percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageAttrs {
    /// Resolved URL; uploading happens outside the editor.
    pub src: String,
    pub brightness: f64,
    pub contrast: f64,
    pub grayscale: f64,
    pub border_radius: f64,
}

impl Default for ImageAttrs {
    fn default() -> Self {
        Self { src: String::new(), brightness: 100.0, contrast: 100.0, grayscale: 0.0, border_radius: 0.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShapeAttrs {
    pub shape: ShapeKind,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
}

impl Default for ShapeAttrs {
    fn default() -> Self {
        Self { shape: ShapeKind::Rectangle, fill: "#3b82f6".into(), stroke: "transparent".into(), stroke_width: 0.0 }
    }
}

/// Vector icon referenced by name. The renderer owns the name → glyph registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IconAttrs {
    pub icon: String,
    pub color: String,
    pub stroke_width: f64,
}

impl Default for IconAttrs {
    fn default() -> Self {
        Self { icon: "award".into(), color: "#1f2937".into(), stroke_width: 2.0 }
    }
}

/// QR code payload. `{VERIFY_URL}` inside `value` is substituted at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QrAttrs {
    pub value: String,
    pub color: String,
    pub background_color: String,
}

impl Default for QrAttrs {
    fn default() -> Self {
        Self { value: QR_VERIFY_SENTINEL.into(), color: "#000000".into(), background_color: "#ffffff".into() }
    }
}

/// Sentinel replaced with the certificate verification link at render time.
pub const QR_VERIFY_SENTINEL: &str = "{VERIFY_URL}";

/// Per-kind attributes, tagged by `"type"` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Text(TextAttrs),
    Image(ImageAttrs),
    Shape(ShapeAttrs),
    Placeholder(PlaceholderAttrs),
    Icon(IconAttrs),
    Qr(QrAttrs),
}

impl ElementKind {
    /// Default attributes for a new element of `ty`.
    #[must_use]
    pub fn defaults(ty: ElementType) -> Self {
        match ty {
            ElementType::Text => Self::Text(TextAttrs { content: "Double-click to edit".into(), style: TextStyle::default() }),
            ElementType::Image => Self::Image(ImageAttrs::default()),
            ElementType::Shape => Self::Shape(ShapeAttrs::default()),
            ElementType::Placeholder => Self::Placeholder(PlaceholderAttrs {
                placeholder: PlaceholderKind::Name,
                style: TextStyle { font_size: 32.0, font_weight: "bold".into(), ..TextStyle::default() },
            }),
            ElementType::Icon => Self::Icon(IconAttrs::default()),
            ElementType::Qr => Self::Qr(QrAttrs::default()),
        }
    }

    #[must_use]
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Text(_) => ElementType::Text,
            Self::Image(_) => ElementType::Image,
            Self::Shape(_) => ElementType::Shape,
            Self::Placeholder(_) => ElementType::Placeholder,
            Self::Icon(_) => ElementType::Icon,
            Self::Qr(_) => ElementType::Qr,
        }
    }

    /// Typography, for the kinds that render text.
    #[must_use]
    pub fn text_style(&self) -> Option<&TextStyle> {
        match self {
            Self::Text(attrs) => Some(&attrs.style),
            Self::Placeholder(attrs) => Some(&attrs.style),
            _ => None,
        }
    }
}

fn default_opacity() -> f64 {
    1.0
}

/// A placeable object on the certificate canvas.
///
/// `x`/`y` is the element's **center** in design units, not its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Clockwise rotation in degrees around the center.
    #[serde(default)]
    pub rotation: f64,
    /// 0 (transparent) to 1 (opaque).
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    /// Create an element of `ty` centered on a `canvas_width` × `canvas_height`
    /// canvas, then overlay `overrides`.
    ///
    /// Never fails: an override that does not fit the element's kind is skipped
    /// and the defaults stand.
    #[must_use]
    pub fn create(ty: ElementType, overrides: &ElementPatch, canvas_width: f64, canvas_height: f64) -> Self {
        let (width, height) = ty.default_size();
        let mut element = Self {
            id: new_element_id(),
            group_id: None,
            x: canvas_width / 2.0,
            y: canvas_height / 2.0,
            width,
            height,
            rotation: 0.0,
            opacity: 1.0,
            shadow: None,
            kind: ElementKind::defaults(ty),
        };
        overrides.apply(&mut element);
        element
    }

    #[must_use]
    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    /// Raise width/height to the given floors.
    pub fn clamp_size(&mut self, min_width: f64, min_height: f64) {
        self.width = self.width.max(min_width);
        self.height = self.height.max(min_height);
    }

    /// Axis-aligned bounds `(left, top, right, bottom)` ignoring rotation.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        (self.x - hw, self.y - hh, self.x + hw, self.y + hh)
    }
}

/// Sparse update for an element. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Remaining attribute keys to merge (camelCase wire names, `null` clears).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<serde_json::Value>,
}

impl ElementPatch {
    /// Patch that only moves the element center.
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Default::default() }
    }

    /// Patch that only resizes the element.
    #[must_use]
    pub fn size(width: f64, height: f64) -> Self {
        Self { width: Some(width), height: Some(height), ..Default::default() }
    }

    /// Patch that only merges attribute keys.
    #[must_use]
    pub fn attrs(attrs: serde_json::Value) -> Self {
        Self { attrs: Some(attrs), ..Default::default() }
    }

    /// Returns `true` if the patch carries no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the patch to `element`. Returns `false` when nothing changed.
    ///
    /// Non-finite numbers are ignored, opacity is clamped to `[0, 1]` and sizes
    /// must stay positive. An attribute bag that would leave the element
    /// structurally invalid (e.g. a string where a number belongs) is dropped
    /// as a whole; the typed fields still apply.
    pub fn apply(&self, element: &mut Element) -> bool {
        let before = element.clone();

        if let Some(attrs) = &self.attrs {
            merge_attrs(element, attrs);
        }
        if let Some(x) = self.x.filter(|v| v.is_finite()) {
            element.x = x;
        }
        if let Some(y) = self.y.filter(|v| v.is_finite()) {
            element.y = y;
        }
        if let Some(w) = self.width.filter(|v| v.is_finite() && *v > 0.0) {
            element.width = w;
        }
        if let Some(h) = self.height.filter(|v| v.is_finite() && *v > 0.0) {
            element.height = h;
        }
        if let Some(r) = self.rotation.filter(|v| v.is_finite()) {
            element.rotation = r;
        }
        if let Some(o) = self.opacity.filter(|v| v.is_finite()) {
            element.opacity = o.clamp(0.0, 1.0);
        }

        *element != before
    }
}

fn merge_attrs(element: &mut Element, attrs: &serde_json::Value) {
    let Some(incoming) = attrs.as_object() else {
        tracing::warn!(id = %element.id, "ignoring non-object attribute patch");
        return;
    };

    let mut value = match serde_json::to_value(&*element) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(id = %element.id, error = %e, "element failed to serialize for attribute patch");
            return;
        }
    };
    let Some(existing) = value.as_object_mut() else {
        return;
    };

    for (k, v) in incoming {
        if PROTECTED_KEYS.contains(&k.as_str()) {
            continue;
        }
        if v.is_null() {
            existing.remove(k);
        } else {
            existing.insert(k.clone(), v.clone());
        }
    }

    match serde_json::from_value::<Element>(value) {
        Ok(patched) => *element = patched,
        Err(e) => tracing::warn!(id = %element.id, error = %e, "rejected attribute patch"),
    }
}

#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn text_element() -> Element {
    Element::create(ElementType::Text, &ElementPatch::default(), 800.0, 600.0)
}

// =============================================================
// ElementType
// =============================================================

#[test]
fn default_sizes_per_type() {
    assert_eq!(ElementType::Shape.default_size(), (60.0, 60.0));
    assert_eq!(ElementType::Icon.default_size(), (60.0, 60.0));
    assert_eq!(ElementType::Image.default_size(), (100.0, 100.0));
    assert_eq!(ElementType::Qr.default_size(), (100.0, 100.0));
    assert_eq!(ElementType::Text.default_size(), (200.0, 40.0));
    assert_eq!(ElementType::Placeholder.default_size(), (200.0, 40.0));
}

#[test]
fn type_serde_names() {
    for ty in ElementType::ALL {
        let json = serde_json::to_string(&ty).unwrap();
        assert_eq!(json, format!("\"{}\"", ty.as_str()));
    }
}

// =============================================================
// Element::create
// =============================================================

#[test]
fn create_centers_on_canvas() {
    let el = text_element();
    assert_eq!(el.x, 400.0);
    assert_eq!(el.y, 300.0);
    assert_eq!(el.rotation, 0.0);
    assert_eq!(el.opacity, 1.0);
    assert!(el.group_id.is_none());
    assert!(el.shadow.is_none());
}

#[test]
fn create_every_type_matches_kind() {
    for ty in ElementType::ALL {
        let el = Element::create(ty, &ElementPatch::default(), 842.0, 595.0);
        assert_eq!(el.element_type(), ty);
        assert_eq!((el.width, el.height), ty.default_size());
    }
}

#[test]
fn create_applies_overrides() {
    let el = Element::create(ElementType::Shape, &ElementPatch::size(100.0, 100.0), 800.0, 600.0);
    assert_eq!(el.width, 100.0);
    assert_eq!(el.height, 100.0);
}

#[test]
fn create_applies_attribute_overrides() {
    let patch = ElementPatch::attrs(json!({ "shape": "circle", "fill": "#ff0000" }));
    let el = Element::create(ElementType::Shape, &patch, 800.0, 600.0);
    let ElementKind::Shape(attrs) = &el.kind else {
        panic!("expected shape");
    };
    assert_eq!(attrs.shape, ShapeKind::Circle);
    assert_eq!(attrs.fill, "#ff0000");
}

#[test]
fn create_generates_distinct_ids() {
    let a = text_element();
    let b = text_element();
    assert_ne!(a.id, b.id);
}

#[test]
fn qr_defaults_to_verify_sentinel() {
    let el = Element::create(ElementType::Qr, &ElementPatch::default(), 800.0, 600.0);
    let ElementKind::Qr(attrs) = &el.kind else {
        panic!("expected qr");
    };
    assert_eq!(attrs.value, QR_VERIFY_SENTINEL);
}

#[test]
fn placeholder_kind_is_distinct_from_text() {
    let el = Element::create(ElementType::Placeholder, &ElementPatch::default(), 800.0, 600.0);
    assert!(matches!(el.kind, ElementKind::Placeholder(PlaceholderAttrs { placeholder: PlaceholderKind::Name, .. })));
    assert!(el.kind.text_style().is_some());
}

// =============================================================
// Serde
// =============================================================

#[test]
fn serialize_is_flat_and_tagged() {
    let el = text_element();
    let value = serde_json::to_value(&el).unwrap();
    assert_eq!(value["type"], "text");
    assert_eq!(value["fontSize"], 24.0);
    assert_eq!(value["textAlign"], "center");
    assert!(value.get("kind").is_none());
}

#[test]
fn serialize_omits_absent_group_id() {
    let el = text_element();
    let value = serde_json::to_value(&el).unwrap();
    assert!(value.get("groupId").is_none());
    assert!(value.get("shadow").is_none());
}

#[test]
fn serialize_includes_present_group_id() {
    let mut el = text_element();
    el.group_id = Some("g1".into());
    let value = serde_json::to_value(&el).unwrap();
    assert_eq!(value["groupId"], "g1");
}

#[test]
fn deserialize_minimal_fills_defaults() {
    let el: Element = serde_json::from_value(json!({
        "id": "a",
        "type": "shape",
        "x": 10,
        "y": 20,
        "width": 60,
        "height": 60
    }))
    .unwrap();
    assert_eq!(el.opacity, 1.0);
    assert_eq!(el.rotation, 0.0);
    assert_eq!(el.kind, ElementKind::Shape(ShapeAttrs::default()));
}

#[test]
fn deserialize_placeholder_kind() {
    let el: Element = serde_json::from_value(json!({
        "id": "p",
        "type": "placeholder",
        "placeholder": "expiry",
        "x": 0, "y": 0, "width": 200, "height": 40,
        "fontSize": 18
    }))
    .unwrap();
    let ElementKind::Placeholder(attrs) = &el.kind else {
        panic!("expected placeholder");
    };
    assert_eq!(attrs.placeholder, PlaceholderKind::Expiry);
    assert_eq!(attrs.style.font_size, 18.0);
}

#[test]
fn deserialize_unknown_type_rejects() {
    let result = serde_json::from_value::<Element>(json!({
        "id": "a", "type": "video", "x": 0, "y": 0, "width": 1, "height": 1
    }));
    assert!(result.is_err());
}

// =============================================================
// ElementPatch
// =============================================================

#[test]
fn patch_moves_center() {
    let mut el = text_element();
    assert!(ElementPatch::position(5.0, 6.0).apply(&mut el));
    assert_eq!((el.x, el.y), (5.0, 6.0));
}

#[test]
fn empty_patch_reports_no_change() {
    let mut el = text_element();
    assert!(ElementPatch::default().is_empty());
    assert!(!ElementPatch::default().apply(&mut el));
}

#[test]
fn patch_with_same_values_reports_no_change() {
    let mut el = text_element();
    let patch = ElementPatch::position(el.x, el.y);
    assert!(!patch.apply(&mut el));
}

#[test]
fn patch_clamps_opacity() {
    let mut el = text_element();
    ElementPatch { opacity: Some(3.0), ..Default::default() }.apply(&mut el);
    assert_eq!(el.opacity, 1.0);
    ElementPatch { opacity: Some(-1.0), ..Default::default() }.apply(&mut el);
    assert_eq!(el.opacity, 0.0);
}

#[test]
fn patch_ignores_non_finite_and_non_positive_sizes() {
    let mut el = text_element();
    let patch = ElementPatch { x: Some(f64::NAN), width: Some(0.0), height: Some(f64::INFINITY), ..Default::default() };
    assert!(!patch.apply(&mut el));
    assert_eq!(el.x, 400.0);
    assert_eq!(el.width, 200.0);
    assert_eq!(el.height, 40.0);
}

#[test]
fn attrs_update_text_content_and_style() {
    let mut el = text_element();
    let patch = ElementPatch::attrs(json!({ "content": "Certificate of Merit", "fontWeight": "bold" }));
    assert!(patch.apply(&mut el));
    let ElementKind::Text(attrs) = &el.kind else {
        panic!("expected text");
    };
    assert_eq!(attrs.content, "Certificate of Merit");
    assert_eq!(attrs.style.font_weight, "bold");
}

#[test]
fn attrs_set_and_clear_shadow() {
    let mut el = text_element();
    ElementPatch::attrs(json!({ "shadow": { "enabled": true, "color": "#000", "blur": 4, "offsetX": 1, "offsetY": 1 } }))
        .apply(&mut el);
    assert_eq!(el.shadow.as_ref().map(|s| s.blur), Some(4.0));
    ElementPatch::attrs(json!({ "shadow": null })).apply(&mut el);
    assert!(el.shadow.is_none());
}

#[test]
fn attrs_with_wrong_type_are_rejected_whole() {
    let mut el = text_element();
    let before = el.clone();
    let patch = ElementPatch::attrs(json!({ "content": "ok", "fontSize": "huge" }));
    assert!(!patch.apply(&mut el));
    assert_eq!(el, before);
}

#[test]
fn attrs_cannot_touch_identity_or_group() {
    let mut el = text_element();
    let id = el.id.clone();
    let patch = ElementPatch::attrs(json!({ "id": "hijack", "type": "qr", "groupId": "g" }));
    assert!(!patch.apply(&mut el));
    assert_eq!(el.id, id);
    assert_eq!(el.element_type(), ElementType::Text);
    assert!(el.group_id.is_none());
}

#[test]
fn clamp_size_raises_to_floor() {
    let mut el = text_element();
    el.width = 5.0;
    el.height = 50.0;
    el.clamp_size(30.0, 20.0);
    assert_eq!(el.width, 30.0);
    assert_eq!(el.height, 50.0);
}

#[test]
fn bounds_are_center_based() {
    let mut el = text_element();
    el.x = 100.0;
    el.y = 50.0;
    el.width = 40.0;
    el.height = 20.0;
    assert_eq!(el.bounds(), (80.0, 40.0, 120.0, 60.0));
}

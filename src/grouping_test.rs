use super::*;
use crate::element::{Element, ElementPatch, ElementType};

fn el(id: &str, group: Option<&str>) -> Element {
    let mut el = Element::create(ElementType::Icon, &ElementPatch::default(), 800.0, 600.0);
    el.id = id.to_string();
    el.group_id = group.map(str::to_string);
    el
}

fn select(template: &Template, ids: &[&str]) -> Selection {
    let mut sel = Selection::new();
    for (i, id) in ids.iter().enumerate() {
        sel.click(template, id, i > 0);
    }
    sel
}

fn group_of<'a>(template: &'a Template, id: &str) -> Option<&'a str> {
    template.get(id).and_then(|e| e.group_id.as_deref())
}

// =============================================================
// group
// =============================================================

#[test]
fn group_assigns_shared_id() {
    let mut t = Template::with_elements(800.0, 600.0, vec![el("a", None), el("b", None), el("c", None)]);
    let sel = select(&t, &["a", "b"]);
    let gid = group(&mut t, &sel).unwrap();
    assert_eq!(group_of(&t, "a"), Some(gid.as_str()));
    assert_eq!(group_of(&t, "b"), Some(gid.as_str()));
    assert_eq!(group_of(&t, "c"), None);
}

#[test]
fn group_single_element_is_noop() {
    let mut t = Template::with_elements(800.0, 600.0, vec![el("a", None), el("b", None)]);
    let sel = select(&t, &["a"]);
    assert!(group(&mut t, &sel).is_none());
    assert_eq!(group_of(&t, "a"), None);
}

#[test]
fn group_empty_selection_is_noop() {
    let mut t = Template::with_elements(800.0, 600.0, vec![el("a", None)]);
    assert!(group(&mut t, &Selection::new()).is_none());
}

#[test]
fn regroup_overwrites_previous_group() {
    let mut t = Template::with_elements(
        800.0,
        600.0,
        vec![el("a", Some("old")), el("b", Some("old")), el("c", Some("old")), el("d", None)],
    );
    // Clicking "a" selects the whole old group; add "d".
    let sel = select(&t, &["a", "d"]);
    let gid = group(&mut t, &sel).unwrap();
    for id in ["a", "b", "c", "d"] {
        assert_eq!(group_of(&t, id), Some(gid.as_str()), "{id}");
    }
}

#[test]
fn regroup_dissolves_orphaned_remainder() {
    let mut t = Template::with_elements(800.0, 600.0, vec![el("a", Some("old")), el("b", Some("old")), el("c", None)]);
    let mut sel = Selection::new();
    sel.select_only(&t, "a");
    sel.click(&t, "c", true);
    let gid = group(&mut t, &sel).unwrap();
    assert_eq!(group_of(&t, "a"), Some(gid.as_str()));
    assert_eq!(group_of(&t, "b"), None);
}

#[test]
fn fresh_group_ids_differ() {
    assert_ne!(new_group_id(), new_group_id());
}

// =============================================================
// ungroup
// =============================================================

#[test]
fn group_then_ungroup_leaves_attribute_absent() {
    let mut t = Template::with_elements(800.0, 600.0, vec![el("a", None), el("b", None)]);
    let sel = select(&t, &["a", "b"]);
    let gid = group(&mut t, &sel).unwrap();
    assert_eq!(ungroup(&mut t, &sel), 2);

    for id in ["a", "b"] {
        let value = serde_json::to_value(t.get(id).unwrap()).unwrap();
        assert!(value.get("groupId").is_none(), "{id} still serializes groupId");
        assert!(!value.to_string().contains(&gid));
    }
}

#[test]
fn ungroup_reaches_unselected_members() {
    let mut t = Template::with_elements(800.0, 600.0, vec![el("a", Some("g")), el("b", Some("g")), el("c", Some("h")), el("d", Some("h"))]);
    let mut sel = Selection::new();
    sel.select_only(&t, "a");
    assert_eq!(ungroup(&mut t, &sel), 2);
    assert_eq!(group_of(&t, "b"), None);
    assert_eq!(group_of(&t, "c"), Some("h"));
}

#[test]
fn ungroup_without_groups_is_noop() {
    let mut t = Template::with_elements(800.0, 600.0, vec![el("a", None), el("b", None)]);
    let sel = select(&t, &["a", "b"]);
    assert_eq!(ungroup(&mut t, &sel), 0);
}

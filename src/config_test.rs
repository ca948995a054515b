#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn default_matches_constants() {
    let config = EditorConfig::default();
    assert_eq!(config.grid_size, 20.0);
    assert_eq!(config.snap_threshold, 5.0);
    assert_eq!(config.min_width, 30.0);
    assert_eq!(config.min_height, 20.0);
    assert_eq!(config.history_limit, 50);
    assert_eq!(config.duplicate_offset, 20.0);
    assert_eq!(config.nudge_step, 1.0);
    assert_eq!(config.nudge_step_large, 10.0);
}

#[test]
fn empty_lookup_yields_defaults() {
    let config = EditorConfig::from_lookup(|_| None);
    assert_eq!(config, EditorConfig::default());
}

#[test]
fn lookup_overrides_known_keys() {
    let config = EditorConfig::from_lookup(lookup_from(&[
        ("CERTCANVAS_GRID_SIZE", "10"),
        ("CERTCANVAS_SNAP_THRESHOLD", " 8.5 "),
        ("CERTCANVAS_HISTORY_LIMIT", "5"),
        ("CERTCANVAS_DUPLICATE_OFFSET", "12"),
    ]));
    assert_eq!(config.grid_size, 10.0);
    assert_eq!(config.snap_threshold, 8.5);
    assert_eq!(config.history_limit, 5);
    assert_eq!(config.duplicate_offset, 12.0);
}

#[test]
fn unparsable_value_falls_back() {
    let config = EditorConfig::from_lookup(lookup_from(&[("CERTCANVAS_GRID_SIZE", "wide")]));
    assert_eq!(config.grid_size, 20.0);
}

#[test]
fn non_positive_value_falls_back() {
    let config = EditorConfig::from_lookup(lookup_from(&[
        ("CERTCANVAS_HISTORY_LIMIT", "0"),
        ("CERTCANVAS_SNAP_THRESHOLD", "-3"),
    ]));
    assert_eq!(config.history_limit, 50);
    assert_eq!(config.snap_threshold, 5.0);
}

#[test]
fn floors_are_not_environment_driven() {
    let config = EditorConfig::from_lookup(lookup_from(&[("CERTCANVAS_MIN_WIDTH", "1")]));
    assert_eq!(config.min_width, 30.0);
}

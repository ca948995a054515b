//! Group assignment across the selection.
//!
//! Groups are flat: grouping a selection stamps one fresh id on every member,
//! replacing whatever group each member belonged to before. Ungrouping strips
//! the id from every element of every group the selection touches, including
//! members outside the selection.

#[cfg(test)]
#[path = "grouping_test.rs"]
mod grouping_test;

use uuid::Uuid;

use crate::element::GroupId;
use crate::selection::Selection;
use crate::template::Template;

/// Generate a fresh group id.
#[must_use]
pub fn new_group_id() -> GroupId {
    format!("group-{}", Uuid::new_v4().simple())
}

/// Put every selected element into one new group.
///
/// Returns the new group id, or `None` when fewer than two selected elements
/// exist (a group of one is meaningless). Former groups left with a single
/// member are dissolved.
pub fn group(template: &mut Template, selection: &Selection) -> Option<GroupId> {
    let members: Vec<String> = selection.ids().into_iter().filter(|id| template.contains(id)).collect();
    if members.len() < 2 {
        return None;
    }

    let gid = new_group_id();
    for el in &mut template.elements {
        if members.contains(&el.id) {
            el.group_id = Some(gid.clone());
        }
    }
    template.normalize_groups();
    tracing::debug!(group_id = %gid, members = members.len(), "grouped elements");
    Some(gid)
}

/// Dissolve every group touched by the selection.
///
/// Returns the number of elements whose group id was removed.
pub fn ungroup(template: &mut Template, selection: &Selection) -> usize {
    let touched: Vec<GroupId> = selection
        .ids()
        .iter()
        .filter_map(|id| template.get(id).and_then(|el| el.group_id.clone()))
        .collect();
    if touched.is_empty() {
        return 0;
    }

    let mut cleared = 0;
    for el in &mut template.elements {
        if el.group_id.as_ref().is_some_and(|gid| touched.contains(gid)) {
            el.group_id = None;
            cleared += 1;
        }
    }
    tracing::debug!(groups = touched.len(), cleared, "ungrouped elements");
    cleared
}

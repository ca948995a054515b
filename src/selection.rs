//! Selection model: one primary element plus an ordered set of additional ones.
//!
//! DESIGN
//! ======
//! Selection works on *units*: a grouped element always brings its whole
//! group with it, so every selection produced by [`Selection::click`] is
//! group-closed. Additional ids keep insertion order, which makes primary
//! promotion after a toggle-off deterministic (first remaining id wins).
//! Unknown ids are ignored rather than reported.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use crate::element::ElementId;
use crate::template::Template;

/// The set of selected elements.
///
/// Invariant: `primary` never appears in `additional`, and `additional` holds
/// no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    primary: Option<ElementId>,
    additional: Vec<ElementId>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The element the inspector edits and the resize handle belongs to.
    #[must_use]
    pub fn primary(&self) -> Option<&str> {
        self.primary.as_deref()
    }

    /// Secondary selected ids, in the order they were added.
    #[must_use]
    pub fn additional(&self) -> &[ElementId] {
        &self.additional
    }

    /// All selected ids, primary first.
    #[must_use]
    pub fn ids(&self) -> Vec<ElementId> {
        self.primary.iter().chain(self.additional.iter()).cloned().collect()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.primary.as_deref() == Some(id) || self.additional.iter().any(|a| a == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.primary.is_some()) + self.additional.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.additional.is_empty()
    }

    /// Deselect everything (background click, Escape).
    pub fn clear(&mut self) {
        self.primary = None;
        self.additional.clear();
    }

    /// Replace the selection with exactly `id`, ignoring its group.
    ///
    /// Used when grabbing a resize handle. Unknown ids are ignored.
    pub fn select_only(&mut self, template: &Template, id: &str) {
        if !template.contains(id) {
            return;
        }
        self.primary = Some(id.to_string());
        self.additional.clear();
    }

    /// Apply a click on `id`. `additive` is the Shift-click behavior.
    ///
    /// - plain click: the clicked unit becomes the whole selection, clicked id primary.
    /// - additive, unit not yet selected: the unit is appended; primary is kept
    ///   if there was one, otherwise the clicked id becomes primary.
    /// - additive, unit overlaps the selection: the unit is removed; a removed
    ///   primary is replaced by the first remaining additional id.
    pub fn click(&mut self, template: &Template, id: &str, additive: bool) {
        let unit = template.selection_unit(id);
        if unit.is_empty() {
            return;
        }

        if !additive {
            self.primary = Some(id.to_string());
            self.additional = unit.into_iter().filter(|u| u != id).collect();
            return;
        }

        if unit.iter().any(|u| self.contains(u)) {
            self.remove_all(&unit);
            return;
        }

        if self.primary.is_none() {
            self.primary = Some(id.to_string());
        }
        for u in unit {
            if !self.contains(&u) {
                self.additional.push(u);
            }
        }
    }

    /// Drop ids that no longer exist in `template` (after delete or undo).
    pub fn retain_existing(&mut self, template: &Template) {
        self.additional.retain(|id| template.contains(id));
        if self.primary.as_deref().is_some_and(|p| !template.contains(p)) {
            self.primary = None;
            self.promote();
        }
    }

    /// Pull in the missing co-members of every selected element's group.
    ///
    /// Needed after undo/redo, when the restored template may regroup
    /// elements that were selected individually.
    pub fn close_over_groups(&mut self, template: &Template) {
        for id in self.ids() {
            for member in template.selection_unit(&id) {
                if !self.contains(&member) {
                    self.additional.push(member);
                }
            }
        }
    }

    fn remove_all(&mut self, ids: &[ElementId]) {
        self.additional.retain(|a| !ids.contains(a));
        if self.primary.as_ref().is_some_and(|p| ids.contains(p)) {
            self.primary = None;
            self.promote();
        }
    }

    fn promote(&mut self) {
        if self.primary.is_none() && !self.additional.is_empty() {
            self.primary = Some(self.additional.remove(0));
        }
    }
}

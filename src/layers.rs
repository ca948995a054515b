//! Paint-order operations on the template's element list.
//!
//! Each returns `true` when the order actually changed so callers only commit
//! real edits. Unknown ids and moves past either end are no-ops.

#[cfg(test)]
#[path = "layers_test.rs"]
mod layers_test;

use crate::template::Template;

/// Move an element to the top of the stack.
pub fn bring_to_front(template: &mut Template, id: &str) -> bool {
    let Some(idx) = template.index_of(id) else {
        return false;
    };
    if idx + 1 == template.elements.len() {
        return false;
    }
    let el = template.elements.remove(idx);
    template.elements.push(el);
    true
}

/// Move an element to the bottom of the stack.
pub fn send_to_back(template: &mut Template, id: &str) -> bool {
    let Some(idx) = template.index_of(id) else {
        return false;
    };
    if idx == 0 {
        return false;
    }
    let el = template.elements.remove(idx);
    template.elements.insert(0, el);
    true
}

/// Swap an element with the one above it.
pub fn move_up(template: &mut Template, id: &str) -> bool {
    let Some(idx) = template.index_of(id) else {
        return false;
    };
    if idx + 1 >= template.elements.len() {
        return false;
    }
    template.elements.swap(idx, idx + 1);
    true
}

/// Swap an element with the one below it.
pub fn move_down(template: &mut Template, id: &str) -> bool {
    let Some(idx) = template.index_of(id) else {
        return false;
    };
    if idx == 0 {
        return false;
    }
    template.elements.swap(idx, idx - 1);
    true
}

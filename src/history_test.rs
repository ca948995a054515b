use super::*;

// =============================================================
// Initial state
// =============================================================

#[test]
fn starts_with_single_entry() {
    let h = History::new(0, 50);
    assert_eq!(h.len(), 1);
    assert_eq!(h.index(), 0);
    assert!(!h.can_undo());
    assert!(!h.can_redo());
    assert_eq!(h.current(), Some(&0));
}

#[test]
fn zero_limit_is_raised_to_one() {
    let mut h = History::new(0, 0);
    h.commit(1);
    assert_eq!(h.limit(), 1);
    assert_eq!(h.len(), 1);
    assert_eq!(h.current(), Some(&1));
}

// =============================================================
// Commit / undo / redo
// =============================================================

#[test]
fn commit_advances_cursor() {
    let mut h = History::new(0, 50);
    h.commit(1);
    h.commit(2);
    assert_eq!(h.index(), 2);
    assert!(h.can_undo());
    assert!(!h.can_redo());
}

#[test]
fn undo_returns_previous_entry() {
    let mut h = History::new(0, 50);
    h.commit(1);
    h.commit(2);
    assert_eq!(h.undo(), Some(&1));
    assert_eq!(h.undo(), Some(&0));
    assert_eq!(h.undo(), None);
    assert_eq!(h.index(), 0);
}

#[test]
fn redo_returns_next_entry() {
    let mut h = History::new(0, 50);
    h.commit(1);
    h.commit(2);
    h.undo();
    h.undo();
    assert_eq!(h.redo(), Some(&1));
    assert_eq!(h.redo(), Some(&2));
    assert_eq!(h.redo(), None);
    assert_eq!(h.index(), 2);
}

#[test]
fn commit_after_undo_discards_redo_tail() {
    let mut h = History::new(0, 50);
    h.commit(1);
    h.commit(2);
    h.undo();
    h.commit(3);
    assert_eq!(h.len(), 3);
    assert!(!h.can_redo());
    assert_eq!(h.undo(), Some(&1));
    assert_eq!(h.redo(), Some(&3));
}

#[test]
fn undo_then_redo_round_trip() {
    let mut h = History::new(String::from("s0"), 50);
    for i in 1..=7 {
        h.commit(format!("s{i}"));
    }
    let top = h.current().cloned();
    for _ in 0..7 {
        assert!(h.undo().is_some());
    }
    assert_eq!(h.current().map(String::as_str), Some("s0"));
    for _ in 0..7 {
        assert!(h.redo().is_some());
    }
    assert_eq!(h.current().cloned(), top);
}

// =============================================================
// Bound
// =============================================================

#[test]
fn sixty_commits_keep_fifty_entries() {
    let mut h = History::new(0, 50);
    for i in 1..=60 {
        h.commit(i);
    }
    assert_eq!(h.len(), 50);
    assert_eq!(h.index(), 49);
    assert_eq!(h.current(), Some(&60));
    // Initial entry plus commits 1..=10 were evicted; the oldest survivor is 11.
    let mut oldest = None;
    while let Some(v) = h.undo() {
        oldest = Some(*v);
    }
    assert_eq!(oldest, Some(11));
}

#[test]
fn eviction_after_undo_keeps_cursor_on_newest() {
    let mut h = History::new(0, 3);
    h.commit(1);
    h.commit(2);
    h.undo();
    h.commit(3);
    h.commit(4);
    assert_eq!(h.len(), 3);
    assert_eq!(h.index(), 2);
    assert_eq!(h.current(), Some(&4));
}

#[test]
fn reset_discards_everything() {
    let mut h = History::new(0, 50);
    h.commit(1);
    h.reset(9);
    assert_eq!(h.len(), 1);
    assert_eq!(h.current(), Some(&9));
    assert!(!h.can_undo());
}

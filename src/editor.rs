use std::collections::HashMap;

use crate::config::EditorConfig;
use crate::element::{Element, ElementId, ElementPatch, ElementType, GroupId};
use crate::geometry::{DragInput, Guides, compute_drag, compute_resize};
use crate::grouping;
use crate::history::History;
use crate::hit::{HitPart, hit_test};
use crate::input::{FocusTarget, InputState, Key, Modifiers, Nudge, Shortcut};
use crate::layers;
use crate::selection::Selection;
use crate::template::Template;
use crate::viewport::{Point, Viewport};

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Template, selection or guides changed; repaint.
    RenderNeeded,
    /// The selected set changed; refresh the inspector.
    SelectionChanged,
    /// A new history entry was recorded.
    Committed,
    /// The user asked to save; the host persists [`EditorCore::snapshot`].
    SaveRequested,
}

/// The editor: owns the template, selection, undo log and gesture state.
///
/// Every mutation goes through this type, which decides when a change becomes
/// an undoable history entry. Live updates (pointer-move, inspector typing)
/// touch only the template; commits copy it into the history log.
pub struct EditorCore {
    template: Template,
    selection: Selection,
    history: History<Template>,
    input: InputState,
    guides: Guides,
    viewport: Viewport,
    config: EditorConfig,
    snap_to_grid: bool,
    lock_aspect: bool,
}

impl Default for EditorCore {
    fn default() -> Self {
        Self::new(Template::default(), EditorConfig::default())
    }
}

impl EditorCore {
    /// Start editing `template`. The initial state is history entry 0.
    #[must_use]
    pub fn new(template: Template, config: EditorConfig) -> Self {
        let viewport = Viewport::identity(template.width);
        Self {
            history: History::new(template.clone(), config.history_limit),
            template,
            selection: Selection::new(),
            input: InputState::Idle,
            guides: Guides::default(),
            viewport,
            config,
            snap_to_grid: false,
            lock_aspect: false,
        }
    }

    /// Replace the template being edited, discarding history and selection.
    pub fn load_template(&mut self, template: Template) {
        self.history.reset(template.clone());
        self.viewport = Viewport::new(self.viewport.rendered_width_px, template.width);
        self.template = template;
        self.selection.clear();
        self.input = InputState::Idle;
        self.guides.clear();
        tracing::debug!(id = %self.template.id, elements = self.template.len(), "template loaded");
    }

    // --- Settings ---

    /// Update the on-screen canvas width used to convert pointer deltas.
    pub fn set_rendered_width(&mut self, rendered_width_px: f64) {
        self.viewport = Viewport::new(rendered_width_px, self.template.width);
    }

    pub fn set_snap_to_grid(&mut self, enabled: bool) {
        self.snap_to_grid = enabled;
    }

    /// Keep width/height proportional during every resize (Shift does the same per gesture).
    pub fn set_lock_aspect(&mut self, enabled: bool) {
        self.lock_aspect = enabled;
    }

    // --- Queries ---

    #[must_use]
    pub fn template(&self) -> &Template {
        &self.template
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Alignment guides to draw for the current drag step.
    #[must_use]
    pub fn guides(&self) -> &Guides {
        &self.guides
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn snap_to_grid(&self) -> bool {
        self.snap_to_grid
    }

    #[must_use]
    pub fn input_state(&self) -> &InputState {
        &self.input
    }

    #[must_use]
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.template.get(id)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn history_index(&self) -> usize {
        self.history.index()
    }

    #[must_use]
    pub fn is_gesture_active(&self) -> bool {
        self.input.is_active()
    }

    /// Saving, thumbnailing and export must wait until no gesture is in flight.
    #[must_use]
    pub fn can_export(&self) -> bool {
        !self.is_gesture_active()
    }

    /// A deep copy of the template for saving or rasterizing. `None` mid-gesture.
    #[must_use]
    pub fn snapshot(&self) -> Option<Template> {
        self.can_export().then(|| self.template.clone())
    }

    // --- History ---

    /// Record the current template as a new undo entry.
    pub fn commit(&mut self) {
        self.history.commit(self.template.clone());
        tracing::debug!(index = self.history.index(), len = self.history.len(), "history commit");
    }

    /// Step back one entry. Returns the restored template, or `None` when there
    /// is nothing to undo or a gesture is in progress.
    pub fn undo(&mut self) -> Option<&Template> {
        if self.is_gesture_active() {
            return None;
        }
        let restored = self.history.undo()?.clone();
        self.restore(restored);
        tracing::debug!(index = self.history.index(), "undo");
        Some(&self.template)
    }

    /// Step forward one entry. Returns the restored template, or `None` when
    /// there is nothing to redo or a gesture is in progress.
    pub fn redo(&mut self) -> Option<&Template> {
        if self.is_gesture_active() {
            return None;
        }
        let restored = self.history.redo()?.clone();
        self.restore(restored);
        tracing::debug!(index = self.history.index(), "redo");
        Some(&self.template)
    }

    fn restore(&mut self, template: Template) {
        self.template = template;
        self.selection.retain_existing(&self.template);
        self.selection.close_over_groups(&self.template);
        self.guides.clear();
    }

    // --- Element operations ---

    /// Create an element of `ty` centered on the canvas, select it and commit.
    pub fn add_element(&mut self, ty: ElementType, overrides: &ElementPatch) -> ElementId {
        let mut element = Element::create(ty, overrides, self.template.width, self.template.height);
        element.clamp_size(self.config.min_width, self.config.min_height);
        let id = self.template.push(element);
        self.selection.select_only(&self.template, &id);
        tracing::debug!(%id, kind = ty.as_str(), "element added");
        self.commit();
        id
    }

    /// Apply a live, uncommitted update. The caller decides when to [`commit`](Self::commit).
    ///
    /// Returns `false` for unknown ids or when nothing changed.
    pub fn update_element(&mut self, id: &str, patch: &ElementPatch) -> bool {
        let (min_w, min_h) = (self.config.min_width, self.config.min_height);
        let Some(el) = self.template.get_mut(id) else {
            return false;
        };
        let before = (el.width, el.height);
        let mut changed = patch.apply(el);
        if (el.width, el.height) != before {
            el.clamp_size(min_w, min_h);
            changed = true;
        }
        changed
    }

    /// Delete one element and commit.
    pub fn delete_element(&mut self, id: &str) -> bool {
        if self.template.remove(id).is_none() {
            return false;
        }
        self.after_delete(1);
        true
    }

    /// Delete every selected element and commit once. Returns how many were removed.
    pub fn delete_selection(&mut self) -> usize {
        let ids = self.selection.ids();
        let removed = ids.iter().filter(|id| self.template.remove(id).is_some()).count();
        if removed > 0 {
            self.after_delete(removed);
        }
        removed
    }

    fn after_delete(&mut self, removed: usize) {
        self.template.normalize_groups();
        self.selection.retain_existing(&self.template);
        tracing::debug!(removed, "elements deleted");
        self.commit();
    }

    /// Copy an element, offset it, put it on top, select it and commit.
    ///
    /// The copy does not join the original's group.
    pub fn duplicate_element(&mut self, id: &str) -> Option<ElementId> {
        let copy = self.offset_copy(id)?;
        let new_id = self.template.push(copy);
        self.selection.select_only(&self.template, &new_id);
        self.commit();
        Some(new_id)
    }

    /// Duplicate the whole selection and select the copies.
    ///
    /// Copies of elements that shared a group share a new group of their own.
    pub fn duplicate_selection(&mut self) -> Vec<ElementId> {
        let mut regroup: HashMap<GroupId, GroupId> = HashMap::new();
        let mut copies = Vec::new();
        for id in self.selection.ids() {
            let Some(mut copy) = self.offset_copy(&id) else {
                continue;
            };
            if let Some(old) = self.template.get(&id).and_then(|el| el.group_id.clone()) {
                copy.group_id = Some(regroup.entry(old).or_insert_with(grouping::new_group_id).clone());
            }
            copies.push(copy);
        }
        if copies.is_empty() {
            return Vec::new();
        }

        let new_ids: Vec<ElementId> = copies.into_iter().map(|c| self.template.push(c)).collect();
        self.template.normalize_groups();
        self.selection.clear();
        for (i, id) in new_ids.iter().enumerate() {
            if !self.selection.contains(id) {
                self.selection.click(&self.template, id, i > 0);
            }
        }
        self.commit();
        new_ids
    }

    fn offset_copy(&self, id: &str) -> Option<Element> {
        let mut copy = self.template.get(id)?.clone();
        copy.id = crate::element::new_element_id();
        copy.group_id = None;
        copy.x += self.config.duplicate_offset;
        copy.y += self.config.duplicate_offset;
        Some(copy)
    }

    /// Move every selected element by `delta` design units and commit.
    pub fn nudge_selection(&mut self, delta: Point) -> bool {
        let ids = self.selection.ids();
        let mut moved = false;
        for el in self.template.elements.iter_mut().filter(|el| ids.contains(&el.id)) {
            el.x += delta.x;
            el.y += delta.y;
            moved = true;
        }
        if moved {
            self.commit();
        }
        moved
    }

    // --- Canvas settings ---

    /// Change the canvas background color and commit.
    pub fn set_background_color(&mut self, color: &str) -> bool {
        if self.template.background_color == color {
            return false;
        }
        self.template.background_color = color.to_string();
        self.commit();
        true
    }

    /// Set or clear the background image URL (already uploaded) and commit.
    pub fn set_background_image(&mut self, url: Option<String>) -> bool {
        if self.template.background_image == url {
            return false;
        }
        self.template.background_image = url;
        self.commit();
        true
    }

    /// Store a rendered preview. Not an edit, so nothing is committed.
    pub fn set_thumbnail(&mut self, thumbnail: Option<String>) {
        self.template.thumbnail = thumbnail;
    }

    // --- Layers ---

    pub fn bring_to_front(&mut self, id: &str) -> bool {
        self.reorder(id, layers::bring_to_front, "bring to front")
    }

    pub fn send_to_back(&mut self, id: &str) -> bool {
        self.reorder(id, layers::send_to_back, "send to back")
    }

    pub fn move_layer_up(&mut self, id: &str) -> bool {
        self.reorder(id, layers::move_up, "move up")
    }

    pub fn move_layer_down(&mut self, id: &str) -> bool {
        self.reorder(id, layers::move_down, "move down")
    }

    fn reorder(&mut self, id: &str, op: fn(&mut Template, &str) -> bool, label: &'static str) -> bool {
        if !op(&mut self.template, id) {
            return false;
        }
        tracing::debug!(%id, op = label, "layer reordered");
        self.commit();
        true
    }

    // --- Groups ---

    /// Group the current selection and commit. `None` if fewer than two elements are selected.
    pub fn group(&mut self) -> Option<GroupId> {
        let gid = grouping::group(&mut self.template, &self.selection)?;
        self.commit();
        Some(gid)
    }

    /// Ungroup every group the selection touches and commit.
    pub fn ungroup(&mut self) -> usize {
        let cleared = grouping::ungroup(&mut self.template, &self.selection);
        if cleared > 0 {
            self.commit();
        }
        cleared
    }

    // --- Selection ---

    /// Select as if the element were clicked (layers panel, tests).
    pub fn select(&mut self, id: &str, additive: bool) {
        self.selection.click(&self.template, id, additive);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // --- Pointer input ---

    /// Dispatch a pointer-down at a canvas-relative screen point by hit-testing.
    pub fn on_pointer_down(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        let design_pt = self.viewport.screen_to_design(screen_pt);
        let radius = self.viewport.screen_dist_to_design(self.config.handle_radius_px);
        match hit_test(&self.template, design_pt, self.selection.primary(), radius) {
            Some(hit) if hit.part == HitPart::ResizeHandle => self.on_handle_pointer_down(&hit.element_id, screen_pt),
            Some(hit) => self.on_element_pointer_down(&hit.element_id, screen_pt, modifiers),
            None => self.on_canvas_pointer_down(),
        }
    }

    /// Pointer-down on the empty canvas: deselect.
    pub fn on_canvas_pointer_down(&mut self) -> Vec<Action> {
        let mut actions = self.end_stale_gesture();
        if !self.selection.is_empty() {
            self.selection.clear();
            actions.extend([Action::SelectionChanged, Action::RenderNeeded]);
        }
        actions
    }

    /// Pointer-down on an element body: resolve the selection and start dragging it.
    pub fn on_element_pointer_down(&mut self, id: &str, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = self.end_stale_gesture();
        if !self.template.contains(id) {
            return actions;
        }
        self.selection.click(&self.template, id, modifiers.shift);
        actions.extend([Action::SelectionChanged, Action::RenderNeeded]);

        // Shift-click that toggled the element off: nothing to drag.
        if !self.selection.contains(id) {
            return actions;
        }

        let ids = self.selection.ids();
        let initial_positions: HashMap<ElementId, Point> = self
            .template
            .elements
            .iter()
            .filter(|el| ids.contains(&el.id))
            .map(|el| (el.id.clone(), Point::new(el.x, el.y)))
            .collect();
        tracing::debug!(%id, count = initial_positions.len(), "drag start");
        self.input =
            InputState::Dragging { primary_id: id.to_string(), start_screen: screen_pt, initial_positions, moved: false };
        actions
    }

    /// Pointer-down on an element's resize handle: select only it and start resizing.
    pub fn on_handle_pointer_down(&mut self, id: &str, _screen_pt: Point) -> Vec<Action> {
        let mut actions = self.end_stale_gesture();
        let Some(el) = self.template.get(id) else {
            return actions;
        };
        let start_aspect = if el.height > 0.0 { el.width / el.height } else { 1.0 };
        let (start_width, start_height) = (el.width, el.height);
        self.selection.select_only(&self.template, id);
        tracing::debug!(%id, "resize start");
        self.input = InputState::Resizing { id: id.to_string(), start_aspect, start_width, start_height, moved: false };
        actions.extend([Action::SelectionChanged, Action::RenderNeeded]);
        actions
    }

    /// A pointer-down while a gesture is still open means its pointer-up was
    /// lost (released outside the window). Finish it as a release would.
    fn end_stale_gesture(&mut self) -> Vec<Action> {
        if !self.input.is_active() {
            return Vec::new();
        }
        tracing::debug!("pointer-down during open gesture; ending it");
        self.on_pointer_up()
    }

    /// Pointer-move: live, uncommitted update of the active gesture.
    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        match &mut self.input {
            InputState::Idle => Vec::new(),
            InputState::Dragging { primary_id, start_screen, initial_positions, moved } => {
                let delta = self.viewport.screen_delta_to_design(screen_pt - *start_screen);
                let others: Vec<Point> = self
                    .template
                    .elements
                    .iter()
                    .filter(|el| !initial_positions.contains_key(&el.id))
                    .map(|el| Point::new(el.x, el.y))
                    .collect();
                let result = compute_drag(&DragInput {
                    initial_positions: &*initial_positions,
                    primary_id: primary_id.as_str(),
                    delta,
                    others: &others,
                    snap_to_grid: self.snap_to_grid,
                    canvas_width: self.template.width,
                    canvas_height: self.template.height,
                    config: &self.config,
                });
                for el in &mut self.template.elements {
                    if let Some(p) = result.positions.get(&el.id) {
                        el.x = p.x;
                        el.y = p.y;
                    }
                }
                *moved = result.delta != Point::default();
                self.guides = result.guides;
                vec![Action::RenderNeeded]
            }
            InputState::Resizing { id, start_aspect, start_width, start_height, moved } => {
                let cursor = self.viewport.screen_to_design(screen_pt);
                let Some(el) = self.template.get_mut(id) else {
                    return Vec::new();
                };
                let size = compute_resize(el, cursor, self.lock_aspect || modifiers.shift, *start_aspect, &self.config);
                el.width = size.width;
                el.height = size.height;
                *moved = (size.width, size.height) != (*start_width, *start_height);
                vec![Action::RenderNeeded]
            }
        }
    }

    /// Pointer-up: end the gesture, committing if anything moved.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        let moved = match std::mem::take(&mut self.input) {
            InputState::Idle => return Vec::new(),
            InputState::Dragging { moved, .. } | InputState::Resizing { moved, .. } => moved,
        };
        self.guides.clear();
        if moved {
            self.commit();
            tracing::debug!("gesture committed");
            vec![Action::Committed, Action::RenderNeeded]
        } else {
            vec![Action::RenderNeeded]
        }
    }

    /// Pointer left the canvas mid-gesture: same as releasing it.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.on_pointer_up()
    }

    // --- Keyboard input ---

    /// Handle a key press. Ignored while focus is in editable text or a gesture is active.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers, focus: FocusTarget) -> Vec<Action> {
        if self.is_gesture_active() {
            return Vec::new();
        }
        let Some(shortcut) = Shortcut::resolve(key, modifiers, focus) else {
            return Vec::new();
        };
        self.run_shortcut(shortcut)
    }

    /// Execute a resolved shortcut.
    pub fn run_shortcut(&mut self, shortcut: Shortcut) -> Vec<Action> {
        let changed = match shortcut {
            Shortcut::Save => return vec![Action::SaveRequested],
            Shortcut::ClearSelection => {
                if self.selection.is_empty() {
                    return Vec::new();
                }
                self.selection.clear();
                return vec![Action::SelectionChanged, Action::RenderNeeded];
            }
            Shortcut::Undo => self.undo().is_some(),
            Shortcut::Redo => self.redo().is_some(),
            Shortcut::Duplicate => !self.duplicate_selection().is_empty(),
            Shortcut::Group => self.group().is_some(),
            Shortcut::Ungroup => self.ungroup() > 0,
            Shortcut::Delete => self.delete_selection() > 0,
            Shortcut::Nudge { direction, large } => self.nudge(direction, large),
        };
        if changed { vec![Action::SelectionChanged, Action::RenderNeeded] } else { Vec::new() }
    }

    fn nudge(&mut self, direction: Nudge, large: bool) -> bool {
        let step = if large { self.config.nudge_step_large } else { self.config.nudge_step };
        let unit = direction.unit();
        self.nudge_selection(Point::new(unit.x * step, unit.y * step))
    }
}

//! Browser glue: binds an [`EditorCore`] to a canvas element and the window's
//! keyboard.
//!
//! The host UI renders elements itself and forwards pointer events here in
//! client coordinates. Keyboard shortcuts are delivered through a
//! [`KeyboardSubscription`] whose lifetime is the listener's lifetime.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, Window};

use crate::config::EditorConfig;
use crate::editor::{Action, EditorCore};
use crate::input::{FocusTarget, Key, Modifiers};
use crate::template::Template;
use crate::viewport::Point;

/// The editor bound to a browser canvas. Wraps a shared [`EditorCore`].
pub struct Editor {
    canvas: HtmlCanvasElement,
    core: Rc<RefCell<EditorCore>>,
}

impl Editor {
    /// Create an editor for `template` drawn into `canvas`.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, template: Template, config: EditorConfig) -> Self {
        let editor = Self { canvas, core: Rc::new(RefCell::new(EditorCore::new(template, config))) };
        editor.sync_viewport();
        editor
    }

    /// Shared handle to the core for UI panels (inspector, layers list).
    #[must_use]
    pub fn core(&self) -> Rc<RefCell<EditorCore>> {
        Rc::clone(&self.core)
    }

    /// Re-read the canvas's on-screen width. Call after layout changes.
    pub fn sync_viewport(&self) {
        let width = f64::from(self.canvas.client_width());
        self.core.borrow_mut().set_rendered_width(width);
    }

    /// Convert client coordinates to a point relative to the canvas's top-left corner.
    #[must_use]
    pub fn canvas_point(&self, client_x: f64, client_y: f64) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        Point::new(client_x - rect.left(), client_y - rect.top())
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&self, client_x: f64, client_y: f64, modifiers: Modifiers) -> Vec<Action> {
        let pt = self.canvas_point(client_x, client_y);
        self.core.borrow_mut().on_pointer_down(pt, modifiers)
    }

    pub fn on_pointer_move(&self, client_x: f64, client_y: f64, modifiers: Modifiers) -> Vec<Action> {
        let pt = self.canvas_point(client_x, client_y);
        self.core.borrow_mut().on_pointer_move(pt, modifiers)
    }

    pub fn on_pointer_up(&self) -> Vec<Action> {
        self.core.borrow_mut().on_pointer_up()
    }

    pub fn on_pointer_leave(&self) -> Vec<Action> {
        self.core.borrow_mut().on_pointer_leave()
    }

    // --- Keyboard ---

    /// Listen for shortcuts on `window`. `on_actions` runs after the core has
    /// handled a key, with the core no longer borrowed.
    ///
    /// The listener is removed when the returned subscription is dropped.
    ///
    /// # Errors
    ///
    /// Returns the browser's exception if the listener cannot be attached.
    pub fn bind_keyboard<F>(&self, window: Window, mut on_actions: F) -> Result<KeyboardSubscription, JsValue>
    where
        F: FnMut(&[Action]) + 'static,
    {
        let core = Rc::clone(&self.core);
        let document = window.document();
        let callback = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            let focus = document.as_ref().map_or(FocusTarget::Canvas, focus_target);
            let modifiers = Modifiers {
                shift: event.shift_key(),
                ctrl: event.ctrl_key(),
                alt: event.alt_key(),
                meta: event.meta_key(),
            };
            let actions = core.borrow_mut().on_key_down(&Key(event.key()), modifiers, focus);
            if actions.is_empty() {
                return;
            }
            event.prevent_default();
            on_actions(&actions);
        });
        window.add_event_listener_with_callback("keydown", callback.as_ref().unchecked_ref())?;
        tracing::debug!("keyboard listener attached");
        Ok(KeyboardSubscription { window, callback })
    }
}

/// A live `keydown` listener. Dropping it detaches the listener.
pub struct KeyboardSubscription {
    window: Window,
    callback: Closure<dyn FnMut(KeyboardEvent)>,
}

impl Drop for KeyboardSubscription {
    fn drop(&mut self) {
        if let Err(err) = self.window.remove_event_listener_with_callback("keydown", self.callback.as_ref().unchecked_ref()) {
            tracing::warn!(?err, "failed to detach keyboard listener");
        } else {
            tracing::debug!("keyboard listener detached");
        }
    }
}

/// Where keyboard focus sits: text fields and content-editable nodes swallow shortcuts.
fn focus_target(document: &Document) -> FocusTarget {
    let Some(active) = document.active_element() else {
        return FocusTarget::Canvas;
    };
    if matches!(active.tag_name().to_ascii_uppercase().as_str(), "INPUT" | "TEXTAREA" | "SELECT") {
        return FocusTarget::Editable;
    }
    match active.dyn_ref::<HtmlElement>() {
        Some(el) if el.is_content_editable() => FocusTarget::Editable,
        _ => FocusTarget::Canvas,
    }
}

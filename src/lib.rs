//! Editing core for certificate templates.
//!
//! A template is a fixed-size page (A4 by default) holding a z-ordered list
//! of positioned elements: text, images, shapes, icons, QR codes and
//! placeholders for per-recipient data. This crate owns everything about
//! editing that list: selection, drag with alignment snapping, resize,
//! grouping, layer order and a bounded undo log. Rendering is left to the
//! host, which forwards input and repaints when told to by an
//! [`editor::Action`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`editor`] | [`editor::EditorCore`], the single owner of editor state |
//! | [`template`] | The document: page size, background, element list |
//! | [`element`] | Element variants, defaults and partial updates |
//! | [`selection`] | Primary plus additional selection, group-closed |
//! | [`history`] | Bounded snapshot undo/redo log |
//! | [`geometry`] | Drag snapping, guides, resize math |
//! | [`hit`] | Hit-testing bodies and the resize handle |
//! | [`grouping`] | Group and ungroup |
//! | [`layers`] | Paint-order moves |
//! | [`input`] | Modifiers, keyboard shortcuts, gesture state |
//! | [`viewport`] | Screen to design-unit conversion |
//! | [`web`] | Browser canvas and keyboard binding |
//! | [`config`] | Tunables with environment overrides |
//! | [`consts`] | Default sizes and thresholds |

pub mod config;
pub mod consts;
pub mod editor;
pub mod element;
pub mod geometry;
pub mod grouping;
pub mod history;
pub mod hit;
pub mod input;
pub mod layers;
pub mod selection;
pub mod template;
pub mod viewport;
pub mod web;

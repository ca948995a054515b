//! Line-delimited JSON edit scripts replayed through the editor.
//!
//! Each non-empty line is one command tagged by `"op"`, e.g.
//! `{"op":"add","element":"shape","alias":"box","patch":{"width":100}}`.
//! Element ids are random, so `add` and `duplicate` may bind an alias that
//! later commands use in place of the real id. Lines starting with `#` are
//! comments.

use std::collections::HashMap;

use certcanvas::editor::{Action, EditorCore};
use certcanvas::element::{ElementId, ElementPatch, ElementType};
use certcanvas::input::Modifiers;
use certcanvas::viewport::Point;
use serde::Deserialize;

use crate::CliError;

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

/// One scripted editor command.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum ScriptCommand {
    Add {
        element: ElementType,
        #[serde(default)]
        patch: ElementPatch,
        #[serde(default)]
        alias: Option<String>,
    },
    Update {
        id: String,
        patch: ElementPatch,
    },
    Commit,
    Delete {
        id: String,
    },
    Duplicate {
        id: String,
        #[serde(default)]
        alias: Option<String>,
    },
    Front {
        id: String,
    },
    Back {
        id: String,
    },
    Up {
        id: String,
    },
    Down {
        id: String,
    },
    Select {
        id: String,
        #[serde(default)]
        additive: bool,
    },
    Clear,
    Group,
    Ungroup,
    /// Press on the element's center, move by `(dx, dy)` design units, release.
    Drag {
        id: String,
        dx: f64,
        dy: f64,
        #[serde(default)]
        grid: bool,
    },
    Undo,
    Redo,
}

/// Parse one script line. Blank lines and `#` comments yield `None`.
///
/// # Errors
///
/// Returns [`CliError::Script`] when the line is not a known command.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<ScriptCommand>, CliError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some).map_err(|source| CliError::Script { line: line_no, source })
}

/// Parse a whole script.
///
/// # Errors
///
/// Stops at the first malformed line.
pub fn parse_script(text: &str) -> Result<Vec<(usize, ScriptCommand)>, CliError> {
    let mut commands = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(cmd) = parse_line(idx + 1, line)? {
            commands.push((idx + 1, cmd));
        }
    }
    Ok(commands)
}

/// Replays commands against an editor, tracking aliases.
pub struct Replay {
    core: EditorCore,
    aliases: HashMap<String, ElementId>,
    skipped: usize,
}

impl Replay {
    #[must_use]
    pub fn new(core: EditorCore) -> Self {
        Self { core, aliases: HashMap::new(), skipped: 0 }
    }

    #[must_use]
    pub fn core(&self) -> &EditorCore {
        &self.core
    }

    #[must_use]
    pub fn into_core(self) -> EditorCore {
        self.core
    }

    /// Commands that referenced missing elements or changed nothing.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn resolve(&self, id: &str) -> ElementId {
        self.aliases.get(id).cloned().unwrap_or_else(|| id.to_string())
    }

    fn bind(&mut self, alias: Option<String>, id: &ElementId) {
        if let Some(alias) = alias {
            self.aliases.insert(alias, id.clone());
        }
    }

    /// Apply one command. No-ops are counted, not treated as errors.
    pub fn apply(&mut self, line: usize, cmd: ScriptCommand) {
        let applied = match cmd {
            ScriptCommand::Add { element, patch, alias } => {
                let id = self.core.add_element(element, &patch);
                self.bind(alias, &id);
                true
            }
            ScriptCommand::Update { id, patch } => {
                let id = self.resolve(&id);
                self.core.update_element(&id, &patch)
            }
            ScriptCommand::Commit => {
                self.core.commit();
                true
            }
            ScriptCommand::Delete { id } => {
                let id = self.resolve(&id);
                self.core.delete_element(&id)
            }
            ScriptCommand::Duplicate { id, alias } => {
                let id = self.resolve(&id);
                match self.core.duplicate_element(&id) {
                    Some(copy) => {
                        self.bind(alias, &copy);
                        true
                    }
                    None => false,
                }
            }
            ScriptCommand::Front { id } => {
                let id = self.resolve(&id);
                self.core.bring_to_front(&id)
            }
            ScriptCommand::Back { id } => {
                let id = self.resolve(&id);
                self.core.send_to_back(&id)
            }
            ScriptCommand::Up { id } => {
                let id = self.resolve(&id);
                self.core.move_layer_up(&id)
            }
            ScriptCommand::Down { id } => {
                let id = self.resolve(&id);
                self.core.move_layer_down(&id)
            }
            ScriptCommand::Select { id, additive } => {
                let id = self.resolve(&id);
                self.core.select(&id, additive);
                self.core.template().contains(&id)
            }
            ScriptCommand::Clear => {
                self.core.clear_selection();
                true
            }
            ScriptCommand::Group => self.core.group().is_some(),
            ScriptCommand::Ungroup => self.core.ungroup() > 0,
            ScriptCommand::Drag { id, dx, dy, grid } => {
                let id = self.resolve(&id);
                self.drag(&id, Point::new(dx, dy), grid)
            }
            ScriptCommand::Undo => self.core.undo().is_some(),
            ScriptCommand::Redo => self.core.redo().is_some(),
        };
        if !applied {
            self.skipped += 1;
            tracing::warn!(line, "command had no effect");
        }
    }

    fn drag(&mut self, id: &str, delta: Point, grid: bool) -> bool {
        let Some(el) = self.core.element(id) else {
            return false;
        };
        // The replay editor keeps a 1:1 viewport, so design units are screen pixels.
        let start = Point::new(el.x, el.y);
        self.core.set_snap_to_grid(grid);
        self.core.on_element_pointer_down(id, start, Modifiers::default());
        self.core.on_pointer_move(start + delta, Modifiers::default());
        let committed = self.core.on_pointer_up().contains(&Action::Committed);
        self.core.set_snap_to_grid(false);
        committed
    }
}

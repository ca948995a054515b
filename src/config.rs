//! Editor tuning parameters.
//!
//! DESIGN
//! ======
//! Every numeric knob the editor consults lives in [`EditorConfig`] so hosts
//! can override it without touching code. Defaults come from [`crate::consts`].
//! Environment overrides follow the same rule everywhere: an unset, unparsable
//! or non-positive value falls back to the default instead of failing.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::str::FromStr;

use crate::consts::{
    DUPLICATE_OFFSET, GRID_SIZE, HANDLE_RADIUS_PX, HISTORY_LIMIT, MIN_ELEMENT_HEIGHT, MIN_ELEMENT_WIDTH, NUDGE_STEP,
    NUDGE_STEP_LARGE, SNAP_THRESHOLD,
};

/// Numeric parameters for snapping, sizing, history and keyboard nudging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    /// Grid pitch used by snap-to-grid mode.
    pub grid_size: f64,
    /// Alignment-guide pull distance (exclusive).
    pub snap_threshold: f64,
    /// Width floor enforced by resize.
    pub min_width: f64,
    /// Height floor enforced by resize.
    pub min_height: f64,
    /// Maximum number of history snapshots.
    pub history_limit: usize,
    /// Offset applied to duplicated elements.
    pub duplicate_offset: f64,
    /// Arrow-key nudge distance.
    pub nudge_step: f64,
    /// Arrow-key nudge distance with Shift.
    pub nudge_step_large: f64,
    /// Resize handle hit radius in screen pixels.
    pub handle_radius_px: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            snap_threshold: SNAP_THRESHOLD,
            min_width: MIN_ELEMENT_WIDTH,
            min_height: MIN_ELEMENT_HEIGHT,
            history_limit: HISTORY_LIMIT,
            duplicate_offset: DUPLICATE_OFFSET,
            nudge_step: NUDGE_STEP,
            nudge_step_large: NUDGE_STEP_LARGE,
            handle_radius_px: HANDLE_RADIUS_PX,
        }
    }
}

impl EditorConfig {
    /// Build config from process environment variables.
    ///
    /// Optional:
    /// - `CERTCANVAS_GRID_SIZE`: default 20
    /// - `CERTCANVAS_SNAP_THRESHOLD`: default 5
    /// - `CERTCANVAS_HISTORY_LIMIT`: default 50
    /// - `CERTCANVAS_DUPLICATE_OFFSET`: default 20
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Some(value),
            Err(_) => None,
        })
    }

    /// Build config from an arbitrary key lookup (environment, query string, test map).
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            grid_size: positive(&lookup, "CERTCANVAS_GRID_SIZE", defaults.grid_size),
            snap_threshold: positive(&lookup, "CERTCANVAS_SNAP_THRESHOLD", defaults.snap_threshold),
            history_limit: positive(&lookup, "CERTCANVAS_HISTORY_LIMIT", defaults.history_limit),
            duplicate_offset: positive(&lookup, "CERTCANVAS_DUPLICATE_OFFSET", defaults.duplicate_offset),
            ..defaults
        }
    }
}

fn positive<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialOrd + Default,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) if value > T::default() => value,
        _ => default,
    }
}

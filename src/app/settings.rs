//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and UI renderers consume the same source of truth without cross-importing.

use super::state::{ActiveView, AppState};
use crate::config::{FPS_CHOICES, WHEEL_STEP_CHOICES};

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Opens a submenu.
    Submenu {
        label: &'static str,
        view: ActiveView,
    },
    /// Boolean toggle — reads/writes via accessors on `AppState`.
    Toggle {
        label: &'static str,
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Submenu { label, .. }
            | Self::Toggle { label, .. }
            | Self::Cycle { label, .. } => label,
        }
    }

    /// Current value as shown next to the label.
    pub fn value(&self, state: &AppState) -> Option<String> {
        match self {
            Self::Submenu { .. } => None,
            Self::Toggle { get, .. } => Some(if get(state) { "ON" } else { "OFF" }.to_string()),
            Self::Cycle { value, .. } => Some(value(state)),
        }
    }
}

/// Next entry after `current` in `choices`, wrapping; unknown values restart
/// at `fallback`.
fn next_choice<T: Copy + PartialEq>(choices: &[T], current: T, fallback: usize) -> T {
    let idx = choices.iter().position(|c| *c == current).unwrap_or(fallback);
    choices[(idx + 1) % choices.len()]
}

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Submenu {
        label: "Controls",
        view: ActiveView::ControlsSubmenu,
    },
    SettingsItem::Toggle {
        label: "Smooth Scrub",
        get: |s| s.config.smooth_scrub,
        set: |s, v| {
            s.config.smooth_scrub = v;
            s.session.set_smoothing(v);
            s.persist_config();
        },
    },
    SettingsItem::Toggle {
        label: "Autoplay Globe",
        get: |s| s.config.autoplay,
        set: |s, v| {
            s.config.autoplay = v;
            s.session.set_autoplay(v);
            s.persist_config();
        },
    },
    SettingsItem::Cycle {
        label: "Frame Rate",
        value: |s| format!("{} fps", s.config.fps),
        cycle: |s| {
            s.config.fps = next_choice(FPS_CHOICES, s.config.fps, 0);
            s.persist_config();
            s.status_message = Some(format!("Frame rate: {} fps", s.config.fps));
        },
    },
    SettingsItem::Cycle {
        label: "Wheel Step",
        value: |s| format!("{} cols", s.config.wheel_step),
        cycle: |s| {
            s.config.wheel_step = next_choice(WHEEL_STEP_CHOICES, s.config.wheel_step, 1);
            s.persist_config();
            s.status_message = Some(format!("Wheel step: {} columns", s.config.wheel_step));
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_choice_wraps() {
        assert_eq!(next_choice(FPS_CHOICES, 30, 0), 60);
        assert_eq!(next_choice(FPS_CHOICES, 120, 0), 30);
        // Unknown value: treated as the fallback entry.
        assert_eq!(next_choice(FPS_CHOICES, 45, 0), 60);
    }
}

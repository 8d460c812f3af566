//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::path::PathBuf;
use std::time::Instant;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::ui::layout::AppLayout;

use super::frame::JourneySession;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Journey,
    SettingsMenu,
    ControlsSubmenu,
}

/// Top-level application state.
pub struct AppState {
    /// Scroll model, engine output and media.
    pub session: JourneySession,
    /// User configuration (bindings, runtime knobs).
    pub config: AppConfig,
    /// Where settings changes are written; `None` means the default path.
    pub config_path: Option<PathBuf>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// Currently highlighted item in the settings menu.
    pub settings_selected: usize,
    /// Currently highlighted item in the controls submenu.
    pub controls_selected: usize,
    /// When `true`, the controls submenu is waiting for the user to press
    /// a key to rebind the action at `controls_selected`.
    pub awaiting_rebind: bool,
    /// Last known terminal size, for mouse hit-testing.
    pub terminal_area: Rect,
    /// Frames drawn so far (drives the media indicator).
    pub frames: u64,
}

impl AppState {
    pub fn new(session: JourneySession, config: AppConfig, config_path: Option<PathBuf>) -> Self {
        Self {
            session,
            config,
            config_path,
            should_quit: false,
            status_message: None,
            active_view: ActiveView::default(),
            settings_selected: 0,
            controls_selected: 0,
            awaiting_rebind: false,
            terminal_area: Rect::default(),
            frames: 0,
        }
    }

    /// Attach the session to the terminal for the first time.
    pub fn start(&mut self, area: Rect, now: Instant) -> bool {
        self.terminal_area = area;
        let viewport = AppLayout::from_area(area).viewport();
        self.session.setup(viewport, now)
    }

    /// Terminal resized: remeasure the track.
    pub fn resize(&mut self, area: Rect) {
        self.terminal_area = area;
        self.session.resize(AppLayout::from_area(area).viewport());
    }

    /// Write the configuration back to disk.  Failures only reach the log
    /// and the status bar.
    pub fn persist_config(&mut self) {
        let result = match &self.config_path {
            Some(path) => self.config.save_to(path),
            None => self.config.save(),
        };
        if let Err(err) = result {
            tracing::warn!(%err, "could not save config");
            self.status_message = Some(format!("Config not saved: {err}"));
        }
    }
}

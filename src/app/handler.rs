//! Input handling — maps key/mouse events to state mutations.
//!
//! Handlers only move the scroll target (or start a jump); everything
//! derived from it is recomputed on the next frame.

use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::{Action, KeyBind};
use crate::ui::chrome::nav_hit;
use crate::ui::layout::{contains, cols_to_px, AppLayout};

use super::settings::{SettingsItem, SETTINGS_ITEMS};
use super::state::{ActiveView, AppState};

/// Below this local progress "previous chapter" goes one chapter back
/// instead of rewinding to the start of the current one.
const CHAPTER_REWIND_SLACK: f64 = 0.05;

/// Total selectable rows in the controls submenu (actions + "Reset").
pub fn controls_item_count() -> usize {
    Action::ALL.len() + 1
}

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }
    if key.kind == KeyEventKind::Release {
        return;
    }

    match state.active_view {
        ActiveView::Journey => handle_journey_key(state, key),
        ActiveView::SettingsMenu => handle_settings_key(state, key),
        ActiveView::ControlsSubmenu => {
            if state.awaiting_rebind {
                handle_rebind_key(state, key);
            } else {
                handle_controls_key(state, key);
            }
        }
    }
}

// ── Journey view (configurable bindings) ────────────────────────

fn handle_journey_key(state: &mut AppState, key: KeyEvent) {
    state.status_message = None;

    let Some(action) = state.config.match_key(key) else {
        // Number keys jump straight to a chapter.
        if let KeyCode::Char(c @ '1'..='9') = key.code {
            let index = c as usize - '1' as usize;
            state.session.jump_to_section(index, Instant::now());
        }
        return;
    };

    let step = cols_to_px(state.config.wheel_step);
    let page = state.session.viewport().width;

    match action {
        Action::Quit => state.should_quit = true,
        Action::OpenSettings => {
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
        }
        Action::ScrollBack => state.session.scroll_by(-step),
        Action::ScrollForward => state.session.scroll_by(step),
        Action::PageBack => state.session.scroll_by(-page),
        Action::PageForward => state.session.scroll_by(page),
        Action::PrevSection => {
            let (index, local) = current_chapter(state);
            let target = if local < CHAPTER_REWIND_SLACK {
                index.saturating_sub(1)
            } else {
                index
            };
            state.session.jump_to_section(target, Instant::now());
        }
        Action::NextSection => {
            let (index, _) = current_chapter(state);
            let last = state.session.journey().sections.len().saturating_sub(1);
            if index < last {
                state.session.jump_to_section(index + 1, Instant::now());
            } else {
                state.session.jump_to_end(Instant::now());
            }
        }
        Action::JumpFirst => state.session.jump_to_section(0, Instant::now()),
        Action::JumpLast => state.session.jump_to_end(Instant::now()),
    }
}

/// Chapter and local progress of the last computed frame.
fn current_chapter(state: &AppState) -> (usize, f64) {
    state
        .session
        .output()
        .map(|o| (o.position.index, o.position.local))
        .unwrap_or((0, 0.0))
}

// ── Settings menu (hardcoded keys) ──────────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Journey;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected < SETTINGS_ITEMS.len() - 1 {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
                match item {
                    SettingsItem::Submenu { view, .. } => {
                        state.active_view = *view;
                        state.controls_selected = 0;
                    }
                    SettingsItem::Toggle { get, set, .. } => {
                        let current = get(state);
                        set(state, !current);
                    }
                    SettingsItem::Cycle { cycle, .. } => {
                        cycle(state);
                    }
                }
            }
        }
        _ => {}
    }
}

// ── Controls submenu (hardcoded navigation, interactive rebinding) ──

fn handle_controls_key(state: &mut AppState, key: KeyEvent) {
    let item_count = controls_item_count();

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            state.active_view = ActiveView::Journey;
        }
        KeyCode::Left | KeyCode::Char('h') => {
            state.active_view = ActiveView::SettingsMenu;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.controls_selected = state.controls_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.controls_selected < item_count - 1 {
                state.controls_selected += 1;
            }
        }
        KeyCode::Enter => {
            if state.controls_selected < Action::ALL.len() {
                state.awaiting_rebind = true;
            } else {
                state.config.reset_defaults();
                state.persist_config();
            }
        }
        KeyCode::Delete | KeyCode::Backspace => {
            if state.controls_selected < Action::ALL.len() {
                let action = Action::ALL[state.controls_selected];
                state.config.bindings.insert(action, Vec::new());
                state.persist_config();
            }
        }
        _ => {}
    }
}

/// Capture the next key press as a new binding.
fn handle_rebind_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.code == KeyCode::Esc {
        state.awaiting_rebind = false;
        return;
    }

    let action = Action::ALL[state.controls_selected];
    let bind = KeyBind::from_key_event(key);
    state.config.add_binding(action, bind);
    state.persist_config();
    state.awaiting_rebind = false;
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.active_view != ActiveView::Journey {
        return;
    }

    let step = cols_to_px(state.config.wheel_step);
    match mouse.kind {
        // The journey is horizontal; the vertical wheel drives it too.
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => state.session.scroll_by(step),
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => state.session.scroll_by(-step),
        MouseEventKind::Down(MouseButton::Left) => handle_click(state, mouse.column, mouse.row),
        _ => {}
    }
}

fn handle_click(state: &mut AppState, col: u16, row: u16) {
    let layout = AppLayout::from_area(state.terminal_area);
    let chrome = state.session.output().map(|o| o.chrome);

    if contains(layout.nav_area, col, row) {
        if chrome.is_some_and(|c| !c.nav_interactive) {
            tracing::debug!("nav click ignored while faded");
            return;
        }
        if let Some(index) = nav_hit(layout.nav_area, &state.session.journey().sections, col) {
            state.session.jump_to_section(index, Instant::now());
        }
        return;
    }

    if contains(layout.footer_area, col, row) {
        if chrome.map_or(true, |c| c.footer_interactive) {
            state.session.jump_to_section(0, Instant::now());
        } else {
            tracing::debug!("footer click ignored while faded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use ratatui::layout::Rect;

    use crate::app::frame::JourneySession;
    use crate::config::AppConfig;
    use crate::ui::chrome::nav_slots;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn app() -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            smooth_scrub: false,
            ..AppConfig::default()
        };
        let session = JourneySession::new(config.journey(), config.session_options());
        let mut state = AppState::new(session, config, Some(dir.path().join("config.toml")));
        assert!(state.start(Rect::new(0, 0, 100, 30), Instant::now()));
        (state, dir)
    }

    /// Run frames until any jump has finished.
    fn settle(state: &mut AppState) {
        state.session.on_frame(Instant::now() + Duration::from_secs(5));
    }

    #[test]
    fn test_arrow_scrolls_by_wheel_step() {
        let (mut state, _dir) = app();
        handle_key(&mut state, key(KeyCode::Right));
        settle(&mut state);
        // 6 columns of 8 px over 4.5 viewports of 800 px.
        assert!((state.session.published_progress() - 48.0 / 3600.0).abs() < 1e-9);
    }

    #[test]
    fn test_number_key_jumps_to_chapter() {
        let (mut state, _dir) = app();
        handle_key(&mut state, key(KeyCode::Char('3')));
        settle(&mut state);
        let b = state.session.boundaries().start_of(2);
        assert!((state.session.published_progress() - b).abs() < 1e-9);
        assert_eq!(state.session.output().map(|o| o.position.index), Some(2));
    }

    #[test]
    fn test_next_and_prev_chapter() {
        let (mut state, _dir) = app();
        settle(&mut state);
        handle_key(&mut state, key(KeyCode::Char('j')));
        settle(&mut state);
        assert_eq!(state.session.output().map(|o| o.position.index), Some(1));
        handle_key(&mut state, key(KeyCode::Char('k')));
        settle(&mut state);
        assert_eq!(state.session.output().map(|o| o.position.index), Some(0));
    }

    #[test]
    fn test_wheel_scrolls() {
        let (mut state, _dir) = app();
        handle_mouse(&mut state, mouse(MouseEventKind::ScrollDown, 10, 10));
        handle_mouse(&mut state, mouse(MouseEventKind::ScrollDown, 10, 10));
        handle_mouse(&mut state, mouse(MouseEventKind::ScrollUp, 10, 10));
        settle(&mut state);
        assert!((state.session.published_progress() - 48.0 / 3600.0).abs() < 1e-9);
    }

    #[test]
    fn test_nav_click_jumps() {
        let (mut state, _dir) = app();
        settle(&mut state);
        let layout = AppLayout::from_area(state.terminal_area);
        let (x, _) = nav_slots(layout.nav_area, &state.session.journey().sections)[1];
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), x + 1, layout.nav_area.y));
        settle(&mut state);
        assert_eq!(state.session.output().map(|o| o.position.index), Some(1));
    }

    #[test]
    fn test_faint_nav_ignores_clicks() {
        let (mut state, _dir) = app();
        // Chrome fades out over [1760, 2000] px; 1988 px leaves it at 0.05.
        state.session.scroll_by(1988.0);
        settle(&mut state);
        let chrome = state.session.output().map(|o| o.chrome).unwrap();
        assert!(chrome.opacity > 0.0 && !chrome.nav_interactive);

        let layout = AppLayout::from_area(state.terminal_area);
        let (x, _) = nav_slots(layout.nav_area, &state.session.journey().sections)[0];
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), x + 1, layout.nav_area.y));
        settle(&mut state);
        assert!((state.session.published_progress() - 1988.0 / 3600.0).abs() < 1e-9);
    }

    #[test]
    fn test_settings_toggle_persists() {
        let (mut state, dir) = app();
        handle_key(&mut state, key(KeyCode::Char('?')));
        assert_eq!(state.active_view, ActiveView::SettingsMenu);
        handle_key(&mut state, key(KeyCode::Down));
        handle_key(&mut state, key(KeyCode::Enter));
        assert!(state.config.smooth_scrub);
        let saved = AppConfig::load_from(&dir.path().join("config.toml"));
        assert!(saved.smooth_scrub);
        handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(state.active_view, ActiveView::Journey);
    }

    #[test]
    fn test_rebind_from_controls() {
        let (mut state, _dir) = app();
        state.active_view = ActiveView::ControlsSubmenu;
        // Quit is the last action.
        state.controls_selected = Action::ALL.len() - 1;
        handle_key(&mut state, key(KeyCode::Enter));
        assert!(state.awaiting_rebind);
        handle_key(&mut state, key(KeyCode::Char('x')));
        assert!(!state.awaiting_rebind);
        assert_eq!(state.config.match_key(key(KeyCode::Char('x'))), Some(Action::Quit));
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let (mut state, _dir) = app();
        state.active_view = ActiveView::ControlsSubmenu;
        handle_key(&mut state, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(state.should_quit);
    }
}

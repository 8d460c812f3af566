//! Whole-screen composition for one frame.

use ratatui::{widgets::Paragraph, Frame};

use crate::app::media::MediaElement;
use crate::app::state::{ActiveView, AppState};
use crate::core::chrome::ChromeState;
use crate::core::motion::ElementMotion;

use super::chrome::{FooterBar, HeaderBar, TimelineNav};
use super::layout::AppLayout;
use super::popup;
use super::spinner::MediaIndicator;
use super::theme::Theme;
use super::track::TrackWidget;
use super::transition::TransitionOverlay;

/// Chrome shown before the first frame has been computed.
const RESTING_CHROME: ChromeState = ChromeState {
    opacity: 1.0,
    is_fullscreen: false,
    footer_opacity: 1.0,
    footer_background: Theme::SNOW,
    footer_interactive: true,
    nav_interactive: true,
};

pub fn draw(frame: &mut Frame, state: &AppState) {
    let layout = AppLayout::from_area(frame.area());
    let session = &state.session;
    let journey = session.journey();
    let output = session.output();

    let chrome = output.map(|o| o.chrome).unwrap_or(RESTING_CHROME);
    let active = output.map(|o| o.position.index).unwrap_or(0);
    let local = output.map(|o| o.position.local).unwrap_or(0.0);
    let motions: &[Vec<ElementMotion>] = match output {
        Some(o) => &o.motions,
        None => &[],
    };

    frame.render_widget(
        TrackWidget {
            sections: &journey.sections,
            motions,
            offset_px: session.scroll_offset(),
        },
        layout.track_area,
    );
    frame.render_widget(
        HeaderBar {
            opacity: session.published_chrome_opacity(),
        },
        layout.header_area,
    );
    frame.render_widget(
        TimelineNav {
            sections: &journey.sections,
            active,
            local,
            opacity: session.published_chrome_opacity(),
        },
        layout.nav_area,
    );
    frame.render_widget(
        FooterBar {
            chrome: &chrome,
            progress: session.published_progress(),
        },
        layout.footer_area,
    );

    if let Some(out) = output {
        frame.render_widget(
            TransitionOverlay {
                state: &out.transition,
                spin: state.frames,
            },
            layout.stage_area,
        );
    }

    let hint = state.config.status_bar_hint();
    let status_text = match state.active_view {
        ActiveView::Journey => state.status_message.as_deref().unwrap_or(&hint),
        ActiveView::SettingsMenu | ActiveView::ControlsSubmenu => "",
    };
    frame.render_widget(
        Paragraph::new(status_text).style(Theme::status_bar_style()),
        layout.status_area,
    );

    let globe = session.globe();
    frame.render_widget(
        MediaIndicator {
            visible: output.is_some_and(|o| o.transition.active),
            started: globe.is_started(),
            playing: globe.media().is_playing(),
            position: globe.media().current_time(),
            tick: state.frames,
        },
        layout.status_area,
    );

    match state.active_view {
        ActiveView::SettingsMenu => {
            frame.render_widget(
                popup::SettingsPopup {
                    state,
                    selected: state.settings_selected,
                },
                frame.area(),
            );
        }
        ActiveView::ControlsSubmenu => {
            frame.render_widget(
                popup::ControlsPopup {
                    config: &state.config,
                    selected: state.controls_selected,
                    awaiting_rebind: state.awaiting_rebind,
                    chapters: state.session.journey().sections.len(),
                },
                frame.area(),
            );
        }
        ActiveView::Journey => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    use ratatui::{backend::TestBackend, layout::Rect, Terminal};

    use crate::app::frame::JourneySession;
    use crate::config::AppConfig;

    fn app(width: u16, height: u16) -> (AppState, Instant) {
        let config = AppConfig {
            smooth_scrub: false,
            ..AppConfig::default()
        };
        let session = JourneySession::new(config.journey(), config.session_options());
        let mut state = AppState::new(session, config, None);
        let t0 = Instant::now();
        assert!(state.start(Rect::new(0, 0, width, height), t0));
        (state, t0)
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_start_of_journey() {
        let (mut state, t0) = app(100, 24);
        state.session.on_frame(t0 + Duration::from_secs(5));
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| draw(f, &state)).unwrap();
        let text = screen(&terminal);
        assert!(text.contains("First 7 Days"));
        assert!(text.contains("seed"));
        assert!(text.contains("settings"));
    }

    #[test]
    fn test_end_of_journey_shows_globe_content() {
        let (mut state, t0) = app(100, 24);
        state.session.scroll_by(1e9);
        state.session.on_frame(t0 + Duration::from_secs(5));
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| draw(f, &state)).unwrap();
        let text = screen(&terminal);
        assert!(text.contains("Engage to Learn More"));
        assert!(text.contains("globe"));
        assert!(text.contains("100%"));
    }

    #[test]
    fn test_settings_popup() {
        let (mut state, _) = app(100, 24);
        state.active_view = ActiveView::SettingsMenu;
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| draw(f, &state)).unwrap();
        let text = screen(&terminal);
        assert!(text.contains("Smooth Scrub"));
        assert!(text.contains("[OFF]"));
        assert!(text.contains("[60 fps]"));
    }
}

//! Media indicator — a small spinner + clip state rendered in the
//! top-right corner of a given area.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Braille-dot spinner frames.  Cycles through these on each frame.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Globe clip state while the transition is on screen.
pub struct MediaIndicator {
    /// Whether to show the indicator at all.
    pub visible: bool,
    /// The looping controller has switched the clip on.
    pub started: bool,
    /// The clip is actually running (false when autoplay was refused).
    pub playing: bool,
    /// Clip position, seconds.
    pub position: f64,
    /// Monotonically increasing frame counter (drives the spinner frame).
    pub tick: u64,
}

impl MediaIndicator {
    fn label(&self) -> String {
        match (self.started, self.playing) {
            (_, true) => {
                let frame = SPINNER_FRAMES[(self.tick as usize) % SPINNER_FRAMES.len()];
                format!(" {frame} globe {:>5.1}s ", self.position)
            }
            (true, false) => " ‖ globe blocked ".to_string(),
            (false, false) => format!(" ‖ globe {:>5.1}s ", self.position),
        }
    }
}

impl Widget for MediaIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.visible || area.width < 20 || area.height == 0 {
            return;
        }

        let label = self.label();
        let label_width = label.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(label_width + 1);
        let colour = if self.playing { Color::Green } else { Color::Yellow };

        let line = Line::from(Span::styled(
            label,
            Style::default().fg(colour).add_modifier(Modifier::BOLD),
        ));

        buf.set_line(x, area.y, &line, label_width);
    }
}

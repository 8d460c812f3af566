//! Popup overlay widgets for the settings menu and controls submenu.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::app::settings::SETTINGS_ITEMS;
use crate::app::state::AppState;
use crate::config::{Action, AppConfig};

// ───────────────────────────────────────── settings popup ────

/// Settings menu popup overlay.
pub struct SettingsPopup<'a> {
    pub state: &'a AppState,
    pub selected: usize,
}

impl Widget for SettingsPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (SETTINGS_ITEMS.len() as u16) + 5;
        let popup = popup_area(44, height, area);
        Clear.render(popup, buf);

        let block = popup_block(" Settings ");

        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = Vec::new();
        lines.push(Line::raw(""));
        for (i, item) in SETTINGS_ITEMS.iter().enumerate() {
            let style = row_style(i == self.selected);
            let label = format!("{}{:<20}", marker(i == self.selected), item.label());
            match item.value(self.state) {
                None => lines.push(Line::from(Span::styled(label, style))),
                Some(value) => {
                    let value_style = match value.as_str() {
                        "ON" => Style::default().fg(Color::Green),
                        "OFF" => Style::default().fg(Color::DarkGray),
                        _ => Style::default().fg(Color::Yellow),
                    };
                    lines.push(Line::from(vec![
                        Span::styled(label, style),
                        Span::styled(format!("  [{value}]"), value_style),
                    ]));
                }
            }
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter/Space: change  Esc: close",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── controls popup ────

/// Bindings popup. Rows follow `Action::ALL`, split into the journey
/// actions and the menu actions, with the reset row last.
pub struct ControlsPopup<'a> {
    pub config: &'a AppConfig,
    pub selected: usize,
    pub awaiting_rebind: bool,
    /// Number of chapters reachable with the digit keys.
    pub chapters: usize,
}

fn group(action: Action) -> &'static str {
    match action {
        Action::OpenSettings | Action::Quit => "Menu",
        _ => "Journey",
    }
}

impl Widget for ControlsPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        const WIDTH: u16 = 52;
        let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let dim = Style::default().fg(Color::DarkGray);
        let columns = (WIDTH - 2) as usize;

        let mut lines = vec![Line::raw("")];
        let mut current = None;
        for (i, &action) in Action::ALL.iter().enumerate() {
            let name = group(action);
            if current != Some(name) {
                if current.is_some() {
                    // Digits sit with the journey keys but cannot be rebound.
                    lines.push(digit_row(self.chapters, columns, dim));
                }
                lines.push(Line::from(Span::styled(format!(" {name}"), heading)));
                current = Some(name);
            }

            let selected = i == self.selected;
            let keys = if selected && self.awaiting_rebind {
                "Press a key…".to_string()
            } else {
                self.config.display_bindings(action)
            };
            let label = format!("{}{:<22}", marker(selected), action.label());
            let width = columns.saturating_sub(label.chars().count()).max(1);
            lines.push(Line::from(vec![
                Span::styled(label, row_style(selected)),
                Span::styled(format!("{keys:>width$}"), row_style(selected).fg(Color::Yellow)),
            ]));
        }

        let reset = self.selected == Action::ALL.len();
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            format!("{}⟳ Reset to defaults", marker(reset)),
            row_style(reset),
        )));
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter: add key  Del: clear  Esc: back",
            dim,
        )));

        let popup = popup_area(WIDTH, lines.len() as u16 + 2, area);
        Clear.render(popup, buf);
        let block = popup_block(" Controls ");
        let inner = block.inner(popup);
        block.render(popup, buf);
        Paragraph::new(lines).render(inner, buf);
    }
}

fn digit_row(chapters: usize, columns: usize, style: Style) -> Line<'static> {
    let keys = match chapters.min(9) {
        0 | 1 => "1".to_string(),
        n => format!("1-{n}"),
    };
    let label = format!("   {:<22}", "Jump to Chapter");
    let width = columns.saturating_sub(label.chars().count()).max(1);
    Line::from(Span::styled(format!("{label}{keys:>width$}"), style))
}

// ───────────────────────────────────────── helpers ───────────

fn marker(selected: bool) -> &'static str {
    if selected {
        " ▸ "
    } else {
        "   "
    }
}

fn row_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

fn popup_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
}

/// Fixed-size box centred in `area`, shrunk to fit.
fn popup_area(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(buf: &Buffer) -> Vec<String> {
        (0..buf.area.height)
            .map(|y| (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect())
            .collect()
    }

    fn render(popup: ControlsPopup<'_>) -> Vec<String> {
        let area = Rect::new(0, 0, 60, 30);
        let mut buf = Buffer::empty(area);
        popup.render(area, &mut buf);
        text(&buf)
    }

    #[test]
    fn test_controls_group_journey_and_menu_keys() {
        let config = AppConfig::default();
        let rows = render(ControlsPopup {
            config: &config,
            selected: 0,
            awaiting_rebind: false,
            chapters: 4,
        });
        let find = |needle: &str| rows.iter().position(|r| r.contains(needle));

        let journey = find(" Journey").unwrap();
        let digits = find("Jump to Chapter").unwrap();
        let menu = find(" Menu").unwrap();
        assert!(journey < find("Next Chapter").unwrap());
        assert!(find("Jump to End").unwrap() < digits);
        assert_eq!(menu, digits + 1);
        assert!(menu < find("Open Settings").unwrap());
        assert!(rows[digits].trim_end().ends_with("1-4│"));
        assert!(find("Reset to defaults").unwrap() > find("Quit").unwrap());
    }

    #[test]
    fn test_controls_show_pending_rebind() {
        let config = AppConfig::default();
        let rows = render(ControlsPopup {
            config: &config,
            selected: 1,
            awaiting_rebind: true,
            chapters: 12,
        });
        let row = rows.iter().find(|r| r.contains("Scroll Forward")).unwrap();
        assert!(row.contains("Press a key…"));
        assert!(rows.iter().any(|r| r.contains("1-9│")));
    }

    #[test]
    fn test_popup_area_shrinks_to_fit() {
        let area = Rect::new(0, 0, 30, 10);
        assert_eq!(popup_area(52, 20, area), area);
        assert_eq!(popup_area(10, 4, Rect::new(0, 0, 30, 10)), Rect::new(10, 3, 10, 4));
    }
}

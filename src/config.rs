//! User configuration — keybindings, runtime knobs and journey tuning.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/scroll-journey/config.toml`
//! (default `~/.config/scroll-journey/config.toml`).  Unknown keys are
//! skipped; bad values are logged and the default is kept.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::frame::SessionOptions;
use crate::core::frame::Journey;
use crate::core::phase::{ConfigError, PhaseWindow, TransitionConfig};
use crate::core::timing::FadeTiming;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the journey view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollBack,
    ScrollForward,
    PageBack,
    PageForward,
    PrevSection,
    NextSection,
    JumpFirst,
    JumpLast,
    OpenSettings,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the controls menu).
    pub const ALL: &[Action] = &[
        Action::ScrollBack,
        Action::ScrollForward,
        Action::PageBack,
        Action::PageForward,
        Action::PrevSection,
        Action::NextSection,
        Action::JumpFirst,
        Action::JumpLast,
        Action::OpenSettings,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::ScrollBack => "Scroll Back",
            Action::ScrollForward => "Scroll Forward",
            Action::PageBack => "Page Back",
            Action::PageForward => "Page Forward",
            Action::PrevSection => "Previous Chapter",
            Action::NextSection => "Next Chapter",
            Action::JumpFirst => "Jump to Start",
            Action::JumpLast => "Jump to End",
            Action::OpenSettings => "Open Settings",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollBack => "scroll_back",
            Action::ScrollForward => "scroll_forward",
            Action::PageBack => "page_back",
            Action::PageForward => "page_forward",
            Action::PrevSection => "prev_section",
            Action::NextSection => "next_section",
            Action::JumpFirst => "jump_first",
            Action::JumpLast => "jump_last",
            Action::OpenSettings => "open_settings",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// Create a binding from a raw key event (used during rebinding).
    pub fn from_key_event(event: KeyEvent) -> Self {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        Self {
            code: event.code,
            modifiers: event.modifiers & mask,
        }
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s
    }

    /// User-friendly display string (e.g. `"Shift+→"`, `"PgDn"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = self.modifier_prefix();
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Shift+Right"`, `"q"`).
    fn to_config_string(&self) -> String {
        let mut s = self.modifier_prefix();
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Shift+Right"`, `"q"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            lower if lower.starts_with('f') && lower.len() > 1 => {
                let n: u8 = lower[1..].parse().ok()?;
                KeyCode::F(n)
            }
            // Keep the original case for single characters.
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

pub const FPS_CHOICES: &[u32] = &[30, 60, 120];
pub const WHEEL_STEP_CHOICES: &[u16] = &[2, 4, 6, 10, 16];

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Frames per second of the render loop.
    pub fps: u32,
    /// Terminal columns scrolled per wheel notch or arrow press.
    pub wheel_step: u16,
    /// Fraction of the remaining distance the track closes per frame.
    pub scrub_speed: f64,
    /// Glide toward the scroll target instead of snapping.
    pub smooth_scrub: bool,
    /// Allow the globe clip to start playing on its own.
    pub autoplay: bool,
    /// Section widths as viewport multiples; `None` keeps the built-in layout.
    pub section_widths: Option<Vec<f64>>,
    pub timing: FadeTiming,
    /// Phase-window overrides, applied in file order.
    pub phases: Vec<(String, PhaseWindow)>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            fps: 60,
            wheel_step: 6,
            scrub_speed: 0.2,
            smooth_scrub: true,
            autoplay: true,
            section_widths: None,
            timing: FadeTiming::default(),
            phases: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Built-in keybindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(ScrollBack, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(ScrollForward, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(PageBack, vec![KeyBind::new(PageUp, n), KeyBind::new(Char('b'), n)]);
        m.insert(PageForward, vec![KeyBind::new(PageDown, n), KeyBind::new(Char(' '), n)]);
        m.insert(PrevSection, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(NextSection, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(JumpFirst, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(JumpLast, vec![KeyBind::new(End, n)]);
        m.insert(OpenSettings, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Add a binding for `action`, removing the key from any other action.
    pub fn add_binding(&mut self, action: Action, bind: KeyBind) {
        for binds in self.bindings.values_mut() {
            binds.retain(|b| b != &bind);
        }
        self.bindings.entry(action).or_default().push(bind);
    }

    /// Restore all bindings to the built-in defaults.
    pub fn reset_defaults(&mut self) {
        self.bindings = Self::default_bindings();
    }

    /// Format the binding list for a given action (e.g. `"← / h"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Status-bar hint built from the current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}/{}: chapter | 1-9: jump | {}: settings | {}: quit",
            self.short_binding(Action::ScrollBack),
            self.short_binding(Action::ScrollForward),
            self.short_binding(Action::PrevSection),
            self.short_binding(Action::NextSection),
            self.short_binding(Action::OpenSettings),
            self.short_binding(Action::Quit),
        )
    }

    /// Engine configuration with the file's overrides applied.
    pub fn journey(&self) -> Journey {
        let mut journey = Journey::default();
        if let Some(widths) = &self.section_widths {
            for (section, &w) in journey.sections.iter_mut().zip(widths) {
                section.width_factor = w;
            }
        }
        journey.timing = self.timing;
        for (name, window) in &self.phases {
            if let Err(err) = journey.transition.set_phase(name, *window) {
                tracing::warn!(%err, "phase override ignored");
            }
        }
        journey
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            scrub_speed: self.scrub_speed,
            smooth_scrub: self.smooth_scrub,
            autoplay: self.autoplay,
        }
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "config loaded");
                Self::parse_config(&contents)
            }
            Err(err) => {
                tracing::debug!(path = %path.display(), %err, "no config file, using defaults");
                Self::default()
            }
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            if let Err(err) = config.apply(key, value) {
                tracing::warn!(%err, "config value ignored");
            }
        }

        config
    }

    /// Apply one `key = value` pair.
    fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let bad = |expected: &'static str| ConfigError::BadValue {
            key: key.to_string(),
            expected,
            value: value.to_string(),
        };

        match key {
            "fps" => {
                let fps: u32 = value.parse().map_err(|_| bad("an integer"))?;
                self.fps = fps.clamp(10, 240);
            }
            "wheel_step" => {
                let step: u16 = value.parse().map_err(|_| bad("an integer"))?;
                self.wheel_step = step.clamp(1, 64);
            }
            "scrub_speed" => {
                let speed: f64 = value.parse().map_err(|_| bad("a number"))?;
                if !(speed > 0.0 && speed <= 1.0) {
                    return Err(bad("a number in (0, 1]"));
                }
                self.scrub_speed = speed;
            }
            "smooth_scrub" => self.smooth_scrub = parse_bool(value).ok_or_else(|| bad("true or false"))?,
            "autoplay" => self.autoplay = parse_bool(value).ok_or_else(|| bad("true or false"))?,
            "section_widths" => {
                let widths = parse_widths(value).ok_or_else(|| bad("positive numbers"))?;
                self.section_widths = Some(widths);
            }
            "fade_out_ratio" => {
                let ratio: f64 = value.parse().map_err(|_| bad("a number"))?;
                if !(0.0..=1.0).contains(&ratio) {
                    return Err(bad("a number in [0, 1]"));
                }
                self.timing.fade_out_section_ratio = ratio;
            }
            "clouds_delay" => {
                let delay: f64 = value.parse().map_err(|_| bad("a number"))?;
                if !(0.0..=1.0).contains(&delay) {
                    return Err(bad("a number in [0, 1]"));
                }
                self.timing.clouds_fade_in_delay = delay;
            }
            _ => {
                if let Some(name) = key.strip_prefix("phase.") {
                    let (start, end) = value.split_once(',').ok_or_else(|| bad("`start, end`"))?;
                    let start: f64 = start.trim().parse().map_err(|_| bad("`start, end`"))?;
                    let end: f64 = end.trim().parse().map_err(|_| bad("`start, end`"))?;
                    let window = PhaseWindow::try_new(start, end)?;
                    // Validate the name now so the warning points at the file.
                    TransitionConfig::default().set_phase(name, window)?;
                    self.phases.retain(|(n, _)| n != name);
                    self.phases.push((name.to_string(), window));
                    return Ok(());
                }

                let Some(action) = Action::from_config_key(key) else {
                    tracing::debug!(key, "unknown config key");
                    return Ok(());
                };
                let parsed: Vec<KeyBind> = value
                    .split(',')
                    .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                    .collect();
                if parsed.is_empty() {
                    return Err(bad("a list of keys"));
                }
                self.bindings.insert(action, parsed);
            }
        }
        Ok(())
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# scroll-journey configuration".to_string(),
            String::new(),
            "# Runtime".to_string(),
            format!("fps = {}", self.fps),
            format!("wheel_step = {}", self.wheel_step),
            format!("scrub_speed = {}", self.scrub_speed),
            format!("smooth_scrub = {}", self.smooth_scrub),
            format!("autoplay = {}", self.autoplay),
            String::new(),
            "# Journey".to_string(),
            format!("fade_out_ratio = {}", self.timing.fade_out_section_ratio),
            format!("clouds_delay = {}", self.timing.clouds_fade_in_delay),
        ];
        if let Some(widths) = &self.section_widths {
            let joined: Vec<String> = widths.iter().map(|w| w.to_string()).collect();
            lines.push(format!("section_widths = {}", joined.join(", ")));
        }
        for (name, window) in &self.phases {
            lines.push(format!("phase.{name} = {}, {}", window.start, window.end));
        }

        lines.extend([
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            "# Special keys: Up, Down, Left, Right, Enter, Esc, Tab,".to_string(),
            "#   Home, End, PageUp, PageDown, Space, F1-F12".to_string(),
            String::new(),
        ]);

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "on" | "yes" => Some(true),
        "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Comma-separated positive widths, e.g. `1, 1.5, 3`.
pub fn parse_widths(value: &str) -> Option<Vec<f64>> {
    let widths: Vec<f64> = value
        .split(',')
        .map(|w| w.trim().parse::<f64>().ok().filter(|w| w.is_finite() && *w > 0.0))
        .collect::<Option<_>>()?;
    (!widths.is_empty()).then_some(widths)
}

/// Return the config file path (`$XDG_CONFIG_HOME/scroll-journey/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join(env!("CARGO_PKG_NAME")).join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        let mut k = KeyEvent::new(code, modifiers);
        k.kind = KeyEventKind::Press;
        k
    }

    #[test]
    fn test_default_bindings_match() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.match_key(press(KeyCode::Right, KeyModifiers::NONE)), Some(Action::ScrollForward));
        assert_eq!(cfg.match_key(press(KeyCode::Char('j'), KeyModifiers::NONE)), Some(Action::NextSection));
        assert_eq!(cfg.match_key(press(KeyCode::Char('x'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_rebinding_moves_key() {
        let mut cfg = AppConfig::default();
        cfg.add_binding(Action::Quit, KeyBind::new(KeyCode::Char('h'), KeyModifiers::NONE));
        assert_eq!(cfg.match_key(press(KeyCode::Char('h'), KeyModifiers::NONE)), Some(Action::Quit));
        assert_eq!(cfg.bindings[&Action::ScrollBack].len(), 1);
    }

    #[test]
    fn test_parse_key_strings() {
        let b = KeyBind::parse("Shift+Right").unwrap();
        assert_eq!(b, KeyBind::new(KeyCode::Right, KeyModifiers::SHIFT));
        assert_eq!(KeyBind::parse("G").unwrap().code, KeyCode::Char('G'));
        assert_eq!(KeyBind::parse("F5").unwrap().code, KeyCode::F(5));
        assert!(KeyBind::parse("Hyper+x").is_none());
    }

    #[test]
    fn test_bad_values_keep_defaults() {
        let cfg = AppConfig::parse_config(
            "fps = fast\nscrub_speed = 3\nsection_widths = 1, -2\nphase.nope = 0.1, 0.2\nphase.mask_shrink = 0.5, 0.2\n",
        );
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_values_are_clamped() {
        let cfg = AppConfig::parse_config("fps = 1000\nwheel_step = 0\n");
        assert_eq!(cfg.fps, 240);
        assert_eq!(cfg.wheel_step, 1);
    }

    #[test]
    fn test_journey_applies_overrides() {
        let cfg = AppConfig::parse_config(
            "section_widths = 1, 2, 4\nfade_out_ratio = 0.5\nphase.globe_reveal = 0.6, 0.9\n",
        );
        let journey = cfg.journey();
        assert_eq!(journey.sections[1].width_factor, 2.0);
        assert_eq!(journey.sections[2].width_factor, 4.0);
        assert_eq!(journey.timing.fade_out_section_ratio, 0.5);
        assert_eq!(journey.transition.globe_reveal, PhaseWindow::new(0.6, 0.9));
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = AppConfig::default();
        cfg.fps = 120;
        cfg.smooth_scrub = false;
        cfg.section_widths = Some(vec![1.0, 1.25, 2.5]);
        cfg.timing.clouds_fade_in_delay = 0.05;
        cfg.phases.push(("pill_to_circle".into(), PhaseWindow::new(0.55, 0.7)));
        cfg.add_binding(Action::JumpLast, KeyBind::new(KeyCode::Char('G'), KeyModifiers::SHIFT));
        cfg.save_to(&path).unwrap();

        assert_eq!(AppConfig::load_from(&path), cfg);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(AppConfig::load_from(&dir.path().join("absent.toml")), AppConfig::default());
    }
}

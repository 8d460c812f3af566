//! A scroll-driven horizontal journey rendered in the terminal.
//!
//! Scroll (wheel, arrows, or chapter keys) through the sections; the last
//! chapter plays the clouds → pill → globe transition.
//! Run with `--sweep <steps>` to print the computed frames without a TUI.

mod app;
mod config;
mod core;
mod ui;

use std::fs::File;
use std::io::{self, stderr, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    frame::JourneySession,
    handler,
    state::AppState,
};
use crate::config::{parse_widths, AppConfig};
use crate::core::boundaries::SectionBoundaries;
use crate::core::frame::{compute_frame, Journey, Viewport};
use crate::core::section::measure;

/// Virtual viewport used by `--sweep`.
const SWEEP_VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    text_width: Some(96.0),
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-driven horizontal journey")]
struct Cli {
    /// Section widths as multiples of the viewport, e.g. `1,1.5,3`.
    #[arg(long, value_name = "WIDTHS")]
    sections: Option<String>,

    /// Frame rate of the render loop.
    #[arg(long, value_parser = clap::value_parser!(u32).range(10..=240))]
    fps: Option<u32>,

    /// Write logs to this file (filtered by `RUST_LOG`).
    #[arg(long)]
    log: Option<PathBuf>,

    /// Print `<steps>` evenly spaced frames to stdout and exit.
    #[arg(long, value_name = "STEPS")]
    sweep: Option<usize>,

    /// Use this config file instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_sections(s: &str) -> Result<Vec<f64>> {
    parse_widths(s).with_context(|| format!("invalid section widths `{s}`"))
}

// ───────────────────────────────────────── logging ───────────

/// Log to `path` when given; otherwise to stderr, but only when no TUI
/// owns the terminal.
fn init_tracing(path: Option<&PathBuf>, headless: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if headless => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr) // never pollute stdout
                .init();
        }
        None => {}
    }
    Ok(())
}

// ───────────────────────────────────────── sweep ─────────────

/// Evaluate `steps` frames from progress 0 to 1 and print one row each.
fn sweep(journey: &Journey, steps: usize, out: &mut impl Write) -> Result<()> {
    let viewport = SWEEP_VIEWPORT;
    let boundaries = SectionBoundaries::from_measurements(
        &measure(&journey.sections, viewport.width),
        viewport.width,
    )
    .context("section layout is degenerate")?;

    writeln!(
        out,
        "{:>8} {:>4} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6} {:>5}",
        "progress", "sect", "local", "chrome", "mask", "scale", "pill", "globe", "play"
    )?;
    let last = steps.max(2) - 1;
    for i in 0..=last {
        let p = i as f64 / last as f64;
        // Timed entrances are long finished in a sweep.
        let f = compute_frame(p, &boundaries, journey, viewport, Duration::from_secs(60));
        let t = &f.transition;
        writeln!(
            out,
            "{:>8.4} {:>4} {:>6.3} {:>6.3} {:>6.3} {:>6.3} {:>6.3} {:>6.3} {:>5}",
            f.progress,
            f.position.index,
            f.position.local,
            f.chrome.opacity,
            t.mask.opacity,
            t.mask.scale,
            t.pill_text.opacity,
            t.globe.opacity,
            if t.globe_playing { "yes" } else { "no" },
        )?;
    }
    Ok(())
}

// ───────────────────────────────────────── TUI loop ──────────

fn frame_interval(fps: u32) -> Interval {
    let mut frames = interval(Duration::from_secs_f64(1.0 / f64::from(fps.max(1))));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    frames
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stderr>>, state: &mut AppState) -> Result<()> {
    let size = terminal.size()?;
    state.start(Rect::new(0, 0, size.width, size.height), Instant::now());

    let mut events = spawn_event_reader();
    let mut fps = state.config.fps;
    let mut frames = frame_interval(fps);

    loop {
        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(state, m),
                    AppEvent::Resize(w, h) => state.resize(Rect::new(0, 0, w, h)),
                }
            }

            _ = frames.tick() => {
                state.session.on_frame(Instant::now());
                state.frames = state.frames.wrapping_add(1);
                terminal.draw(|frame| ui::view::draw(frame, &*state))?;
            }
        }

        if state.should_quit {
            break;
        }
        if state.config.fps != fps {
            fps = state.config.fps;
            frames = frame_interval(fps);
            tracing::debug!(fps, "frame rate changed");
        }
    }

    state.session.teardown();
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log.as_ref(), cli.sweep.is_some())?;

    let mut user_config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    if let Some(widths) = &cli.sections {
        user_config.section_widths = Some(parse_sections(widths)?);
    }
    if let Some(fps) = cli.fps {
        user_config.fps = fps;
    }

    // ── headless mode ─────────────────────────────────────────
    if let Some(steps) = cli.sweep {
        let journey = user_config.journey();
        let mut out = io::stdout().lock();
        return sweep(&journey, steps, &mut out);
    }

    let session = JourneySession::new(user_config.journey(), user_config.session_options());
    let mut state = AppState::new(session, user_config, cli.config.clone());

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut state).await;

    // ── teardown ──────────────────────────────────────────────
    // Restore the terminal even when the loop failed.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_covers_journey() {
        let mut out = Vec::new();
        sweep(&Journey::default(), 11, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 12);
        assert!(rows[1].trim_start().starts_with("0.0000"));
        assert!(rows[11].trim_start().starts_with("1.0000"));
        assert!(rows[11].ends_with("yes"));
        assert!(rows[1].ends_with("no"));
    }

    #[test]
    fn test_cli_parses_sections() {
        let cli = Cli::try_parse_from(["scroll-journey", "--sections", "1, 2, 3", "--fps", "30"]).unwrap();
        assert_eq!(parse_sections(cli.sections.as_deref().unwrap()).unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(cli.fps, Some(30));
        assert!(Cli::try_parse_from(["scroll-journey", "--fps", "5"]).is_err());
        assert!(parse_sections("1,x").is_err());
    }
}

//! Terminal simulator for the landing page's scroll choreography.
//!
//! Run the binary to scroll a virtual landing page with the mouse wheel or
//! the keyboard.  Run with `--replay <FILE>` to execute an input script
//! headlessly and print a trace.

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Terminal,
};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::info;

use landing_scroll::app::{
    controller::Page,
    event::{spawn_event_reader, AppEvent},
    handler,
    replay::{load_script, Replay},
    state::AppState,
};
use landing_scroll::config::AppConfig;
use landing_scroll::ui::{inspector::InspectorWidget, layout::AppLayout, page_view::PageView, theme::Theme};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Landing page scroll choreography simulator")]
struct Cli {
    /// Run an input script headlessly and print one trace line per command.
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Virtual viewport height in pixels (replay mode).
    #[arg(long, default_value_t = 800.0)]
    viewport: f64,

    /// Write the configuration file and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load();

    if cli.write_config {
        let path = config.save().context("writing configuration")?;
        println!("{}", path.display());
        return Ok(());
    }

    if let Some(script) = cli.replay {
        let commands = load_script(&script)?;
        let mut replay = Replay::new(cli.viewport, config);
        for line in replay.run(&commands) {
            println!("{line}");
        }
        return Ok(());
    }

    run_interactive(config).await
}

async fn run_interactive(config: AppConfig) -> Result<()> {
    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let viewport = AppLayout::from_area(Rect::new(0, 0, size.width, size.height)).viewport_px();
    let mut state = AppState::new(viewport, config);
    handler::handle_resize(&mut state, size.width, size.height);
    info!(viewport = state.page.viewport_height(), "simulator started");

    let result = event_loop(&mut terminal, &mut state).await;

    // ── teardown ──────────────────────────────────────────────
    state.dispose();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

type Tui = Terminal<CrosstermBackend<io::Stderr>>;

async fn event_loop(terminal: &mut Tui, state: &mut AppState) -> Result<()> {
    let mut events = spawn_event_reader(Duration::from_millis(50));
    let mut frames = tokio::time::interval(Duration::from_millis(state.config.frame_ms));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let started = Instant::now();

    loop {
        terminal.draw(|frame| {
            let layout = AppLayout::from_area(frame.area());

            frame.render_widget(PageView::new(&state.page), layout.page_area);

            let snapshot = state.controller.snapshot();
            let block = Block::default()
                .title(" controller ")
                .title_style(Theme::title_style())
                .borders(Borders::ALL)
                .border_style(Theme::border_style());
            frame.render_widget(
                InspectorWidget {
                    block,
                    snapshot: &snapshot,
                    scroll_y: state.page.scroll_y(),
                    viewport_height: state.page.viewport_height(),
                },
                layout.inspector_area,
            );

            let hint = state.config.status_bar_hint();
            let status_text = state.status_message.as_deref().unwrap_or(&hint);
            let status = Paragraph::new(status_text).style(Theme::status_bar_style());
            frame.render_widget(status, layout.status_area);
        })?;

        tokio::select! {
            biased;

            event = events.recv() => {
                let Some(event) = event else {
                    break; // event reader gone
                };
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k),
                    AppEvent::Wheel(notch) => handler::handle_wheel(state, notch),
                    AppEvent::Click { column, row } => handler::handle_click(state, column, row),
                    AppEvent::Resize(w, h) => handler::handle_resize(state, w, h),
                }
            }

            _ = frames.tick() => {
                state.tick(started.elapsed());
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

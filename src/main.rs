//! An animated terminal bar chart of country populations by year.
//!
//! Run the binary to open the chart on the bundled dataset, or pass
//! `--data <file.json>` to chart your own.  Step through the years with the
//! arrow keys or by clicking the year buttons.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    loader::{spawn_dataset_load, DataSource, LoadUpdate},
    state::{ActiveView, AppState},
};
use crate::ui::{
    chart_widget::ChartWidget, layout::AppLayout, nav_widget::NavBar, popup::HelpPopup,
    spinner::LoadingIndicator, theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Animated population bar chart")]
struct Cli {
    /// Dataset JSON file (defaults to the bundled dataset).
    #[arg(long)]
    data: Option<PathBuf>,

    /// Number of countries to show (overrides the config file).
    #[arg(long)]
    count: Option<usize>,

    /// Frame interval in milliseconds (overrides the config file).
    #[arg(long)]
    tick_ms: Option<u64>,
}

// ───────────────────────────────────────── drawing ───────────

fn draw(frame: &mut Frame, state: &mut AppState) {
    state.terminal_area = frame.area();
    let layout = AppLayout::from_area(frame.area());

    let chart_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border_style());

    if state.store.is_loading() {
        let inner = chart_block.inner(layout.chart_area);
        frame.render_widget(chart_block, layout.chart_area);
        frame.render_widget(LoadingIndicator { tick: state.tick }, inner);
    } else {
        let rows = state.chart_rows(Instant::now());
        let chart = ChartWidget::new(state.store.current_year(), &rows)
            .offset(state.slide.column_offset())
            .block(chart_block);
        frame.render_widget(chart, layout.chart_area);
        frame.render_widget(NavBar { nav: state.navigation() }, layout.nav_area);
    }

    let hint = state.config.status_bar_hint(state.display_count);
    let (status_text, status_style) = match &state.status_message {
        Some(msg) if state.status_is_error => (msg.as_str(), Theme::error_style()),
        Some(msg) => (msg.as_str(), Theme::status_bar_style()),
        None => (hint.as_str(), Theme::status_bar_style()),
    };
    frame.render_widget(
        Paragraph::new(status_text).style(status_style),
        layout.status_area,
    );

    if state.active_view == ActiveView::Help {
        frame.render_widget(HelpPopup { config: &state.config }, frame.area());
    }
}

fn apply_load(state: &mut AppState, update: LoadUpdate) {
    let now = Instant::now();
    match update.result {
        Ok(dataset) => state.apply_dataset(dataset, now),
        Err(err) => {
            tracing::error!(source = ?update.source, %err, "dataset failed to load");
            state.apply_load_error(err.to_string(), now);
        }
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only emits when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    let mut config = config::AppConfig::load();
    // Write the defaults on first run so there is a file to edit.
    if !config::config_path().exists() {
        if let Err(err) = config.save() {
            tracing::warn!(%err, "could not write default config");
        }
    }
    if let Some(count) = cli.count {
        config.override_display_count(count);
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.override_tick_ms(tick_ms);
    }
    let source = match cli.data {
        Some(path) => DataSource::File(path),
        None => DataSource::Bundled,
    };

    let tick_rate = config.tick_rate();
    let mut state = AppState::new(config);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // ── async channels ────────────────────────────────────────
    let mut events = spawn_event_reader(tick_rate);
    let (load_tx, mut load_rx) = tokio::sync::mpsc::unbounded_channel::<LoadUpdate>();
    spawn_dataset_load(load_tx, source);

    // ── event loop ────────────────────────────────────────────
    // Idle ticks only redraw while something is moving, plus one frame
    // after it settles so the final bar lengths land on screen.
    let mut dirty = true;
    let mut was_animating = false;
    loop {
        if dirty {
            terminal.draw(|frame| draw(frame, &mut state))?;
        }

        tokio::select! {
            biased;

            Some(update) = load_rx.recv() => {
                apply_load(&mut state, update);
                dirty = true;
            }

            Some(event) = events.recv() => {
                dirty = true;
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(_, _) => {}
                    AppEvent::Tick => {
                        state.on_tick();
                        let animating = state.store.is_loading() || state.is_animating(Instant::now());
                        dirty = animating || was_animating;
                        was_animating = animating;
                    }
                }
            }

            else => break,
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

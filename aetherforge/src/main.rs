//! aetherforge - AetherForge Codex
//!
//! Terminal UI for browsing the five-stage workflow guide and consulting the
//! Oracle chat in standard or strategic mode.

mod app;
mod message_format;
mod ui;

use std::io;
use std::path::{Path, PathBuf};

use aetherforge_core::oracle::{create_backend, Dispatcher};
use aetherforge_core::{ChatMode, Config, Stage};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{App, View};

#[derive(Parser)]
#[command(name = "aetherforge")]
#[command(about = "Workflow guide and Oracle chat for the AetherForge evolution plan")]
#[command(version)]
struct Args {
    /// View to open first
    #[arg(long, value_enum, default_value = "guide")]
    view: StartView,

    /// Stage selected in the guide (seed, sapling, tree, forest, empire)
    #[arg(long, default_value = "seed")]
    stage: Stage,

    /// Oracle mode to start in (standard or strategic)
    #[arg(long, default_value = "standard")]
    mode: ChatMode,

    /// Config file to use instead of ~/.config/aetherforge/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print resolved configuration and exit
    #[arg(long)]
    check: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StartView {
    Guide,
    Oracle,
}

impl From<StartView> for View {
    fn from(view: StartView) -> Self {
        match view {
            StartView::Guide => View::Guide,
            StartView::Oracle => View::Oracle,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = match &args.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::load().context("failed to load configuration")?,
    };

    if args.check {
        let config_path = args.config.clone().unwrap_or_else(Config::config_path);
        print_check(&config, &config_path);
        return Ok(());
    }

    // Initialize logging (to file, not stdout since we have a TUI)
    let _log_guard =
        aetherforge_core::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!(
        view = ?args.view,
        stage = %args.stage,
        mode = %args.mode,
        "aetherforge TUI starting up"
    );
    if config.oracle.resolve_api_key().is_none() {
        tracing::warn!("No Gemini API key configured; Oracle requests will fail");
    }

    let backend = create_backend(&config.oracle).context("failed to create oracle backend")?;
    let dispatcher = Dispatcher::new(backend).context("failed to start oracle dispatcher")?;
    let mut app = App::new(dispatcher).with_start(args.view.into(), args.stage, args.mode);

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    tracing::info!(
        messages = app.conversation.messages().len(),
        "aetherforge TUI shutting down"
    );

    result
}

/// Print where things live and which models will answer.
fn print_check(config: &Config, config_path: &Path) {
    println!("Config file:     {}", config_path.display());
    println!("Log file:        {}", Config::log_path().display());
    println!("Endpoint:        {}", config.oracle.endpoint);
    println!("Standard model:  {}", config.oracle.standard_model);
    println!("Strategic model: {}", config.oracle.strategic_model);
    println!("Thinking budget: {}", config.oracle.thinking_budget);
    println!(
        "Grounding:       {}",
        if config.oracle.grounding { "on" } else { "off" }
    );
    println!(
        "API key:         {}",
        if config.oracle.resolve_api_key().is_some() {
            "present"
        } else {
            "missing"
        }
    );
}

/// Run the main application loop.
fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        // Collect settled Oracle replies and advance the spinner
        app.tick();

        // Render
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle events
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

use dockey::api::StatusClient;
use dockey::app::Dashboard;
use dockey::config::{self, ApiVersion, DashboardConfig, LogMode};
use dockey::tui;

/// Terminal dashboard for a container status service
#[derive(Parser, Debug)]
#[command(name = "dockey", version, about)]
struct Cli {
    /// YAML config file (default: <config dir>/dockey/config.yaml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the status service
    #[arg(short, long, env = "DOCKEY_URL")]
    url: Option<String>,

    /// API generation to talk to
    #[arg(long, value_enum)]
    api: Option<ApiVersion>,

    /// How the log viewer gets its content
    #[arg(long, value_enum)]
    log_mode: Option<LogMode>,

    /// Seconds between list refreshes (5-10)
    #[arg(short, long)]
    interval: Option<u64>,

    /// Force start/stop/restart controls on
    #[arg(long, conflicts_with = "no_actions")]
    actions: bool,

    /// Force start/stop/restart controls off
    #[arg(long)]
    no_actions: bool,

    /// Where tracing output goes (default: <cache dir>/dockey/dockey.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn apply(&self, config: &mut DashboardConfig) {
        if let Some(url) = &self.url {
            config.base_url = url.clone();
        }
        if let Some(api) = self.api {
            config.api_version = api;
        }
        if let Some(mode) = self.log_mode {
            config.log_mode = mode;
        }
        if let Some(interval) = self.interval {
            config.poll_interval_secs = interval;
        }
        if self.actions {
            config.actions = Some(true);
        } else if self.no_actions {
            config.actions = Some(false);
        }
    }
}

/// The terminal belongs to the UI, so tracing goes to a file
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path.map(Path::to_path_buf).or_else(config::default_log_path) else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dockey=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let mut config = DashboardConfig::load_or_default(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;

    let client = StatusClient::new(&config).context("Failed to build HTTP client")?;
    let mut dashboard = Dashboard::new(config, Arc::new(client));

    let mut terminal = tui::init().context("Failed to initialise terminal")?;
    let result = run(&mut terminal, &mut dashboard);

    dashboard.dispose();
    tui::restore().context("Failed to restore terminal")?;
    info!("exited");
    result
}

fn run(terminal: &mut tui::Tui, dashboard: &mut Dashboard) -> Result<()> {
    dashboard.start();

    let tick_rate = Duration::from_millis(100);
    let mut last_frame = Instant::now();

    loop {
        let elapsed = last_frame.elapsed();
        last_frame = Instant::now();
        terminal.draw(|frame| dashboard.render_with_effects(frame, elapsed))?;

        while let Some(event) = dashboard.try_next_event() {
            dashboard.handle_event(event);
        }

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    dashboard.handle_key(key);
                }
            }
        }

        if dashboard.should_quit {
            return Ok(());
        }
    }
}

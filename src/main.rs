use std::io::{stdout, Stdout};
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tokio::time::Instant;

use rmselect::app::App;
use rmselect::config::Config;
use rmselect::controller::MultiSelect;
use rmselect::debounce::Debouncer;
use rmselect::log;
use rmselect::model::Identifier;
use rmselect::runtime::{search_due, Driver};
use rmselect::transport::HttpTransport;
use rmselect::tui;

const USAGE: &str = "usage: rmselect [--base-url URL] [--target PATH] [--filter NAME]";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging and panic hook
    if let Ok(log_path) = log::init() {
        log::log(&format!("Log file: {}", log_path.display()));
        log::install_panic_hook();
    }

    // Parse CLI arguments
    let args: Vec<String> = std::env::args().collect();
    let mut base_url: Option<String> = None;
    let mut target: Option<String> = None;
    let mut filter: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        let slot = match args[i].as_str() {
            "--base-url" | "-u" => &mut base_url,
            "--target" | "-t" => &mut target,
            "--filter" | "-f" => &mut filter,
            "--help" | "-h" => {
                println!("{}", USAGE);
                return Ok(());
            }
            other => {
                eprintln!("Warning: ignoring unknown argument '{}'", other);
                i += 1;
                continue;
            }
        };
        match args.get(i + 1) {
            Some(value) => *slot = Some(value.clone()),
            None => eprintln!("Warning: {} requires a value", args[i]),
        }
        i += 2;
    }

    // Load config with precedence: CLI > env var > file > default
    let config = Config::load().with_overrides(base_url, target, filter);
    if config.props().endpoint().is_none() {
        eprintln!("No endpoint configured: pass --target or --filter, or set one in {}", Config::config_path().display());
        eprintln!("{}", USAGE);
        return Ok(());
    }
    log::log(&format!("Endpoint: {} {:?}", config.base_url(), config.props().endpoint()));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let control = MultiSelect::with_debouncer(config.props(), Debouncer::new(config.debounce()));
    let mut app = App::new(control);
    let transport = Arc::new(HttpTransport::new(config.base_url()));

    // Run the app
    let result = run_app(&mut terminal, &mut app, transport).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.map_err(Into::into)
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    transport: Arc<HttpTransport>,
) -> rmselect::error::Result<()> {
    // Commits reach the parent (the host) over a channel
    let (commit_tx, mut commit_rx) = mpsc::unbounded_channel::<Vec<Identifier>>();
    let mut driver = Driver::new(transport, move |ids| {
        let _ = commit_tx.send(ids);
    });

    let mut event_stream = EventStream::new();

    driver.execute(app.mount());

    while !app.should_quit {
        terminal.draw(|frame| tui::ui::render(frame, app))?;

        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(event)) => {
                        let effects = app.handle_event(&event, Instant::now());
                        driver.execute(effects);
                    }
                    Some(Err(e)) => log::log_event(&format!("terminal event error: {}", e)),
                    None => break,
                }
            }

            response = driver.next_response() => {
                app.control.on_response(response);
            }

            _ = search_due(app.control.search_deadline()) => {
                let effects = app.control.tick(Instant::now());
                driver.execute(effects);
            }

            Some(ids) = commit_rx.recv() => {
                let effects = app.on_commit(ids);
                driver.execute(effects);
            }
        }
    }

    app.control.unmount();
    log::log("=== rmselect exiting ===");
    Ok(())
}

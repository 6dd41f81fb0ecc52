use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

mod config;
mod display;
mod error;
mod logging;
mod pomodoro;

use config::{Cli, Config};
use display::frame::format_elapsed;
use display::terminal::{self, StdoutTerminal};
use pomodoro::interrupt::{InterruptHandler, exit_process};
use pomodoro::session::Session;
use pomodoro::state::SessionState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = Config::from_cli(&cli)?;

    let state = Arc::new(SessionState::new());
    let terminal = StdoutTerminal::shared();

    info!(
        "=== Session started at {} ===",
        state.started_at().format("%Y-%m-%d %H:%M:%S")
    );
    info!(
        "Pomodoro settings: {} work / {} rest, {}",
        format_elapsed(config.focus),
        format_elapsed(config.rest),
        if config.is_unbounded() {
            "until interrupted".to_string()
        } else {
            format!("{} iterations", config.max_iterations)
        }
    );

    // Cleanup on Ctrl+C; armed before anything is drawn
    let handler = InterruptHandler::new(Arc::clone(&state), Arc::clone(&terminal), exit_process());
    if let Err(e) = handler.spawn() {
        warn!("{}", e);
    }

    terminal::hide_cursor(&terminal);
    Session::new(config, state, Arc::clone(&terminal)).run().await;
    terminal::restore(&terminal);

    Ok(())
}

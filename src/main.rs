use clap::Parser;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use taskboard::config::{BoardConfig, CliArgs};
use taskboard::logging;
use taskboard::presenter::BoardPresenter;
use taskboard::seed;
use taskboard::store::TaskStore;
use taskboard::ui::{self, FormDialog, TerminalBoard, TerminalRestore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliArgs::parse();
    let config = BoardConfig::load(&cli)?;

    let _log_guard = logging::init(&config.log_level, &config.log_file)?;
    tracing::info!("taskboard starting");

    // Load tasks before touching the terminal so errors print normally.
    let store = match &config.seed_file {
        Some(path) => TaskStore::new(seed::load(path)?)?,
        None => TaskStore::seeded(),
    };
    let mut presenter = BoardPresenter::new(store, TerminalBoard::new(), FormDialog::new());
    presenter.start();

    let result = {
        let _restore = TerminalRestore::enter(io::stdout(), config.mouse)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        ui::run_app(&mut terminal, &mut presenter)
    };

    tracing::info!("taskboard exiting");
    if let Err(err) = result {
        tracing::error!(%err, "event loop failed");
        eprintln!("{:?}", err);
    }
    Ok(())
}

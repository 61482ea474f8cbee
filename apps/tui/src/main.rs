//! ContactBook TUI — interactive address-book browser.
//!
//! Reads the address-book snapshot once at startup, then shows contacts
//! grouped by letter with a jump index and live search, built with
//! `ratatui` + `crossterm`.

mod app;
mod screens;
mod widgets;

use std::fs::OpenOptions;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use contactbook_addressbook::FileAddressBook;
use contactbook_core::{Dialer, load_session};
use contactbook_shared::{config_dir, load_config};
use tracing::info;

/// Log file written under the config directory; the terminal belongs to the UI.
const LOG_FILE_NAME: &str = "contactbook-tui.log";

#[derive(Parser, Debug)]
#[command(
    name = "contactbook-tui",
    version,
    about = "Browse the address book grouped by letter"
)]
struct Args {
    /// Address-book snapshot (JSON); defaults to the configured path
    #[arg(env = "CONTACTBOOK_SNAPSHOT")]
    snapshot: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_tracing();

    let config = load_config()?;
    let dialer = Dialer::from_config(&config)?;
    let path = match args.snapshot {
        Some(path) => path,
        None => config.snapshot_path()?,
    };

    info!(path = %path.display(), "reading address book");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let session = runtime.block_on(load_session(&FileAddressBook::new(path)))?;

    app::run(session, dialer)
}

/// Log to `~/.contactbook/contactbook-tui.log`; skip logging if it cannot be opened.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let Ok(dir) = config_dir() else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))
    else {
        return;
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("contactbook=info"));

    fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
}

//! ContactBook CLI — address-book browser and dialer-link builder.
//!
//! Reads an address-book snapshot once, then lists contacts grouped by
//! leading letter, searches them, and prints call/message URIs.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}

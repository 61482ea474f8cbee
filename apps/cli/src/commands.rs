//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use contactbook_addressbook::FileAddressBook;
use contactbook_core::{
    Dialer, DisplayGroup, Session, Snapshot, contact_count, letters, load_session,
    name::full_name, primary_number, render,
};
use contactbook_shared::{AppConfig, ContactRecord, Platform, init_config, load_config};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// ContactBook — browse and dial your address book from the terminal.
#[derive(Parser)]
#[command(
    name = "contactbook",
    version,
    about = "Browse an address-book snapshot grouped by letter, search it, and build dialer links.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Address-book snapshot (JSON). Overrides `defaults.snapshot_path`.
    #[arg(long, global = true, env = "CONTACTBOOK_SNAPSHOT")]
    pub snapshot: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// List reachable contacts grouped by leading letter.
    List {
        /// Case-insensitive search over the full name.
        #[arg(short, long, default_value = "")]
        query: String,

        /// Print the groups as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the jump-index letters.
    Letters {
        /// Case-insensitive search over the full name.
        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// Print the call URI for a contact's first phone number.
    Call {
        /// Contact ID.
        id: String,

        /// Platform whose call scheme to use: android or ios (defaults to config).
        #[arg(short, long)]
        platform: Option<Platform>,
    },

    /// Print the messaging URI and its web fallback for a contact.
    Message {
        /// Contact ID.
        id: String,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "contactbook=warn",
        1 => "contactbook=info",
        2 => "contactbook=debug",
        _ => "contactbook=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let snapshot = cli.snapshot.as_deref();
    match cli.command {
        Command::List { query, json } => cmd_list(snapshot, &query, json).await,
        Command::Letters { query } => cmd_letters(snapshot, &query).await,
        Command::Call { id, platform } => cmd_call(snapshot, &id, platform).await,
        Command::Message { id } => cmd_message(snapshot, &id).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Session loading
// ---------------------------------------------------------------------------

/// Read the address book once, with a spinner while it loads.
async fn open_session(config: &AppConfig, snapshot: Option<&Path>) -> Result<Session> {
    let path = match snapshot {
        Some(p) => p.to_path_buf(),
        None => config.snapshot_path()?,
    };
    info!(path = %path.display(), "reading address book");

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")?
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.set_message(contactbook_core::LOADING_MESSAGE);
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = load_session(&FileAddressBook::new(path)).await;
    spinner.finish_and_clear();

    Ok(result?)
}

/// The snapshot records, or `None` after printing the terminal-state message.
fn ready_records(session: &Session) -> Option<&[ContactRecord]> {
    ready_snapshot(session).map(|snapshot| snapshot.records.as_slice())
}

fn ready_snapshot(session: &Session) -> Option<&Snapshot> {
    if let Some(msg) = session.message() {
        println!("{msg}");
    }
    session.snapshot()
}

/// Footer under the listing: how many contacts are shown and when they were read.
fn list_footer(count: usize, snapshot: &Snapshot) -> String {
    format!(
        "  {count} contact(s) · read {}",
        snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}

fn find_contact<'a>(records: &'a [ContactRecord], id: &str) -> Result<&'a ContactRecord> {
    records
        .iter()
        .find(|c| c.id.as_str() == id)
        .ok_or_else(|| eyre!("no contact with id '{id}'"))
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_list(snapshot: Option<&Path>, query: &str, json: bool) -> Result<()> {
    let config = load_config()?;
    let session = open_session(&config, snapshot).await?;
    let Some(snapshot) = ready_snapshot(&session) else {
        return Ok(());
    };

    let groups = render(&snapshot.records, query);
    info!(query, groups = groups.len(), "listing contacts");

    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
        return Ok(());
    }

    if groups.is_empty() {
        println!("No contacts match '{query}'");
        return Ok(());
    }

    print_groups(&groups);
    println!();
    println!("{}", list_footer(contact_count(&groups), snapshot));
    Ok(())
}

fn print_groups(groups: &[DisplayGroup<'_>]) {
    for group in groups {
        println!();
        println!("  {}", group.letter);
        for contact in &group.contacts {
            let number = primary_number(contact)
                .map(|p| p.number.as_str())
                .unwrap_or_default();
            println!("    {:<32} {:<20} [{}]", full_name(contact), number, contact.id);
        }
    }
}

async fn cmd_letters(snapshot: Option<&Path>, query: &str) -> Result<()> {
    let config = load_config()?;
    let session = open_session(&config, snapshot).await?;
    let Some(records) = ready_records(&session) else {
        return Ok(());
    };

    let groups = render(records, query);
    let line: String = letters(&groups).into_iter().collect();
    println!("{line}");
    Ok(())
}

async fn cmd_call(snapshot: Option<&Path>, id: &str, platform: Option<Platform>) -> Result<()> {
    let config = load_config()?;
    let mut dialer = Dialer::from_config(&config)?;
    if let Some(p) = platform {
        dialer = dialer.with_platform(p);
    }

    let session = open_session(&config, snapshot).await?;
    let Some(records) = ready_records(&session) else {
        return Ok(());
    };
    let contact = find_contact(records, id)?;

    match dialer.call_uri(contact)? {
        Some(uri) => {
            info!(id, platform = %dialer.platform(), "call URI built");
            println!("{uri}");
        }
        None => println!("{} has no phone number", display_name(contact)),
    }
    Ok(())
}

async fn cmd_message(snapshot: Option<&Path>, id: &str) -> Result<()> {
    let config = load_config()?;
    let dialer = Dialer::from_config(&config)?;

    let session = open_session(&config, snapshot).await?;
    let Some(records) = ready_records(&session) else {
        return Ok(());
    };
    let contact = find_contact(records, id)?;

    match dialer.message_intent(contact)? {
        Some(intent) => {
            println!("{}", intent.native);
            println!("{}", intent.web_fallback);
        }
        None => println!("{} has no phone number", display_name(contact)),
    }
    Ok(())
}

fn display_name(contact: &ContactRecord) -> String {
    let name = full_name(contact);
    if name.is_empty() {
        format!("Contact {}", contact.id)
    } else {
        name
    }
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

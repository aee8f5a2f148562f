use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

mod cli;
mod client;
mod collection;
mod config;
mod error;
mod event;
mod page;
mod photo;
mod route;
mod studio;
mod ui;
mod version;

#[cfg(test)]
mod tests;

use cli::CliHandler;
use config::DashboardConfig;
use route::EventTab;
use version::CURRENT_VERSION;

#[derive(Parser)]
#[command(
    name = "snapvault",
    about = "SnapVault studio dashboard client",
    long_about = "SnapVault - Terminal client for the SnapVault event photography platform

OVERVIEW:
  Browse the studio and super-admin dashboards, and manage events, photo
  collections and studio profiles on a SnapVault backend.

QUICK START:
  snapvault config set-backend <URL>    # Point at your backend
  snapvault status                      # Check the backend is reachable
  snapvault open /studio/dashboard      # Render a dashboard page
  snapvault open /studio/events/42/analytics
  snapvault events list                 # List events",
    version = CURRENT_VERSION,
    author = "SnapVault Team",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file to use instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print resources as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a dashboard path, load its data and render it
    Open { path: String },

    /// Resolve a dashboard path without loading anything
    Route { path: String },

    /// Print the path an event tab navigates to
    Tab { event_id: i64, tab: EventTab },

    /// Manage events
    #[command(aliases = &["ev"])]
    Events(EventArgs),

    /// Manage photo collections
    Collections(CollectionArgs),

    /// Browse photos
    Photos(PhotoArgs),

    /// Manage studio profiles
    Settings(SettingsArgs),

    /// Show backend and configuration status
    #[command(aliases = &["st"])]
    Status,

    /// Configure settings
    #[command(aliases = &["cfg"])]
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct EventArgs {
    #[command(subcommand)]
    pub command: EventCommand,
}

#[derive(Subcommand)]
pub enum EventCommand {
    #[command(aliases = &["ls"])]
    List,
    Get {
        id: i64,
    },
    Create {
        name: String,
        #[command(flatten)]
        fields: EventFieldArgs,
    },
    /// Change only the given fields
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: EventFieldArgs,
    },
    #[command(aliases = &["rm"])]
    Delete {
        id: i64,
        #[arg(short, long)]
        force: bool,
    },
    /// List the photos of an event
    Photos {
        id: i64,
    },
    /// Register a photo under an event
    UploadPhoto {
        id: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        url: String,
        #[arg(long)]
        file_size: Option<u64>,
    },
}

#[derive(Args, Debug, Default)]
pub struct EventFieldArgs {
    /// YYYY-MM-DD
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub end_date: Option<NaiveDate>,
    #[arg(long)]
    pub event_type: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub template_id: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct CollectionArgs {
    #[command(subcommand)]
    pub command: CollectionCommand,
}

#[derive(Subcommand)]
pub enum CollectionCommand {
    #[command(aliases = &["ls"])]
    List {
        #[arg(long)]
        event_id: Option<i64>,
    },
    Get {
        id: i64,
    },
    Create {
        name: String,
        #[arg(long)]
        event_id: i64,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        event_id: Option<i64>,
    },
    #[command(aliases = &["rm"])]
    Delete {
        id: i64,
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args)]
pub struct PhotoArgs {
    #[command(subcommand)]
    pub command: PhotoCommand,
}

#[derive(Subcommand)]
pub enum PhotoCommand {
    #[command(aliases = &["ls"])]
    List,
}

#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

#[derive(Subcommand)]
pub enum SettingsCommand {
    #[command(aliases = &["ls"])]
    List,
    /// Profile of the current user
    Current,
    Get {
        id: i64,
    },
    Create(ProfileArgs),
    /// Replace a profile; omitted fields keep their stored values
    Update {
        id: i64,
        #[command(flatten)]
        profile: ProfileArgs,
    },
    #[command(aliases = &["rm"])]
    Delete {
        id: i64,
        #[arg(short, long)]
        force: bool,
    },
    /// Update the current user's profile, creating it if missing
    SaveProfile(ProfileArgs),
}

#[derive(Args, Debug, Default, Clone)]
pub struct ProfileArgs {
    #[arg(long)]
    pub full_name: Option<String>,
    #[arg(long)]
    pub mobile_number: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub company_name: Option<String>,
    #[arg(long)]
    pub industry: Option<String>,
    #[arg(long)]
    pub area: Option<String>,
    #[arg(long)]
    pub avg_events_per_year: Option<String>,
    #[arg(long)]
    pub billing_company_name: Option<String>,
    #[arg(long)]
    pub gst_vat_number: Option<String>,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    Show,
    SetBackend { url: String },
    SetTimeout { seconds: u64 },
    /// Where `/` redirects
    SetDefaultRoute { path: String },
    Reset,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let verbose = cli.verbose
        || DashboardConfig::load(cli.config.as_deref())
            .map(|config| config.verbose)
            .unwrap_or(false);
    let log_level = if verbose { "debug" } else { "info" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(format!("snapvault={}", log_level));
    subscriber.init();

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("interrupted, cancelling in-flight requests");
            on_interrupt.cancel();
        }
    });

    let mut handler = CliHandler::new(cli.config, cli.json, cancel);
    if let Err(e) = handler.execute(cli.command).await {
        tracing::debug!(
            code = %e.code(),
            status = ?e.status(),
            cancelled = e.is_cancelled(),
            "command failed"
        );
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

//! Reunion CLI: query the Drive gallery and the class sheet from a terminal.
//!
//! Reads the same environment (and `.env`) as the API server.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use reunion_cli::{contacts_table, init_tracing, media_table, stats_table};
use reunion_core::gallery::{filter_media, search_contacts};
use reunion_core::{Config, MediaKind};
use reunion_sources::{
    build_http_client, ContactSource, GoogleDriveSource, GoogleSheetsSource, MediaSource,
    StatsAggregator,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "reunion", about = "Reunion gallery and directory CLI")]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json, global = true)]
    format: Format,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// List gallery media from the shared Drive folder
    Photos {
        /// Only this kind: photo or video
        #[arg(long)]
        r#type: Option<String>,
        /// Case-insensitive name filter
        #[arg(long)]
        q: Option<String>,
    },
    /// List contacts from the class sheet
    Contacts {
        /// Search name, email, phone, WhatsApp or blood group
        #[arg(long)]
        q: Option<String>,
    },
    /// Show headline counts
    Stats,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    let http = build_http_client(config.upstream_timeout_secs())?;
    let media: Arc<dyn MediaSource> = Arc::new(GoogleDriveSource::from_config(&config, http.clone()));
    let contacts: Arc<dyn ContactSource> = Arc::new(GoogleSheetsSource::from_config(&config, http));

    match cli.command {
        Commands::Photos { r#type, q } => {
            let kind = r#type
                .as_deref()
                .map(str::parse::<MediaKind>)
                .transpose()
                .map_err(anyhow::Error::msg)?;
            let items = media.list_media().await?;
            let items = filter_media(items, kind, q.as_deref());
            match cli.format {
                Format::Json => print_json(&items)?,
                Format::Table => print!("{}", media_table(&items)),
            }
        }
        Commands::Contacts { q } => {
            let list = contacts.list_contacts().await?;
            let list = search_contacts(list, q.as_deref());
            match cli.format {
                Format::Json => print_json(&list)?,
                Format::Table => print!("{}", contacts_table(&list)),
            }
        }
        Commands::Stats => {
            let stats = StatsAggregator::new(media, contacts).snapshot().await?;
            match cli.format {
                Format::Json => print_json(&stats)?,
                Format::Table => print!("{}", stats_table(&stats)),
            }
        }
    }

    Ok(())
}

//! tfpricings - autobot.tf price list with item names and images
//!
//! Prints the cached price list, forces a refresh, or keeps the cache warm
//! with a background refresh loop.

use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tfpricings::cache::{CacheManager, CacheStore, MemoryStore};
use tfpricings::cli::{CacheLocation, Cli, CliError, Command, StartupConfig};
use tfpricings::data::sku::base_segment;
use tfpricings::data::{AutobotClient, PricingsCache};
use tfpricings::pricings::{PricingsProvider, PricingsService};
use tfpricings::refresh::{RefreshHandle, RefreshMessage};
use tfpricings::schema::ItemSchema;

/// Sets up log output on stderr, filtered by `RUST_LOG` (default `info`)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_store(location: &CacheLocation) -> Result<Arc<dyn CacheStore>, CliError> {
    let store: Arc<dyn CacheStore> = match location {
        CacheLocation::Memory => Arc::new(MemoryStore::new()),
        CacheLocation::Disk(dir) => Arc::new(CacheManager::with_dir(dir.clone())),
        CacheLocation::Default => Arc::new(CacheManager::new().ok_or(CliError::NoCacheDir)?),
    };
    Ok(store)
}

/// Writes the price list as JSON, optionally limited to one base defindex
fn print_pricings(
    mut cache: PricingsCache,
    pretty: bool,
    defindex: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(defindex) = defindex {
        let wanted = defindex.to_string();
        cache
            .pricings
            .retain(|record| base_segment(record.sku()) == wanted);
    }

    let json = if pretty {
        serde_json::to_string_pretty(&cache)?
    } else {
        serde_json::to_string(&cache)?
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    Ok(())
}

/// Runs the background refresh loop until Ctrl-C
async fn watch(service: Arc<PricingsService>, config: tfpricings::refresh::RefreshConfig) {
    tracing::info!(interval_secs = config.interval.as_secs(), "starting refresh loop");
    let mut handle = RefreshHandle::spawn(service, config);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            message = handle.receiver.recv() => match message {
                Some(RefreshMessage::RefreshStarted) => tracing::debug!("refresh started"),
                Some(RefreshMessage::RefreshCompleted) => tracing::info!("refresh completed"),
                Some(RefreshMessage::RefreshError(e)) => tracing::warn!(error = %e, "refresh failed"),
                None => break,
            },
            _ = &mut ctrl_c => {
                tracing::info!("shutting down refresh loop");
                break;
            }
        }
    }

    handle.shutdown().await;
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    let config = StartupConfig::from_cli(&cli)?;
    let schema = ItemSchema::from_path(&config.schema_path)?;
    tracing::debug!(items = schema.len(), "loaded item schema");

    let store = open_store(&config.cache)?;
    let fetcher = Arc::new(AutobotClient::with_base_url(config.base_url.clone()));
    let service = Arc::new(PricingsService::new(
        fetcher,
        Arc::new(schema),
        store,
        config.pricings.clone(),
    ));

    match cli.command {
        Command::List { pretty, defindex } => {
            let pricings = service.find_all().await?;
            print_pricings(pricings, pretty, defindex)?;
        }
        Command::Refresh => service.refresh().await?,
        Command::Watch { .. } => watch(service, config.refresh).await,
    }

    Ok(())
}

//! Resolve printed card codes or catalog ids against the card catalog.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use deck_engine::config::CatalogSettings;
use deck_engine::domain::ports::{CardCodeResolution, CardResolution};
use deck_engine::domain::{CardSetDirectoryCache, Error, SetCodeResolver};
use deck_engine::outbound::catalog::CatalogHttpSource;
use deck_engine::outbound::memory::InMemoryDeckStore;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

/// `resolve-card-code` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "resolve-card-code",
    about = "Resolve printed card codes (e.g. LDK2-FRK40) or catalog ids to cards",
    version
)]
struct CliArgs {
    /// Codes or catalog ids to resolve.
    #[arg(value_name = "code", required = true)]
    identifiers: Vec<String>,
    /// Catalog API base URL. Falls back to `DECK_CATALOG_BASE_URL` or the
    /// public catalog.
    #[arg(long = "base-url", value_name = "url")]
    base_url: Option<Url>,
    /// Print each resolution as a JSON object.
    #[arg(long)]
    json: bool,
}

fn main() -> io::Result<ExitCode> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<ExitCode> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let settings = CatalogSettings::load_from_iter([OsString::from("resolve-card-code")])
        .map_err(|error| io::Error::other(format!("load catalog settings: {error}")))?;
    let base_url = match args.base_url {
        Some(url) => url,
        None => settings
            .base_url()
            .map_err(|error| io::Error::other(format!("invalid catalog base URL: {error}")))?,
    };

    let catalog = Arc::new(
        CatalogHttpSource::new(base_url, settings.request_timeout())
            .map_err(|error| io::Error::other(format!("create catalog client: {error}")))?,
    );
    let set_directory = Arc::new(CardSetDirectoryCache::new(
        Arc::clone(&catalog),
        Arc::new(DefaultClock),
        settings.set_cache_ttl(),
    ));
    let resolver = SetCodeResolver::new(catalog, set_directory, Arc::new(InMemoryDeckStore::new()));

    let mut failures = 0_usize;
    for identifier in &args.identifiers {
        match resolver.resolve(identifier).await {
            Ok(resolution) => print_resolution(&resolution, args.json)?,
            Err(error) => {
                failures += 1;
                print_failure(identifier, &error, args.json)?;
            }
        }
    }

    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_resolution(resolution: &CardResolution, json: bool) -> io::Result<()> {
    if json {
        let line = serde_json::to_string(resolution).map_err(io::Error::other)?;
        println!("{line}");
        return Ok(());
    }
    println!("code={}", resolution.original_code);
    println!("card_id={}", resolution.card.id);
    println!("name={}", resolution.card.name);
    println!("frame={}", resolution.card.frame_category);
    println!("language={}", resolution.detected_language);
    if let Some(printing) = &resolution.matched_printing {
        println!("printing={} ({})", printing.set_code, printing.rarity);
        println!("set_name={}", printing.set_name);
    }
    Ok(())
}

fn print_failure(identifier: &str, error: &Error, json: bool) -> io::Result<()> {
    if json {
        let line = serde_json::to_string(&serde_json::json!({
            "code": identifier,
            "error": error,
        }))
        .map_err(io::Error::other)?;
        println!("{line}");
        return Ok(());
    }
    eprintln!("code={identifier}");
    eprintln!("error={error}");
    let suggestions = error.suggestions();
    if !suggestions.is_empty() {
        eprintln!("suggestions={}", suggestions.join(","));
    }
    Ok(())
}

use anyhow::Result;
use reqwest::Client;
use sheetdex::{Config, Pager, RecordCache, RecordStore};
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) load config + open the cache-backed store ────────────────
    let config = Config::load_or_default(Path::new("sheetdex.yaml"))?;
    let cache = RecordCache::new(&config.cache_dir, &config.cache_name)?;
    let mut store = RecordStore::open(cache, config.newest_first);
    if !store.is_empty() {
        info!(rows = store.len(), "serving cached rows until refresh");
    }

    // ─── 3) one-shot refresh from the feed ───────────────────────────
    let client = Client::new();
    match store.refresh(&client, &config.source_url).await {
        Ok(rows) => info!(rows, url = %config.source_url, "dataset refreshed"),
        Err(e) => error!("Failed to load data: {:#}", e),
    }

    // ─── 4) show the first page ──────────────────────────────────────
    let pager = Pager::new(config.page_size);
    let view = pager.view(store.records());
    info!(
        page = view.page,
        total_pages = view.total_pages,
        "first page of {}",
        store.len()
    );
    for record in view.items {
        info!(
            title = record.get(&config.title_field),
            uploaded = record.get("Timestamp"),
            "row"
        );
    }

    Ok(())
}

use crate::cli::params::WorkshopParams;
use crate::error::SteamPrepError;
use crate::workshop::{sync_collections, HttpTransport, MetadataClient};
use std::time::Duration;
use tracing::info;

/// Sync workshop collections into the install directory without touching the
/// application install itself.
pub async fn run_workshop(params: WorkshopParams) -> Result<(), SteamPrepError> {
    let client = MetadataClient::with_transport(HttpTransport::new()).with_retry(
        params.config.workshop.retries,
        Duration::from_secs(params.config.workshop.retry_delay_secs),
    );
    let http = reqwest::Client::new();

    let fetched = sync_collections(
        &client,
        &http,
        &params.config.workshop.collections,
        &params.install_dir,
        params.parallelism,
    )
    .await?;

    info!(fetched, dir = %params.install_dir.display(), "workshop sync finished");
    Ok(())
}

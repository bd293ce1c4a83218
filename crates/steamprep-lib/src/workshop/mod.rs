mod client;
mod fetcher;
mod planner;
mod resolver;
mod types;

pub use client::{
    ApiEndpoints, CollectionChild, CollectionDetail, CollectionDetailsResponse,
    FileDetailsResponse, HttpTransport, MetadataClient, MetadataTransport, PublishedFileDetail,
    TransportResponse, DEFAULT_RETRIES, DEFAULT_RETRY_DELAY, GET_COLLECTION_DETAILS_URL,
    GET_PUBLISHED_FILE_DETAILS_URL,
};
pub use fetcher::{download_to, fetch_all};
pub use planner::plan_downloads;
pub use resolver::{fetch_details, resolve_membership};
pub use types::{CollectionId, DownloadPlan, FileId, FileMetadata, PlannedDownload};

use crate::error::SteamPrepError;
use std::path::Path;
use tracing::info;

/// Entry point for the workshop pipeline: expand collections into file IDs,
/// fetch per-file metadata, plan what is stale, then download the plan into
/// `install_dir`. Returns the number of files that were fetched.
pub async fn sync_collections<T: MetadataTransport>(
    client: &MetadataClient<T>,
    http: &reqwest::Client,
    collection_ids: &[CollectionId],
    install_dir: &Path,
    parallelism: usize,
) -> Result<usize, SteamPrepError> {
    let file_ids = resolve_membership(client, collection_ids).await?;
    let details = fetch_details(client, &file_ids).await?;

    let plan = plan_downloads(install_dir, &details)?;
    if plan.is_empty() {
        info!("all workshop items are up to date");
        return Ok(0);
    }

    let planned = plan.len();
    info!(count = planned, "downloading workshop items");
    fetch_all(http, plan, parallelism).await?;

    Ok(planned)
}

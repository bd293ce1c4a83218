use super::types::DownloadPlan;
use crate::error::SteamPrepError;
use futures::stream::{FuturesUnordered, StreamExt};
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

/// Download every entry in the plan, streaming each body to disk as chunks
/// arrive and overwriting any partial prior content at the destination.
///
/// There is no retry at this layer; retry responsibility lives only in the
/// metadata client. Per-file failures are isolated so one bad URL does not
/// abort its siblings, and the run fails at the end with a summary instead.
/// `parallelism` bounds how many transfers run at once; 1 makes the run
/// fully sequential.
pub async fn fetch_all(
    client: &reqwest::Client,
    plan: DownloadPlan,
    parallelism: usize,
) -> Result<(), SteamPrepError> {
    let semaphore = Arc::new(tokio::sync::Semaphore::new(parallelism.max(1)));

    let mut futs = FuturesUnordered::new();
    for (file_id, entry) in plan.into_entries() {
        let client = client.clone();
        let semaphore = semaphore.clone();
        futs.push(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| SteamPrepError::Unexpected(eyre::eyre!(e)))?;
            info!(file = %entry.metadata.file_name, "downloading");
            download_to(&client, &file_id, &entry.metadata.file_url, &entry.dest).await
        });
    }

    let mut failures = 0usize;
    while let Some(result) = futs.next().await {
        if let Err(err) = result {
            warn!("workshop download failed: {err}");
            failures += 1;
        }
    }

    if failures == 0 {
        Ok(())
    } else {
        Err(SteamPrepError::Download {
            message: format!("{failures} workshop downloads failed"),
        })
    }
}

/// Issue a streaming GET and write the body to `dest` chunk by chunk. Used by
/// the bulk fetcher and by the single-file addon update check.
pub async fn download_to(
    client: &reqwest::Client,
    label: &str,
    url: &str,
    dest: &Path,
) -> Result<(), SteamPrepError> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(SteamPrepError::TransferFailed {
            file_id: label.to_string(),
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let mut file = tokio::fs::File::create(dest).await?;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    Ok(())
}

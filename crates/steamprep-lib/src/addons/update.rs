use super::extract::ArchiveExtractor;
use super::types::AddonSource;
use crate::error::SteamPrepError;
use crate::workshop::download_to;
use std::path::Path;
use std::time::UNIX_EPOCH;
use tracing::{debug, info};

/// Single-file specialization of the workshop planner/fetcher pair: one
/// remote asset, change detection against HTTP headers instead of API
/// metadata, and an unpack step after a fresh download.
pub struct AddonUpdater<'a> {
    http: &'a reqwest::Client,
}

impl<'a> AddonUpdater<'a> {
    pub fn new(http: &'a reqwest::Client) -> Self {
        Self { http }
    }

    /// Fetch the "latest version" pointer, compare the advertised archive
    /// against what is on disk, and download + unpack it over `unpack_dir`
    /// when stale. Returns whether anything was downloaded.
    pub async fn update(
        &self,
        source: &AddonSource,
        archive_path: &Path,
        unpack_dir: &Path,
        extractor: &dyn ArchiveExtractor,
    ) -> Result<bool, SteamPrepError> {
        let pointer_url = source.latest_pointer_url();
        let response = self.http.get(&pointer_url).send().await?;
        if !response.status().is_success() {
            return Err(SteamPrepError::AddonUpdate {
                asset: source.name.clone(),
                reason: format!(
                    "latest-version pointer at {pointer_url} returned status {}",
                    response.status().as_u16()
                ),
            });
        }

        let archive_name = response.text().await?.trim().to_string();
        if archive_name.is_empty() {
            return Err(SteamPrepError::AddonUpdate {
                asset: source.name.clone(),
                reason: format!("latest-version pointer at {pointer_url} was empty"),
            });
        }
        let download_url = source.download_url(&archive_name);

        if archive_path.is_file() && self.archive_is_current(archive_path, &download_url).await? {
            info!(asset = %source.name, archive = %archive_name, "already installed, skipping");
            return Ok(false);
        }

        info!(asset = %source.name, url = %download_url, "downloading addon");
        download_to(self.http, &source.name, &download_url, archive_path).await?;
        extractor.unpack(archive_path, unpack_dir)?;
        info!(asset = %source.name, dir = %unpack_dir.display(), "unpacked addon");

        Ok(true)
    }

    /// HEAD the download URL and apply the same two-condition skip predicate
    /// the workshop planner uses: equal size, or a local file strictly newer
    /// than the remote's last modification.
    async fn archive_is_current(
        &self,
        archive_path: &Path,
        download_url: &str,
    ) -> Result<bool, SteamPrepError> {
        let response = self.http.head(download_url).send().await?;
        debug!(headers = ?response.headers(), "addon HEAD response");

        let remote_size = response
            .headers()
            .get(reqwest::header::CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok());
        let remote_mtime = response
            .headers()
            .get(reqwest::header::LAST_MODIFIED)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| chrono::DateTime::parse_from_rfc2822(value).ok())
            .map(|when| when.timestamp());

        let stat = std::fs::metadata(archive_path)?;
        let local_mtime = stat
            .modified()?
            .duration_since(UNIX_EPOCH)
            .map(|since_epoch| since_epoch.as_secs() as i64)
            .unwrap_or(0);

        Ok(is_current(stat.len(), local_mtime, remote_size, remote_mtime))
    }
}

fn is_current(
    local_size: u64,
    local_mtime: i64,
    remote_size: Option<u64>,
    remote_mtime: Option<i64>,
) -> bool {
    if remote_size == Some(local_size) {
        return true;
    }
    matches!(remote_mtime, Some(remote) if local_mtime > remote)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_match_is_current() {
        assert!(is_current(100, 0, Some(100), Some(i64::MAX)));
    }

    #[test]
    fn test_newer_local_mtime_is_current() {
        assert!(is_current(100, 50, Some(999), Some(49)));
    }

    #[test]
    fn test_equal_mtime_is_stale() {
        assert!(!is_current(100, 50, Some(999), Some(50)));
    }

    #[test]
    fn test_no_headers_is_stale() {
        assert!(!is_current(100, 50, None, None));
    }

    #[test]
    fn test_size_mismatch_and_older_local_is_stale() {
        assert!(!is_current(100, 10, Some(200), Some(20)));
    }
}

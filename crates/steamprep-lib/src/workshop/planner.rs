use super::types::{DownloadPlan, FileId, FileMetadata, PlannedDownload};
use crate::error::SteamPrepError;
use crate::utils::file_suffix;
use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

use indexmap::IndexMap;
use tracing;

/// Decide which files need downloading by comparing remote metadata against
/// what is already on disk under `install_dir`.
///
/// A file is considered up to date when its local byte size equals the remote
/// `file_size`, or when its local mtime is strictly newer than the remote
/// `time_updated`. The size branch alone is enough to skip, even if the remote
/// content changed without changing size.
pub fn plan_downloads(
    install_dir: &Path,
    details: &IndexMap<FileId, FileMetadata>,
) -> Result<DownloadPlan, SteamPrepError> {
    if install_dir.exists() {
        if !install_dir.is_dir() {
            // Logged, not raised; the downloads will fail individually.
            tracing::error!(
                path = %install_dir.display(),
                "install path exists but is not a directory"
            );
        }
    } else {
        fs::create_dir_all(install_dir)?;
    }

    let mut plan = DownloadPlan::default();
    for (file_id, metadata) in details {
        if metadata.file_url.is_empty() {
            tracing::warn!(
                file_id,
                file = %metadata.file_name,
                "skipping workshop item with no download URL"
            );
            continue;
        }

        let dest = install_dir.join(format!("{file_id}{}", file_suffix(&metadata.file_name)));
        if is_up_to_date(&dest, metadata) {
            tracing::info!(file = %metadata.file_name, "skipping, already exists");
            continue;
        }

        plan.insert(
            file_id.clone(),
            PlannedDownload {
                metadata: metadata.clone(),
                dest,
            },
        );
    }

    Ok(plan)
}

fn is_up_to_date(dest: &Path, metadata: &FileMetadata) -> bool {
    let Ok(stat) = fs::metadata(dest) else {
        return false;
    };
    if stat.len() == metadata.file_size {
        return true;
    }
    let mtime_secs = stat
        .modified()
        .ok()
        .and_then(|mtime| mtime.duration_since(UNIX_EPOCH).ok())
        .map(|since_epoch| since_epoch.as_secs());
    matches!(mtime_secs, Some(mtime) if mtime > metadata.time_updated)
}

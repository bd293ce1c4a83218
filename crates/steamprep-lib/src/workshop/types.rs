use indexmap::IndexMap;
use std::path::PathBuf;

/// Identifier of a Workshop collection, as supplied by the caller.
pub type CollectionId = String;

/// Identifier of a single published Workshop item.
pub type FileId = String;

/// Metadata for a single Workshop item, fetched fresh on every run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileMetadata {
    pub file_id: FileId,
    pub file_name: String,
    pub file_size: u64,
    pub time_updated: u64,
    pub file_url: String,
}

/// A single planned download: the item's metadata plus the destination path
/// it will occupy under the install directory.
#[derive(Clone, Debug)]
pub struct PlannedDownload {
    pub metadata: FileMetadata,
    pub dest: PathBuf,
}

/// The set of files that must be (re)fetched this run. Built once per
/// invocation, consumed once, then discarded.
#[derive(Clone, Debug, Default)]
pub struct DownloadPlan {
    entries: IndexMap<FileId, PlannedDownload>,
}

impl DownloadPlan {
    pub fn insert(&mut self, file_id: FileId, entry: PlannedDownload) {
        self.entries.insert(file_id, entry);
    }

    pub fn get(&self, file_id: &str) -> Option<&PlannedDownload> {
        self.entries.get(file_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> IndexMap<FileId, PlannedDownload> {
        self.entries
    }
}

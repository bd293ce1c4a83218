mod extract;
mod types;
mod update;

pub use extract::{ArchiveExtractor, TarGzExtractor};
pub use types::{AddonSource, Platform};
pub use update::AddonUpdater;

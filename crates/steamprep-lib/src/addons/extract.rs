use crate::error::SteamPrepError;
use std::path::Path;

/// Injected seam for unpacking a downloaded addon archive over the game
/// directory.
pub trait ArchiveExtractor: Send + Sync {
    fn unpack(&self, archive: &Path, dest: &Path) -> Result<(), SteamPrepError>;
}

/// Extracts gzip-compressed tarballs, the format AlliedModders ships.
pub struct TarGzExtractor;

impl ArchiveExtractor for TarGzExtractor {
    fn unpack(&self, archive: &Path, dest: &Path) -> Result<(), SteamPrepError> {
        let file = std::fs::File::open(archive)?;
        let decoder = flate2::read::GzDecoder::new(file);
        let mut reader = tar::Archive::new(decoder);
        reader
            .unpack(dest)
            .map_err(|e| SteamPrepError::Archive {
                path: archive.to_path_buf(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;

    fn build_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (path, data) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, path, *data).unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap()
    }

    #[test]
    fn test_unpack_tar_gz_over_directory() {
        let dir = tempfile::tempdir().unwrap();
        let archive_path = dir.path().join("addon.tar.gz");
        let bytes = build_archive(&[
            ("addons/metamod/metaplugins.ini", b"; plugins" as &[u8]),
            ("addons/metamod.vdf", b"\"Plugin\" {}"),
        ]);
        std::fs::write(&archive_path, bytes).unwrap();

        let dest = dir.path().join("game");
        std::fs::create_dir(&dest).unwrap();
        TarGzExtractor.unpack(&archive_path, &dest).unwrap();

        assert!(dest.join("addons/metamod/metaplugins.ini").is_file());
        assert!(dest.join("addons/metamod.vdf").is_file());
    }

    #[test]
    fn test_unpack_corrupt_archive_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let archive_path = dir.path().join("broken.tar.gz");
        std::fs::write(&archive_path, b"not a gzip stream").unwrap();

        let err = TarGzExtractor
            .unpack(&archive_path, dir.path())
            .unwrap_err();

        assert!(matches!(err, SteamPrepError::Archive { .. }));
    }
}

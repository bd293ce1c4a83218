use std::ffi::OsStr;
use std::path::Path;

/// Extension of a remote display name, dot included. Empty when the name has
/// no extension, including a bare trailing dot. For multi-dot names only the
/// final extension counts, so `"pack.tar.gz"` yields `".gz"`.
pub fn file_suffix(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(OsStr::to_str)
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_suffix_simple_extension() {
        assert_eq!(file_suffix("map.vpk"), ".vpk");
    }

    #[test]
    fn test_file_suffix_no_extension() {
        assert_eq!(file_suffix("README"), "");
    }

    #[test]
    fn test_file_suffix_multiple_dots() {
        assert_eq!(file_suffix("pack.tar.gz"), ".gz");
    }

    #[test]
    fn test_file_suffix_nested_path() {
        assert_eq!(file_suffix("maps/c8m1_apartment.vpk"), ".vpk");
    }

    #[test]
    fn test_file_suffix_empty_name() {
        assert_eq!(file_suffix(""), "");
    }

    #[test]
    fn test_file_suffix_trailing_dot_is_empty() {
        assert_eq!(file_suffix("archive."), "");
    }
}

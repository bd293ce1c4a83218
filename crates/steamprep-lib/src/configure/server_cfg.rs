use crate::error::SteamPrepError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Ban lists exec'd at the end of the patched server.cfg.
pub const DEFAULT_EXEC_CONFIGS: &[&str] = &["banned_user.cfg", "banned_ip.cfg"];

/// A server.cfg value. Strings are written quoted, integers bare.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CfgValue {
    Int(i64),
    Str(String),
}

impl CfgValue {
    fn render_line(&self, key: &str) -> String {
        match self {
            CfgValue::Str(value) => format!("{key} \"{value}\"\n"),
            CfgValue::Int(value) => format!("{key} {value}\n"),
        }
    }
}

/// Patch key/value settings into a server.cfg, line-oriented: matching
/// non-comment keys are replaced in place, unmatched keys are appended, and
/// the file finishes with `exec` lines for the ban configs plus
/// `writeid`/`writeip`. The rewrite goes through a `.new` sibling that is
/// renamed over the original.
pub fn patch_server_cfg(
    cfg_path: &Path,
    settings: &IndexMap<String, CfgValue>,
    exec_configs: &[&str],
) -> Result<(), SteamPrepError> {
    let mut remaining: Vec<&String> = settings.keys().collect();
    let mut output = String::new();

    if cfg_path.exists() {
        let existing = fs::read_to_string(cfg_path)?;
        for line in existing.lines() {
            let mut line = format!("{line}\n");
            if !line.starts_with("//") {
                if let Some(key) = line.split_whitespace().next() {
                    if let Some(position) = remaining.iter().position(|k| k.as_str() == key) {
                        let key = remaining.remove(position);
                        line = settings[key].render_line(key);
                    }
                }
            }
            output.push_str(&line);
        }
    }

    for key in remaining {
        output.push_str(&settings[key].render_line(key));
    }
    for config in exec_configs {
        output.push_str(&format!("exec {config}\n"));
    }
    output.push_str("writeid\n");
    output.push_str("writeip\n");

    let new_path = sibling_new_path(cfg_path);
    fs::write(&new_path, output)?;
    fs::rename(&new_path, cfg_path)?;

    Ok(())
}

fn sibling_new_path(cfg_path: &Path) -> PathBuf {
    let mut name = OsString::from(cfg_path.as_os_str());
    name.push(".new");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(pairs: Vec<(&str, CfgValue)>) -> IndexMap<String, CfgValue> {
        pairs
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }

    #[test]
    fn test_replaces_existing_setting_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("server.cfg");
        fs::write(&cfg, "hostname \"old name\"\nsv_lan 1\n").unwrap();

        patch_server_cfg(
            &cfg,
            &settings(vec![("hostname", CfgValue::Str("new name".to_string()))]),
            &[],
        )
        .unwrap();

        let patched = fs::read_to_string(&cfg).unwrap();
        let lines: Vec<&str> = patched.lines().collect();
        assert_eq!(lines[0], "hostname \"new name\"");
        assert_eq!(lines[1], "sv_lan 1");
    }

    #[test]
    fn test_appends_missing_settings() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("server.cfg");
        fs::write(&cfg, "sv_lan 1\n").unwrap();

        patch_server_cfg(
            &cfg,
            &settings(vec![("sv_maxplayers", CfgValue::Int(8))]),
            &[],
        )
        .unwrap();

        let patched = fs::read_to_string(&cfg).unwrap();
        assert!(patched.contains("sv_lan 1\n"));
        assert!(patched.contains("sv_maxplayers 8\n"));
    }

    #[test]
    fn test_comment_lines_are_never_patched() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("server.cfg");
        fs::write(&cfg, "// hostname is set below\nhostname \"a\"\n").unwrap();

        patch_server_cfg(
            &cfg,
            &settings(vec![("hostname", CfgValue::Str("b".to_string()))]),
            &[],
        )
        .unwrap();

        let patched = fs::read_to_string(&cfg).unwrap();
        assert!(patched.contains("// hostname is set below\n"));
        assert!(patched.contains("hostname \"b\"\n"));
        assert!(!patched.contains("hostname \"a\""));
    }

    #[test]
    fn test_exec_and_write_trailer() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("server.cfg");

        patch_server_cfg(&cfg, &IndexMap::new(), DEFAULT_EXEC_CONFIGS).unwrap();

        let patched = fs::read_to_string(&cfg).unwrap();
        assert!(patched.ends_with(
            "exec banned_user.cfg\nexec banned_ip.cfg\nwriteid\nwriteip\n"
        ));
    }

    #[test]
    fn test_creates_file_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("server.cfg");

        patch_server_cfg(
            &cfg,
            &settings(vec![("hostname", CfgValue::Str("fresh".to_string()))]),
            &[],
        )
        .unwrap();

        assert!(cfg.exists());
        assert!(fs::read_to_string(&cfg)
            .unwrap()
            .starts_with("hostname \"fresh\"\n"));
    }
}

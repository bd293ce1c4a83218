use crate::error::SteamPrepError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A sourcemod admin group: access flags plus an immunity level.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AdminGroup {
    pub name: String,
    pub flags: String,
    pub immunity: u32,
}

/// A sourcemod admin, placed into a group, with an optional password.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Admin {
    /// Steam identity, e.g. `STEAM_0:1:1234`.
    pub identity: String,
    pub group: String,
    #[serde(default)]
    pub password: Option<String>,
}

/// Render admin_groups.cfg in Valve KeyValues form.
pub fn render_admin_groups(groups: &[AdminGroup]) -> String {
    let mut out = String::from("Groups\n{\n");
    for group in groups {
        out.push_str(&format!(
            "    \"{}\"\n    {{\n        \"flags\" \"{}\"\n        \"immunity\" \"{}\"\n    }}\n",
            group.name, group.flags, group.immunity
        ));
    }
    out.push_str("}\n");
    out
}

/// Render admins_simple.ini, one admin per line.
pub fn render_admins_simple(admins: &[Admin]) -> String {
    let mut out = String::new();
    for admin in admins {
        match &admin.password {
            Some(password) => out.push_str(&format!(
                "\"{}\" \"@{}\" \"{}\"\n",
                admin.identity, admin.group, password
            )),
            None => out.push_str(&format!("\"{}\" \"@{}\"\n", admin.identity, admin.group)),
        }
    }
    out
}

/// Replace the sourcemod admin config files under its configs directory.
pub fn write_sourcemod_configs(
    configs_dir: &Path,
    groups: &[AdminGroup],
    admins: &[Admin],
) -> Result<(), SteamPrepError> {
    fs::create_dir_all(configs_dir)?;
    fs::write(configs_dir.join("admin_groups.cfg"), render_admin_groups(groups))?;
    fs::write(
        configs_dir.join("admins_simple.ini"),
        render_admins_simple(admins),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str, flags: &str, immunity: u32) -> AdminGroup {
        AdminGroup {
            name: name.to_string(),
            flags: flags.to_string(),
            immunity,
        }
    }

    #[test]
    fn test_render_admin_groups() {
        let rendered = render_admin_groups(&[group("Full Admins", "abcdefghij", 99)]);

        assert!(rendered.starts_with("Groups\n{\n"));
        assert!(rendered.contains("\"Full Admins\""));
        assert!(rendered.contains("\"flags\" \"abcdefghij\""));
        assert!(rendered.contains("\"immunity\" \"99\""));
        assert!(rendered.ends_with("}\n"));
    }

    #[test]
    fn test_render_admins_with_and_without_password() {
        let admins = vec![
            Admin {
                identity: "STEAM_0:1:1234".to_string(),
                group: "Full Admins".to_string(),
                password: Some("sekrit".to_string()),
            },
            Admin {
                identity: "STEAM_0:0:42".to_string(),
                group: "Moderators".to_string(),
                password: None,
            },
        ];

        let rendered = render_admins_simple(&admins);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "\"STEAM_0:1:1234\" \"@Full Admins\" \"sekrit\"");
        assert_eq!(lines[1], "\"STEAM_0:0:42\" \"@Moderators\"");
    }

    #[test]
    fn test_write_sourcemod_configs_creates_files() {
        let dir = tempfile::tempdir().unwrap();
        let configs_dir = dir.path().join("sourcemod/configs");

        write_sourcemod_configs(&configs_dir, &[group("G", "a", 1)], &[]).unwrap();

        assert!(configs_dir.join("admin_groups.cfg").is_file());
        assert!(configs_dir.join("admins_simple.ini").is_file());
    }
}

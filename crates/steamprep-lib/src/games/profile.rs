use std::path::{Path, PathBuf};

/// Application IDs for the supported dedicated servers.
pub mod app_ids {
    pub const GARRYSMOD: u32 = 4020;
    pub const L4D: u32 = 222840;
    pub const L4D2: u32 = 222860;
}

/// Per-game filesystem layout and supervision commands, derived from the app
/// ID and the instance's install path.
#[derive(Clone, Debug)]
pub struct GameProfile {
    pub app_id: u32,
    pub friendly_name: String,
    /// Root of the game's own content tree under the install path.
    pub game_dir: PathBuf,
    pub addons_dir: PathBuf,
    pub executable: PathBuf,
    pub stop_cmd: String,
    /// Whether this is a Source engine game that can host metamod/sourcemod.
    pub source_mod_game: bool,
}

impl GameProfile {
    pub fn left4dead2(install_path: &Path, server_ref: &str) -> Self {
        Self::source_game(app_ids::L4D2, "left4dead2", install_path, server_ref)
    }

    pub fn left4dead(install_path: &Path, server_ref: &str) -> Self {
        Self::source_game(app_ids::L4D, "left4dead", install_path, server_ref)
    }

    pub fn garrysmod(install_path: &Path, server_ref: &str) -> Self {
        Self::source_game(app_ids::GARRYSMOD, "garrysmod", install_path, server_ref)
    }

    /// Profile for any app ID; known games get their specific layout, the
    /// rest a generic srcds-style one named after the app ID.
    pub fn for_app(app_id: u32, install_path: &Path, server_ref: &str) -> Self {
        match app_id {
            app_ids::L4D2 => Self::left4dead2(install_path, server_ref),
            app_ids::L4D => Self::left4dead(install_path, server_ref),
            app_ids::GARRYSMOD => Self::garrysmod(install_path, server_ref),
            other => Self {
                source_mod_game: false,
                ..Self::source_game(other, &format!("app-{other}"), install_path, server_ref)
            },
        }
    }

    fn source_game(app_id: u32, name: &str, install_path: &Path, server_ref: &str) -> Self {
        let game_dir = install_path.join(name);
        Self {
            app_id,
            friendly_name: name.to_string(),
            addons_dir: game_dir.join("addons"),
            game_dir,
            executable: install_path.join("srcds_run"),
            stop_cmd: "/usr/local/bin/steamprep signal $MAINPID \
                       --cmd 'say Server shutting down in 10 seconds' --cmd quit --cmd-delay 10"
                .to_string(),
            source_mod_game: true,
        }
    }
}

/// Where an app instance is installed:
/// `{install_base_path}/{app_id}/{server_ref}`.
pub fn install_path(install_base_path: &Path, app_id: u32, server_ref: &str) -> PathBuf {
    install_base_path.join(app_id.to_string()).join(server_ref)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_path_layout() {
        assert_eq!(
            install_path(Path::new("/home/steam/games"), app_ids::L4D2, "0"),
            PathBuf::from("/home/steam/games/222860/0")
        );
    }

    #[test]
    fn test_left4dead2_profile_layout() {
        let base = install_path(Path::new("/home/steam/games"), app_ids::L4D2, "0");
        let profile = GameProfile::for_app(app_ids::L4D2, &base, "0");

        assert_eq!(profile.friendly_name, "left4dead2");
        assert_eq!(
            profile.addons_dir,
            PathBuf::from("/home/steam/games/222860/0/left4dead2/addons")
        );
        assert_eq!(
            profile.executable,
            PathBuf::from("/home/steam/games/222860/0/srcds_run")
        );
        assert!(profile.source_mod_game);
    }

    #[test]
    fn test_unknown_app_gets_generic_profile() {
        let profile = GameProfile::for_app(90, Path::new("/srv/hlds"), "1");

        assert_eq!(profile.friendly_name, "app-90");
        assert_eq!(profile.game_dir, PathBuf::from("/srv/hlds/app-90"));
        assert!(!profile.source_mod_game);
    }
}

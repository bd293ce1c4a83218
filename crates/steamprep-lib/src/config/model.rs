use crate::addons::Platform;
use crate::configure::{Admin, AdminGroup, CfgValue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub workshop: WorkshopConfig,
    #[serde(default)]
    pub sourcemod: Option<SourcemodConfig>,
    /// Key/value settings patched into the game's server.cfg.
    #[serde(default)]
    pub server_cfg: IndexMap<String, CfgValue>,
    #[serde(default)]
    pub systemd: Option<SystemdConfig>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Steam application ID, see https://steamdb.info/apps/
    pub app_id: u32,
    /// Appended to the install path so several servers of one app can coexist.
    #[serde(default = "default_server_ref")]
    pub server_ref: String,
    #[serde(default = "default_steamcmd_path")]
    pub steamcmd_path: PathBuf,
    /// Temporary location for the generated steamcmd script.
    #[serde(default = "default_script_path")]
    pub script_path: PathBuf,
    #[serde(default = "default_install_base_path")]
    pub install_base_path: PathBuf,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WorkshopConfig {
    /// Workshop collection IDs whose members are installed into the addons
    /// directory.
    #[serde(default)]
    pub collections: Vec<String>,
    #[serde(default = "default_retries")]
    pub retries: usize,
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
    /// Concurrent workshop downloads; 1 keeps transfers fully sequential.
    #[serde(default = "default_download_parallelism")]
    pub download_parallelism: usize,
}

impl Default for WorkshopConfig {
    fn default() -> Self {
        Self {
            collections: Vec::new(),
            retries: default_retries(),
            retry_delay_secs: default_retry_delay_secs(),
            download_parallelism: default_download_parallelism(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SourcemodConfig {
    #[serde(default = "default_metamod_version")]
    pub metamod_version: String,
    #[serde(default = "default_sourcemod_version")]
    pub sourcemod_version: String,
    /// Which platform's addon assets to fetch. Never derived from the host.
    pub platform: Platform,
    #[serde(default)]
    pub groups: Vec<AdminGroup>,
    #[serde(default)]
    pub admins: Vec<Admin>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SystemdConfig {
    #[serde(default = "default_run_user")]
    pub run_user: String,
    #[serde(default = "default_run_group")]
    pub run_group: String,
    #[serde(default = "default_unit_dir")]
    pub unit_dir: PathBuf,
}

impl Default for SystemdConfig {
    fn default() -> Self {
        Self {
            run_user: default_run_user(),
            run_group: default_run_group(),
            unit_dir: default_unit_dir(),
        }
    }
}

fn default_server_ref() -> String {
    "0".to_string()
}

fn default_steamcmd_path() -> PathBuf {
    PathBuf::from("/usr/games/steamcmd")
}

fn default_script_path() -> PathBuf {
    PathBuf::from("/home/steam/steamprep-update.script")
}

fn default_install_base_path() -> PathBuf {
    PathBuf::from("/home/steam/games")
}

fn default_retries() -> usize {
    crate::workshop::DEFAULT_RETRIES
}

fn default_retry_delay_secs() -> u64 {
    crate::workshop::DEFAULT_RETRY_DELAY.as_secs()
}

fn default_download_parallelism() -> usize {
    1
}

fn default_metamod_version() -> String {
    "1.11".to_string()
}

fn default_sourcemod_version() -> String {
    "1.10".to_string()
}

fn default_run_user() -> String {
    "steam".to_string()
}

fn default_run_group() -> String {
    "steam".to_string()
}

fn default_unit_dir() -> PathBuf {
    PathBuf::from("/etc/systemd/system")
}

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SteamPrepError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Remote metadata endpoint unavailable after {attempts} attempts at {url}: status {status}, body: {body}")]
    RemoteUnavailable {
        url: String,
        attempts: usize,
        status: u16,
        body: String,
    },

    #[error("Failed to transfer workshop file {file_id} from {url}: status {status}")]
    TransferFailed {
        file_id: String,
        url: String,
        status: u16,
    },

    #[error("Download error: {message}")]
    Download { message: String },

    #[error("steamcmd install failed for app {app_id}, server reference {server_ref}: stdout: {stdout}, stderr: {stderr}")]
    InstallFailed {
        app_id: u32,
        server_ref: String,
        stdout: String,
        stderr: String,
    },

    #[error("Addon update failed for {asset}: {reason}")]
    AddonUpdate { asset: String, reason: String },

    #[error("Failed to unpack archive {path}: {reason}")]
    Archive { path: PathBuf, reason: String },

    #[error("Process stdin file descriptor does not exist for pid {pid}")]
    SignalTarget { pid: u32 },

    #[error("systemd daemon-reload failed: stdout: {stdout}, stderr: {stderr}")]
    SystemdReload { stdout: String, stderr: String },

    #[error("Invalid command-line arguments: {details}")]
    CliArgumentValidation { details: String },

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] eyre::Report),
}

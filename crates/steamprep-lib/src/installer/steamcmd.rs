use super::script::render_install_script;
use crate::error::SteamPrepError;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

/// What to install: the app plus where it lives on disk.
#[derive(Clone, Debug)]
pub struct InstallRequest {
    pub app_id: u32,
    pub server_ref: String,
    pub install_path: PathBuf,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Injected capability that performs the actual application install, keeping
/// the rest of the pipeline free of subprocess side effects.
#[async_trait]
pub trait Installer: Send + Sync {
    async fn install(&self, request: &InstallRequest) -> Result<(), SteamPrepError>;
}

/// Installs applications by rendering a script to a temporary path and
/// handing it to `steamcmd +runscript`. The script is removed afterwards,
/// also when the install fails.
pub struct SteamCmdInstaller {
    steamcmd_path: PathBuf,
    script_path: PathBuf,
}

impl SteamCmdInstaller {
    pub fn new(steamcmd_path: PathBuf, script_path: PathBuf) -> Self {
        Self {
            steamcmd_path,
            script_path,
        }
    }
}

#[async_trait]
impl Installer for SteamCmdInstaller {
    async fn install(&self, request: &InstallRequest) -> Result<(), SteamPrepError> {
        info!(
            app_id = request.app_id,
            server_ref = %request.server_ref,
            "installing app"
        );

        let script = render_install_script(
            request.app_id,
            &request.install_path,
            request.username.as_deref(),
            request.password.as_deref(),
        );
        tokio::fs::write(&self.script_path, script).await?;

        let result = tokio::process::Command::new(&self.steamcmd_path)
            .arg("+runscript")
            .arg(&self.script_path)
            .output()
            .await;

        if let Err(cleanup) = tokio::fs::remove_file(&self.script_path).await {
            if cleanup.kind() != std::io::ErrorKind::NotFound {
                return Err(cleanup.into());
            }
        }

        let output = result?;
        if !output.status.success() {
            return Err(SteamPrepError::InstallFailed {
                app_id: request.app_id,
                server_ref: request.server_ref.clone(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        info!(
            app_id = request.app_id,
            server_ref = %request.server_ref,
            "finished installing app"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(install_path: PathBuf) -> InstallRequest {
        InstallRequest {
            app_id: 222860,
            server_ref: "0".to_string(),
            install_path,
            username: None,
            password: None,
        }
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_successful_install_removes_script() {
        let dir = tempfile::tempdir().unwrap();
        let script_path = dir.path().join("update.script");
        let installer = SteamCmdInstaller::new(PathBuf::from("/bin/true"), script_path.clone());

        installer
            .install(&request(dir.path().join("install")))
            .await
            .unwrap();

        assert!(!script_path.exists());
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_failed_install_reports_and_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let script_path = dir.path().join("update.script");
        let installer = SteamCmdInstaller::new(PathBuf::from("/bin/false"), script_path.clone());

        let err = installer
            .install(&request(dir.path().join("install")))
            .await
            .unwrap_err();

        assert!(matches!(err, SteamPrepError::InstallFailed { app_id: 222860, .. }));
        assert!(!script_path.exists());
    }
}

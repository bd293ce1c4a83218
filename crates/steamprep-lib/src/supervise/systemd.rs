use crate::error::SteamPrepError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything needed to render the service and companion stdin socket units
/// for one server instance.
#[derive(Clone, Debug)]
pub struct ServiceSpec {
    pub friendly_name: String,
    pub server_ref: String,
    pub start_cmd: String,
    pub stop_cmd: String,
    pub run_user: String,
    pub run_group: String,
}

impl ServiceSpec {
    pub fn unit_name(&self) -> String {
        format!("{}-{}", self.friendly_name, self.server_ref)
    }
}

pub fn render_service_unit(spec: &ServiceSpec) -> String {
    format!(
        "[Unit]\n\
         Description={name} dedicated server ({server_ref})\n\
         After=network.target\n\
         \n\
         [Service]\n\
         Type=simple\n\
         User={user}\n\
         Group={group}\n\
         ExecStart={start}\n\
         ExecStop={stop}\n\
         Sockets={unit}.socket\n\
         StandardInput=socket\n\
         StandardOutput=journal\n\
         Restart=on-failure\n\
         \n\
         [Install]\n\
         WantedBy=multi-user.target\n",
        name = spec.friendly_name,
        server_ref = spec.server_ref,
        user = spec.run_user,
        group = spec.run_group,
        start = spec.start_cmd,
        stop = spec.stop_cmd,
        unit = spec.unit_name(),
    )
}

pub fn render_socket_unit(spec: &ServiceSpec) -> String {
    format!(
        "[Unit]\n\
         Description=stdin socket for {name} ({server_ref})\n\
         \n\
         [Socket]\n\
         ListenFIFO=%t/{unit}.stdin\n\
         SocketUser={user}\n\
         SocketGroup={group}\n\
         SocketMode=0660\n\
         Service={unit}.service\n",
        name = spec.friendly_name,
        server_ref = spec.server_ref,
        user = spec.run_user,
        group = spec.run_group,
        unit = spec.unit_name(),
    )
}

/// Write the service and socket unit files under `unit_dir`. Returns both
/// paths so callers can report or enable them.
pub fn install_units(
    spec: &ServiceSpec,
    unit_dir: &Path,
) -> Result<(PathBuf, PathBuf), SteamPrepError> {
    let service_path = unit_dir.join(format!("{}.service", spec.unit_name()));
    let socket_path = unit_dir.join(format!("{}.socket", spec.unit_name()));

    fs::write(&service_path, render_service_unit(spec))?;
    fs::write(&socket_path, render_socket_unit(spec))?;
    info!(
        service = %service_path.display(),
        socket = %socket_path.display(),
        "installed systemd units"
    );

    Ok((service_path, socket_path))
}

/// Ask systemd to pick up freshly written unit files.
pub async fn daemon_reload() -> Result<(), SteamPrepError> {
    let output = tokio::process::Command::new("/bin/systemctl")
        .arg("daemon-reload")
        .output()
        .await?;

    if !output.status.success() {
        return Err(SteamPrepError::SystemdReload {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    Ok(())
}

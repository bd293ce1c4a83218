mod script;
mod steamcmd;

pub use script::render_install_script;
pub use steamcmd::{InstallRequest, Installer, SteamCmdInstaller};

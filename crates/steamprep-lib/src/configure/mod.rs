mod server_cfg;
mod sourcemod;

pub use server_cfg::{patch_server_cfg, CfgValue, DEFAULT_EXEC_CONFIGS};
pub use sourcemod::{
    render_admin_groups, render_admins_simple, write_sourcemod_configs, Admin, AdminGroup,
};

use crate::addons::{AddonSource, AddonUpdater, TarGzExtractor};
use crate::cli::params::InstallParams;
use crate::config::Config;
use crate::configure::{patch_server_cfg, write_sourcemod_configs, DEFAULT_EXEC_CONFIGS};
use crate::error::SteamPrepError;
use crate::games::{install_path, GameProfile};
use crate::installer::{InstallRequest, Installer, SteamCmdInstaller};
use crate::supervise::{daemon_reload, install_units, ServiceSpec};
use crate::workshop::{sync_collections, HttpTransport, MetadataClient};
use std::time::Duration;
use tracing::info;

/// Run the full install pipeline: steamcmd install, workshop sync into the
/// addons directory, metamod/sourcemod update plus admin config rendering,
/// server.cfg patching, and systemd unit installation.
pub async fn run_install(params: InstallParams) -> Result<(), SteamPrepError> {
    let config = params.config;
    let base = install_path(
        &config.server.install_base_path,
        config.server.app_id,
        &config.server.server_ref,
    );
    let profile = GameProfile::for_app(config.server.app_id, &base, &config.server.server_ref);

    let installer = SteamCmdInstaller::new(
        config.server.steamcmd_path.clone(),
        config.server.script_path.clone(),
    );
    installer
        .install(&InstallRequest {
            app_id: config.server.app_id,
            server_ref: config.server.server_ref.clone(),
            install_path: base.clone(),
            username: config.server.username.clone(),
            password: config.server.password.clone(),
        })
        .await?;

    let http = reqwest::Client::new();

    if !config.workshop.collections.is_empty() {
        sync_workshop(&config, &http, &profile).await?;
    }

    if let Some(sourcemod) = &config.sourcemod {
        if profile.source_mod_game {
            update_sourcemod_stack(sourcemod, &http, &profile).await?;
        } else {
            tracing::warn!(
                app_id = config.server.app_id,
                "sourcemod configured but this is not a Source engine game, skipping"
            );
        }
    }

    if !config.server_cfg.is_empty() {
        patch_server_cfg(
            &profile.game_dir.join("cfg/server.cfg"),
            &config.server_cfg,
            DEFAULT_EXEC_CONFIGS,
        )?;
        info!("patched server.cfg");
    }

    if let Some(systemd) = &config.systemd {
        let spec = ServiceSpec {
            friendly_name: profile.friendly_name.clone(),
            server_ref: config.server.server_ref.clone(),
            start_cmd: profile.executable.display().to_string(),
            stop_cmd: profile.stop_cmd.clone(),
            run_user: systemd.run_user.clone(),
            run_group: systemd.run_group.clone(),
        };
        install_units(&spec, &systemd.unit_dir)?;
        daemon_reload().await?;
    }

    info!("install pipeline finished");
    Ok(())
}

async fn sync_workshop(
    config: &Config,
    http: &reqwest::Client,
    profile: &GameProfile,
) -> Result<usize, SteamPrepError> {
    let client = MetadataClient::with_transport(HttpTransport::new()).with_retry(
        config.workshop.retries,
        Duration::from_secs(config.workshop.retry_delay_secs),
    );

    sync_collections(
        &client,
        http,
        &config.workshop.collections,
        &profile.addons_dir,
        config.workshop.download_parallelism,
    )
    .await
}

async fn update_sourcemod_stack(
    sourcemod: &crate::config::SourcemodConfig,
    http: &reqwest::Client,
    profile: &GameProfile,
) -> Result<(), SteamPrepError> {
    let updater = AddonUpdater::new(http);
    let extractor = TarGzExtractor;

    let sources = [
        AddonSource::metamod(&sourcemod.metamod_version, sourcemod.platform),
        AddonSource::sourcemod(&sourcemod.sourcemod_version, sourcemod.platform),
    ];
    for source in &sources {
        let archive = profile.addons_dir.join(format!("{}.tar.gz", source.name));
        updater
            .update(source, &archive, &profile.game_dir, &extractor)
            .await?;
    }

    write_sourcemod_configs(
        &profile.addons_dir.join("sourcemod/configs"),
        &sourcemod.groups,
        &sourcemod.admins,
    )?;

    Ok(())
}

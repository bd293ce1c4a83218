use crate::cli::args::Command;
use crate::cli::params::{InstallParams, SignalParams, WorkshopParams};
use crate::config::load_config;
use crate::error::SteamPrepError;
use crate::games::{install_path, GameProfile};
use crate::supervise::SignalRequest;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum ResolvedCommand {
    Install(InstallParams),
    Workshop(WorkshopParams),
    Signal(SignalParams),
}

pub fn resolve_command(command: Command) -> Result<ResolvedCommand, SteamPrepError> {
    match command {
        Command::Install { config_path } => {
            let config = load_config(&config_path)?;
            Ok(ResolvedCommand::Install(InstallParams { config }))
        }
        Command::Workshop {
            config_path,
            output_dir,
            parallelism,
        } => {
            let config = load_config(&config_path)?;

            if let Some(value) = parallelism {
                if value == 0 {
                    return Err(SteamPrepError::CliArgumentValidation {
                        details: "download-parallelism must be greater than 0.".to_string(),
                    });
                }
            }

            let install_dir = match output_dir {
                Some(dir) => PathBuf::from(dir),
                None => {
                    let base = install_path(
                        &config.server.install_base_path,
                        config.server.app_id,
                        &config.server.server_ref,
                    );
                    GameProfile::for_app(config.server.app_id, &base, &config.server.server_ref)
                        .addons_dir
                }
            };

            let parallelism = parallelism.unwrap_or(config.workshop.download_parallelism);
            Ok(ResolvedCommand::Workshop(WorkshopParams {
                config,
                install_dir,
                parallelism,
            }))
        }
        Command::Signal {
            pid,
            commands,
            cmd_delay,
            no_newline,
        } => {
            if commands.is_empty() {
                return Err(SteamPrepError::CliArgumentValidation {
                    details: "At least one --cmd must be provided.".to_string(),
                });
            }

            Ok(ResolvedCommand::Signal(SignalParams {
                request: SignalRequest {
                    pid,
                    commands,
                    delay: Duration::from_secs(cmd_delay),
                    append_newline: !no_newline,
                },
            }))
        }
    }
}

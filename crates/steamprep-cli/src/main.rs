use steamprep_lib::cli::{
    parse_args, resolve_command, run_install, run_signal, run_workshop, ResolvedCommand,
};
use steamprep_lib::error::SteamPrepError;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), SteamPrepError> {
    color_eyre::install()?;

    let args = parse_args();
    let command = resolve_command(args.command)?;

    match command {
        ResolvedCommand::Install(params) => run_install(params).await?,
        ResolvedCommand::Workshop(params) => run_workshop(params).await?,
        ResolvedCommand::Signal(params) => run_signal(params).await?,
    }

    Ok(())
}

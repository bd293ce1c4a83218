use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber;

#[derive(Debug, Clone)]
pub enum Command {
    Install {
        config_path: String,
    },
    Workshop {
        config_path: String,
        output_dir: Option<String>,
        parallelism: Option<usize>,
    },
    Signal {
        pid: u32,
        commands: Vec<String>,
        cmd_delay: u64,
        no_newline: bool,
    },
}

pub struct Args {
    pub command: Command,
    pub log_level: Level,
}

#[derive(Debug, Parser)]
#[command(
    name = "steamprep",
    version,
    about = "Install and maintain dedicated Steam game servers: steamcmd installs, workshop content, sourcemod and systemd supervision"
)]
struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count,
        global = true
    )]
    verbose: u8,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Install the app via steamcmd, sync workshop content and configure the server
    Install {
        #[arg(
            short = 'c',
            long = "config",
            value_name = "FILE",
            help = "Sets a custom config file",
            default_value = "steamprep.yaml"
        )]
        config: String,
    },

    /// Sync workshop collections into the addons directory without installing
    Workshop {
        #[arg(
            short = 'c',
            long = "config",
            value_name = "FILE",
            help = "Sets a custom config file",
            default_value = "steamprep.yaml"
        )]
        config: String,

        #[arg(
            short = 'o',
            long = "output-dir",
            value_name = "DIR",
            help = "Overrides the directory workshop files are installed into"
        )]
        output_dir: Option<String>,

        #[arg(
            long = "download-parallelism",
            value_name = "N",
            help = "Maximum number of simultaneous workshop downloads"
        )]
        parallelism: Option<usize>,
    },

    /// Relay commands to a running server's stdin
    Signal {
        #[arg(help = "The PID of the process to send input to fd 0")]
        pid: u32,

        #[arg(
            long = "cmd",
            value_name = "TEXT",
            help = "Text to pass to fd 0 of the process; repeat to send several with a delay between each",
            action = ArgAction::Append,
            required = true
        )]
        cmd: Vec<String>,

        #[arg(
            long = "cmd-delay",
            value_name = "SECONDS",
            help = "Time in seconds between sending each --cmd",
            default_value_t = 0
        )]
        cmd_delay: u64,

        #[arg(
            long = "no-newline",
            help = "If set, a newline won't be automatically appended to commands",
            action = ArgAction::SetTrue
        )]
        no_newline: bool,
    },
}

pub fn parse_args() -> Args {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    let command = match cli.command {
        CliCommand::Install { config } => Command::Install {
            config_path: config,
        },
        CliCommand::Workshop {
            config,
            output_dir,
            parallelism,
        } => Command::Workshop {
            config_path: config,
            output_dir,
            parallelism,
        },
        CliCommand::Signal {
            pid,
            cmd,
            cmd_delay,
            no_newline,
        } => Command::Signal {
            pid,
            commands: cmd,
            cmd_delay,
            no_newline,
        },
    };

    Args { command, log_level }
}

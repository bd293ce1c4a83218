mod args;
mod install;
mod params;
mod resolved_command;
mod signal;
mod workshop;

pub use args::{parse_args, Args, Command};
pub use install::run_install;
pub use params::{InstallParams, SignalParams, WorkshopParams};
pub use resolved_command::{resolve_command, ResolvedCommand};
pub use signal::run_signal;
pub use workshop::run_workshop;

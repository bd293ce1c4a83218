use crate::cli::params::SignalParams;
use crate::error::SteamPrepError;
use crate::supervise::{ProcStdinSignaler, ProcessSignaler};

/// Relay the requested commands to the target process's stdin.
pub async fn run_signal(params: SignalParams) -> Result<(), SteamPrepError> {
    ProcStdinSignaler.send(&params.request).await
}

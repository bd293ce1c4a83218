use crate::error::SteamPrepError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Commands to relay to a running process's stdin, with a delay between
/// consecutive commands.
#[derive(Clone, Debug)]
pub struct SignalRequest {
    pub pid: u32,
    pub commands: Vec<String>,
    pub delay: Duration,
    pub append_newline: bool,
}

/// Injected capability for nudging a supervised game process, so callers
/// building stop commands do not depend on /proc directly.
#[async_trait]
pub trait ProcessSignaler: Send + Sync {
    async fn send(&self, request: &SignalRequest) -> Result<(), SteamPrepError>;
}

/// Writes each command to `/proc/{pid}/fd/0`, sleeping between commands but
/// not after the last one.
pub struct ProcStdinSignaler;

impl ProcStdinSignaler {
    fn stdin_path(pid: u32) -> PathBuf {
        PathBuf::from(format!("/proc/{pid}/fd/0"))
    }
}

#[async_trait]
impl ProcessSignaler for ProcStdinSignaler {
    async fn send(&self, request: &SignalRequest) -> Result<(), SteamPrepError> {
        let stdin_path = Self::stdin_path(request.pid);
        if !stdin_path.exists() {
            return Err(SteamPrepError::SignalTarget { pid: request.pid });
        }

        for (index, command) in request.commands.iter().enumerate() {
            let mut payload = command.clone();
            if request.append_newline {
                payload.push('\n');
            }
            debug!(pid = request.pid, command = %command, "relaying to stdin");
            tokio::fs::write(&stdin_path, payload).await?;

            if index + 1 != request.commands.len() {
                tokio::time::sleep(request.delay).await;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_target_is_an_error() {
        let request = SignalRequest {
            // PIDs are bounded well below this on Linux.
            pid: u32::MAX,
            commands: vec!["quit".to_string()],
            delay: Duration::ZERO,
            append_newline: true,
        };

        let err = ProcStdinSignaler.send(&request).await.unwrap_err();

        assert!(matches!(err, SteamPrepError::SignalTarget { pid } if pid == u32::MAX));
    }
}

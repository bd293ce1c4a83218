use crate::config::Config;
use crate::supervise::SignalRequest;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct InstallParams {
    pub config: Config,
}

#[derive(Debug, Clone)]
pub struct WorkshopParams {
    pub config: Config,
    pub install_dir: PathBuf,
    pub parallelism: usize,
}

#[derive(Debug, Clone)]
pub struct SignalParams {
    pub request: SignalRequest,
}

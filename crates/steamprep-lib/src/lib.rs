pub mod addons;
pub mod cli;
pub mod config;
pub mod configure;
pub mod error;
pub mod games;
pub mod installer;
pub mod supervise;
pub mod utils;
pub mod workshop;

pub use config::Config;
pub use error::SteamPrepError;

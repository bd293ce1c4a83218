mod profile;

pub use profile::{app_ids, install_path, GameProfile};

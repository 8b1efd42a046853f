pub mod config;
pub mod constants;
pub mod types;

pub use config::PlaybackConfig;
pub use constants::*;
pub use types::*;

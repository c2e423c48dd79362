pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{ApiClient, LocalStorage};
pub use app::{App, Rendered};
pub use config::ClientSettings;
pub use utils::error::{ClientError, Result};

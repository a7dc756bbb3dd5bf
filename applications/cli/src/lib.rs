//! Recite command-line player

pub mod config;
pub mod error;
pub mod session;

pub use config::AppConfig;
pub use error::{CliError, Result};
pub use session::{run_until_idle, SessionSummary};

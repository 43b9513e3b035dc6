pub mod config;
pub mod error;

pub use config::{config, set_config, OracleConfig};
pub use error::{OracleError, Result};

//! # Crosslock Telemetry
//!
//! Logging setup shared by Crosslock services and tools.
//!
//! The libraries only emit `tracing` events; a binary calls
//! [`init_tracing`] once to decide where they go.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cl_telemetry::{init_tracing, TelemetryConfig};
//!
//! fn main() {
//!     init_tracing(&TelemetryConfig::from_env()).expect("Failed to init tracing");
//!     // ...
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CL_SERVICE_NAME` | `crosslock` | Service name in log records |
//! | `CL_LOG_LEVEL` / `RUST_LOG` | `info` | Level filter |
//! | `CL_CONSOLE_OUTPUT` | `true` | Print logs |
//! | `CL_JSON_LOGS` | `false` (`true` in containers) | JSON output |

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod logging;
mod tracing_setup;

pub use config::{TelemetryConfig, DEFAULT_SERVICE_NAME};
pub use tracing_setup::{env_filter, init_tracing};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    /// Subscriber could not be installed.
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracerInit(String),

    /// Level filter did not parse.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::const_is_empty)]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = TelemetryError::Config("cl_order=[".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: cl_order=[");
    }
}

//! Error types for dispatching to a target binary.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::args::Route;
use crate::config::ConfigError;

/// Errors that can occur while running the selected target.
///
/// A child that runs and exits non-zero is not an error; its status is
/// passed through unchanged.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The target could not be launched (missing, not executable, ...).
    #[error("Error running {route} ({}): {source}", .program.display())]
    Spawn {
        route: Route,
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The target was launched but its status could not be collected.
    #[error("Error waiting for {route} ({}): {source}", .program.display())]
    Wait {
        route: Route,
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The target path could not be resolved from the config file.
    #[error("Error running {route}: {source}")]
    Config {
        route: Route,
        #[source]
        source: ConfigError,
    },
}

impl DispatchError {
    /// The route whose binary failed.
    pub fn route(&self) -> Route {
        match self {
            DispatchError::Spawn { route, .. }
            | DispatchError::Wait { route, .. }
            | DispatchError::Config { route, .. } => *route,
        }
    }
}

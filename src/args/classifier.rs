//! Argument classifier — raw args → route.

use std::ffi::OsStr;
use std::fmt;

use crate::args::registry::{find_flag, ValidationFlag};

/// Where an invocation is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Capability/version query, answered by the local ffmpeg.
    Local,
    /// Real work, handed to the remote-dispatch wrapper.
    Remote,
}

impl Route {
    /// Name used in error messages and logs.
    pub fn label(self) -> &'static str {
        match self {
            Route::Local => "local ffmpeg",
            Route::Remote => "rffmpeg",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify raw args against the registry.
///
/// An empty vector, or one containing any registry flag at any position,
/// routes locally. Everything else routes remotely. A transcode that
/// happens to carry `-f <container>` therefore also routes locally.
pub fn classify<S: AsRef<OsStr>>(raw_args: &[S], registry: &[ValidationFlag]) -> Route {
    if raw_args.is_empty() {
        return Route::Local;
    }

    match raw_args
        .iter()
        .find_map(|arg| find_flag(arg.as_ref(), registry))
    {
        Some(def) => {
            tracing::debug!(flag = def.flag, description = def.description, "validation flag present");
            Route::Local
        }
        None => Route::Remote,
    }
}

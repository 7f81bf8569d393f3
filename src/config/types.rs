use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Local ffmpeg used for capability queries, unless overridden at build time.
pub const DEFAULT_LOCAL_BINARY: &str = match option_env!("FFROUTE_LOCAL_BINARY") {
    Some(path) => path,
    None => "/usr/lib/jellyfin-ffmpeg/ffmpeg",
};

/// rffmpeg entry point for real work, unless overridden at build time.
pub const DEFAULT_REMOTE_BINARY: &str = match option_env!("FFROUTE_REMOTE_BINARY") {
    Some(path) => path,
    None => "/usr/local/bin/rffmpeg-original",
};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub targets: Targets,
}

/// The two binaries an invocation can be routed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Targets {
    /// Local ffmpeg answering version/codec/format queries.
    #[serde(default = "default_local_binary")]
    pub local: PathBuf,
    /// Remote-dispatch wrapper performing the actual transcode.
    #[serde(default = "default_remote_binary")]
    pub remote: PathBuf,
}

fn default_local_binary() -> PathBuf {
    PathBuf::from(DEFAULT_LOCAL_BINARY)
}

fn default_remote_binary() -> PathBuf {
    PathBuf::from(DEFAULT_REMOTE_BINARY)
}

impl Targets {
    pub fn new(local: impl Into<PathBuf>, remote: impl Into<PathBuf>) -> Self {
        Self {
            local: local.into(),
            remote: remote.into(),
        }
    }
}

impl Default for Targets {
    fn default() -> Self {
        Self {
            local: default_local_binary(),
            remote: default_remote_binary(),
        }
    }
}

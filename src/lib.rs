//! ffroute — an `ffmpeg` stand-in that answers capability queries with the
//! local ffmpeg and hands every other invocation to rffmpeg.

pub mod args;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod signals;

pub use dispatch::{run, run_with_config, Dispatcher};

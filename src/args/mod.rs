//! Argument handling for ffroute.
//!
//! ```text
//! argv → Classify (registry membership) → Route
//! ```
//!
//! Both stages are pure and never rewrite the argument vector.

mod classifier;
mod registry;

pub use classifier::{classify, Route};
pub use registry::{find_flag, validation_flags, ValidationFlag};

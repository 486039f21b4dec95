#![forbid(unsafe_code)]

//! Core: logging facade and engine configuration for fitline.

pub mod config;
pub mod logging;

pub use config::{ConfigError, ConfigParse, FitConfig};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, warn};

#![forbid(unsafe_code)]

pub mod config;
pub mod diagnostics;
pub mod fix;
pub mod host;
pub mod lints;
pub mod model;
#[cfg(feature = "plugin-api")]
pub mod plugin;
pub mod policy;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

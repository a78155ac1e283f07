pub mod config;
pub mod enhance;
pub mod utils;

pub use config::{ClassifyStrategy, FeatureFlags, FlagDefaults, Params};
pub use enhance::{enhance, enhance_with_args};

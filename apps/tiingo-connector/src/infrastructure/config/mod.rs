//! Subscription configuration.

mod settings;

pub use settings::{ConfigError, DEFAULT_RATE_LIMIT, Subscription};

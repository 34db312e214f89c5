//! Subscriber setup for hosts that want the enhancer's diagnostics.
//!
//! The filter directive is always explicit; nothing is read from the
//! environment.

use thiserror::Error;
use tracing_subscriber::filter::{EnvFilter, ParseError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("invalid filter directive: {0}")]
    InvalidDirective(#[from] ParseError),
    #[error("a global subscriber is already installed: {0}")]
    AlreadyInstalled(#[from] TryInitError),
}

/// Parse `directive` (for example `"site_enhance=debug"`) into a filter.
pub fn filter(directive: &str) -> Result<EnvFilter, LoggingError> {
    Ok(EnvFilter::try_new(directive)?)
}

/// Install a global fmt subscriber filtered by `directive`.
pub fn init(directive: &str) -> Result<(), LoggingError> {
    let filter = filter(directive)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()?;
    Ok(())
}

//! Crate-level error type.

use crate::config::error::ConfigError;
use crate::mocks::resolver::ResolveError;
use thiserror::Error;

/// Any error the engine can produce.
///
/// Constructors that both load definitions and resolve a default collection
/// return this umbrella; the narrower operations return [`ConfigError`] or
/// [`ResolveError`] directly.
#[derive(Debug, Error)]
pub enum Error {
    /// Definition loading failed
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Resolution failed
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

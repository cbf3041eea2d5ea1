use thiserror::Error;

use crate::types::{ConfigError, InternalError};

/// Unified error type covering directive parsing, construction, and I/O.
///
/// Returned by convenience entry points like
/// [`UserFile::load()`](crate::authn::UserFile::load); the finer-grained
/// [`ConfigError`] is returned wherever only configuration can fail.
#[derive(Debug, Error)]
pub enum HtgateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Internal(#[from] InternalError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

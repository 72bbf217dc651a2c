use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hash: {0:?} is shorter than {min} characters", min = crate::hash::SHARD_LEN)]
    HashTooShort(String),

    #[error("invalid hash: {0:?} contains characters outside [A-Za-z0-9]")]
    HashCharset(String),
}

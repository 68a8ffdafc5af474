use lockbox_core::{config::ConfigError, register::RegisterError};
use lockbox_driver::error::LockboxDriverError;
use thiserror::Error;

/// A interface for error handling in lockbox.
#[derive(Error, Debug, PartialEq, Clone)]
#[non_exhaustive]
pub enum LockboxError {
    /// A word read back after a commit differs from what was written.
    #[error("Word at {address:#010X} reads {actual:#010X}, but {expected:#010X} was written (mask: {mask:#010X})")]
    VerifyFailed {
        /// Address of the word.
        address: u32,
        /// Bits written.
        expected: u32,
        /// Bits read back.
        actual: u32,
        /// Bits compared.
        mask: u32,
    },
    /// Error in the driver.
    #[error("{0}")]
    Internal(LockboxDriverError),
}

// GRCOV_EXCL_START
impl From<LockboxDriverError> for LockboxError {
    fn from(e: LockboxDriverError) -> Self {
        Self::Internal(e)
    }
}

impl From<RegisterError> for LockboxError {
    fn from(e: RegisterError) -> Self {
        Self::Internal(e.into())
    }
}

impl From<ConfigError> for LockboxError {
    fn from(e: ConfigError) -> Self {
        Self::Internal(e.into())
    }
}
// GRCOV_EXCL_STOP

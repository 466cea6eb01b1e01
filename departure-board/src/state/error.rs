//! Persistence error types.

/// Errors from reading or writing the saved state.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// State file exists but could not be read
    #[error("failed to read state file: {message}")]
    Read { message: String },

    /// State file could not be written
    #[error("failed to write state file: {message}")]
    Write { message: String },

    /// Saved state is not valid JSON for this version
    #[error("saved state is corrupt: {message}")]
    Corrupt { message: String },

    /// State could not be serialized
    #[error("failed to serialize state: {message}")]
    Serialize { message: String },
}

use bibliotheca_core::{Refused, StorageError, ValidationError};

/// Failure of a single shell command
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The library declined the operation; nothing was changed
    #[error("Refused: {0}")]
    Refused(#[from] Refused),
    /// An argument did not pass model validation
    #[error("Invalid input: {0}")]
    Invalid(#[from] ValidationError),
    /// Loading the library failed
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// At least one data file could not be written
    #[error("Saving failed for {0}")]
    Save(String),
    /// The access code did not match
    #[error("Wrong access code")]
    WrongCode,
}

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModeError {
    /// There is no most frequent value without at least one value
    #[error("cannot find the mode of an empty sequence")]
    EmptyInput,
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Token stream errors
    #[error("Back-reference offset {offset} exceeds decoded output of {available} units")]
    InvalidReference { offset: u16, available: usize },

    #[error("Truncated token stream: {trailing} trailing bytes do not form a whole token")]
    TruncatedStream { trailing: usize },

    #[error("Field overflow: {field} value {value} exceeds maximum {max}")]
    FieldOverflow { field: &'static str, value: u64, max: u64 },

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

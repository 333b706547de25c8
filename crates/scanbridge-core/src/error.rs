use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Identifier errors
    #[error("Empty tag identifier")]
    EmptyIdentifier,

    #[error("Odd-length hex identifier: {0} digits")]
    OddLengthHex(usize),

    #[error("Invalid hex digit '{digit}' at position {position}")]
    InvalidHexDigit { digit: char, position: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("path contains non-ASCII characters: {input}")]
    NonAscii { input: String },
    #[error("path is empty")]
    Empty,
    #[error("path '{input}' must start with '/'")]
    MissingLeadingSlash { input: String },
    #[error("path contains control or whitespace byte {byte} in '{input}'")]
    ControlOrWhitespace { input: String, byte: u8 },
    #[error("path contains disallowed character '{character}' (byte {byte}) in '{input}'")]
    DisallowedCharacter {
        input: String,
        character: char,
        byte: u8,
    },
    #[error("path '{input}' contains a parent traversal segment")]
    InvalidParentTraversal { input: String },
}

pub type PathResult<T> = Result<T, PathError>;

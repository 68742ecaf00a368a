use crate::parser;

/// Crate Error type
#[derive(Debug)]
pub enum Error {
    /// Input matches neither the dice grammar nor a bare integer
    Pest(Box<pest::error::Error<parser::Rule>>),
    /// Input is grammatical but carries values that can't be rolled
    Notation(String),
    /// Descriptor is structurally invalid and can't be resolved
    Descriptor(String),
    Other(String),
}

impl Error {
    /// Check if the error comes from rejecting a notation string
    pub fn is_invalid_notation(&self) -> bool {
        matches!(self, Self::Pest(_) | Self::Notation(_))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pest(e) => write!(f, "{e}"),
            Self::Notation(e) => write!(f, "invalid notation: {e}"),
            Self::Descriptor(e) => write!(f, "invalid descriptor: {e}"),
            Self::Other(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<pest::error::Error<parser::Rule>> for Error {
    fn from(value: pest::error::Error<parser::Rule>) -> Self {
        Self::Pest(Box::new(value))
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Self::Other(value.to_string())
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Self::Other(value)
    }
}

/// Crate Result type
pub type Result<T> = std::result::Result<T, Error>;

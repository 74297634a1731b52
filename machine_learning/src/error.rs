use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug)]
pub enum MlErr {
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    InvalidParameter {
        name: &'static str,
        reason: String,
    },
    NonBinaryLabels {
        label: usize,
    },
    EmptyDataset,
    InvalidModelFile(String),
    Io(io::Error),
    Serialization(bincode::Error),
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch in {what}, got {got} and expected {expected}"
            ),
            MlErr::InvalidParameter { name, reason } => {
                write!(f, "Invalid value for parameter `{name}`: {reason}")
            }
            MlErr::NonBinaryLabels { label } => write!(
                f,
                "Binary classification requires labels in {{0, 1}}, found label {label}"
            ),
            MlErr::EmptyDataset => write!(f, "The dataset has no samples"),
            MlErr::InvalidModelFile(msg) => write!(f, "Invalid model file: {msg}"),
            MlErr::Io(e) => write!(f, "io error: {e}"),
            MlErr::Serialization(e) => write!(f, "serialization error: {e}"),
        }
    }
}

impl Error for MlErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MlErr::Io(e) => Some(e),
            MlErr::Serialization(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<io::Error> for MlErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<bincode::Error> for MlErr {
    fn from(value: bincode::Error) -> Self {
        Self::Serialization(value)
    }
}

impl MlErr {
    /// Shorthand for building an `InvalidParameter` error.
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MillerError {
    #[error("Configuration error in '{}': {reason}", .path.display())]
    Config { path: PathBuf, reason: String },

    #[error("Invalid parameter {field} = {value}: {reason}")]
    Parameter {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error at '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported dataset format '{extension}' (expected .nc or .npz)")]
    Format { extension: String },

    #[error("Shape mismatch: expected {expected} samples, got {got}")]
    Shape { expected: usize, got: usize },

    #[error("Failed to render '{}': {reason}", .path.display())]
    Render { path: PathBuf, reason: String },

    #[error("Failed to write dataset '{}': {reason}", .path.display())]
    Dataset { path: PathBuf, reason: String },
}

impl MillerError {
    pub fn parameter(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        MillerError::Parameter {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MillerError::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit status for this failure. Argument errors exit with 2
    /// from the parser before any of these can occur.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

pub type MillerResult<T> = Result<T, MillerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = MillerError::parameter("delta", 1.5, "must lie in [-1, 1]");
        assert_eq!(
            err.to_string(),
            "Invalid parameter delta = 1.5: must lie in [-1, 1]"
        );

        let err = MillerError::Config {
            path: PathBuf::from("input.toml"),
            reason: "file not found".into(),
        };
        assert!(err.to_string().contains("input.toml"));

        let err = MillerError::Format {
            extension: "csv".into(),
        };
        assert!(err.to_string().contains("'csv'"));
    }

    #[test]
    fn test_exit_code_nonzero() {
        let err = MillerError::io(
            "missing/out.png",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
        );
        assert_ne!(err.exit_code(), 0);
        assert!(err.to_string().contains("missing/out.png"));
    }
}

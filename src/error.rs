//! RB-002: Crate error type.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("storage error on '{key}': {message}")]
    Storage { key: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("{} validation error(s): {}", .0.len(), .0.join("; "))]
    Validation(Vec<String>),

    #[error("index {index} out of range for {day} ({len} entries)")]
    IndexOutOfRange {
        day: String,
        index: usize,
        len: usize,
    },

    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("unknown weekday '{0}'")]
    UnknownWeekday(String),

    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    #[error("recipe '{0}' not found")]
    NotFound(String),
}

impl Error {
    pub(crate) fn storage(key: &str, message: impl std::fmt::Display) -> Self {
        Self::Storage {
            key: key.to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rb002_validation_display() {
        let err = Error::Validation(vec!["title must not be empty".into(), "servings must be >= 1".into()]);
        assert_eq!(
            err.to_string(),
            "2 validation error(s): title must not be empty; servings must be >= 1"
        );
    }

    #[test]
    fn test_rb002_index_out_of_range_display() {
        let err = Error::IndexOutOfRange {
            day: "Monday".into(),
            index: 4,
            len: 2,
        };
        assert_eq!(err.to_string(), "index 4 out of range for Monday (2 entries)");
    }

    #[test]
    fn test_rb002_non_finite_display() {
        let err = Error::NonFinite {
            field: "rating",
            value: f64::INFINITY,
        };
        assert_eq!(err.to_string(), "rating must be a finite number, got inf");
    }

    #[test]
    fn test_rb002_storage_helper() {
        let err = Error::storage("recipes", "disk full");
        assert_eq!(err.to_string(), "storage error on 'recipes': disk full");
    }
}

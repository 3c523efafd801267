use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Required row not found: no line item matching '{0}'")]
    MissingKeyRow(String),

    #[error("Expected {expected} columns (line item, prior year, current year), found {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error("Input contains no data rows")]
    EmptyInput,

    #[error("Unsupported file extension: {0}")]
    UnsupportedFormat(String),

    #[error("GEMINI_API_KEY environment variable is not set")]
    ApiKeyMissing,

    #[error("AI service error: {0}")]
    Service(String),

    #[cfg(feature = "gemini")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// How a data-load failure affects an ongoing conversation session.
///
/// Structural failures (a malformed or incomplete table) leave any existing
/// session intact so the user can fix the file and continue. Everything else
/// invalidates the session and its history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    Structural,
    Unclassified,
}

impl AnalysisError {
    pub fn failure_class(&self) -> FailureClass {
        match self {
            AnalysisError::MissingKeyRow(_)
            | AnalysisError::ColumnCount { .. }
            | AnalysisError::EmptyInput => FailureClass::Structural,
            _ => FailureClass::Unclassified,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_errors_classify_as_structural() {
        assert_eq!(
            AnalysisError::MissingKeyRow("TOTAL ASSETS".to_string()).failure_class(),
            FailureClass::Structural
        );
        assert_eq!(
            AnalysisError::ColumnCount {
                expected: 3,
                found: 5
            }
            .failure_class(),
            FailureClass::Structural
        );
        assert_eq!(
            AnalysisError::EmptyInput.failure_class(),
            FailureClass::Structural
        );
    }

    #[test]
    fn test_io_errors_classify_as_unclassified() {
        let err = AnalysisError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing file",
        ));
        assert_eq!(err.failure_class(), FailureClass::Unclassified);
    }

    #[test]
    fn test_missing_key_row_message_names_the_row() {
        let err = AnalysisError::MissingKeyRow("TOTAL ASSETS".to_string());
        assert!(err.to_string().contains("TOTAL ASSETS"));
    }
}

//! Crate error type.
//!
//! The chart engine itself never fails: short series, flat price ranges and
//! out-of-range viewport requests all degrade to inert output. Errors only
//! surface at the port boundary (data loading, configuration, output).

/// Top-level error type for candlechart.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("invalid record at line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },

    #[error("series not chronological at index {index} (date {date})")]
    Unordered { index: usize, date: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("failed to write {path}: {reason}")]
    Output { path: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ChartError {
    pub(crate) fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        ChartError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&ChartError> for std::process::ExitCode {
    fn from(err: &ChartError) -> Self {
        let code: u8 = match err {
            ChartError::Io(_) | ChartError::Output { .. } => 1,
            ChartError::ConfigParse { .. } | ChartError::ConfigInvalid { .. } => 2,
            ChartError::Data { .. }
            | ChartError::InvalidRecord { .. }
            | ChartError::Unordered { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_invalid_message() {
        let err = ChartError::invalid("chart", "width", "must be at least 100");
        assert_eq!(
            err.to_string(),
            "invalid config value [chart] width: must be at least 100"
        );
    }

    #[test]
    fn unordered_message_names_date() {
        let err = ChartError::Unordered {
            index: 3,
            date: "2024-01-02".into(),
        };
        assert!(err.to_string().contains("2024-01-02"));
        assert!(err.to_string().contains("index 3"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ChartError = io.into();
        assert!(matches!(err, ChartError::Io(_)));
    }
}

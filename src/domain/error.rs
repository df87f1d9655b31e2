//! Domain error types.

/// Top-level error type for trendpick.
///
/// Per-instrument problems (insufficient history, degenerate data) are
/// never errors; they silently exclude the instrument. These variants
/// cover the failures a run cannot proceed past.
#[derive(Debug, thiserror::Error)]
pub enum PickError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("run-state error: {reason}")]
    State { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&PickError> for std::process::ExitCode {
    fn from(err: &PickError) -> Self {
        let code: u8 = match err {
            PickError::Io(_) => 1,
            PickError::ConfigParse { .. }
            | PickError::ConfigMissing { .. }
            | PickError::ConfigInvalid { .. } => 2,
            PickError::Data { .. } => 3,
            PickError::State { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}

use crate::capture::pipeline::JobPhase;

/// Convenience result type used across adraster.
pub type AdrasterResult<T> = Result<T, AdrasterError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Settlement timeouts and batch cancellation are not errors and never appear here.
#[derive(thiserror::Error, Debug)]
pub enum AdrasterError {
    /// Invalid registry, preset, override table or config document. Detected at startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// A single render job failed. Carries the format it was rendering.
    #[error("capture error [{format_id}] during {phase}: {message}")]
    Capture {
        /// Id of the format whose job failed.
        format_id: String,
        /// Job phase in which the failure happened.
        phase: JobPhase,
        /// Human readable reason.
        message: String,
    },

    /// Layout solver failures (taffy tree construction or computation).
    #[error("layout error: {0}")]
    Layout(String),

    /// Image encoding failures.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AdrasterError {
    /// Build a [`AdrasterError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`AdrasterError::Capture`] value.
    pub fn capture(format_id: impl Into<String>, phase: JobPhase, msg: impl Into<String>) -> Self {
        Self::Capture {
            format_id: format_id.into(),
            phase,
            message: msg.into(),
        }
    }

    /// Build a [`AdrasterError::Layout`] value.
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`AdrasterError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`AdrasterError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Job phase carried by capture errors.
    pub fn phase(&self) -> Option<JobPhase> {
        match self {
            Self::Capture { phase, .. } => Some(*phase),
            _ => None,
        }
    }

    /// Format id carried by capture errors.
    pub fn format_id(&self) -> Option<&str> {
        match self {
            Self::Capture { format_id, .. } => Some(format_id),
            _ => None,
        }
    }

    /// Re-tag any error as a capture failure of `format_id` in `phase`.
    ///
    /// Capture errors that already carry a format id are returned unchanged.
    pub(crate) fn into_capture(self, format_id: &str, phase: JobPhase) -> Self {
        match self {
            e @ Self::Capture { .. } => e,
            other => Self::capture(format_id, phase, other.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

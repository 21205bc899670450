use std::fmt::Display;

/// Defensive failure inside the analyzer. The pipeline never surfaces this
/// as a hard error: a degraded (empty) recommendation list plus a warning is
/// more useful to the caller than a failed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    InternalInvariantViolation(String),
}

impl Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::InternalInvariantViolation(detail) => {
                write!(f, "AnalysisError: internal invariant violation ({})", detail)
            }
        }
    }
}

impl std::error::Error for AnalysisError {}

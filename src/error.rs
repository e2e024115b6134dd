use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the collision engine and its collaborators.
///
/// Precondition violations (empty-queue access, time reversal, non-positive
/// radius or mass) are surfaced immediately instead of being clamped; the
/// engine never continues in an inconsistent state.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Pop or peek on an empty event queue.
    #[error("event queue is empty")]
    EmptyQueue,

    /// `update` was called with a clock earlier than the last processed time.
    #[error("time ran backwards: last update at {last}, requested {requested}")]
    TimeReversal { last: f64, requested: f64 },

    /// Malformed initial-state data (line numbers are 1-based).
    #[error("parse error at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// Propagated I/O errors from file ingestion.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::InvalidParam("radius must be > 0".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("invalid parameter"));
        assert!(msg.contains("radius"));
    }

    #[test]
    fn time_reversal_reports_both_clocks() {
        let e = Error::TimeReversal {
            last: 2.0,
            requested: 1.0,
        };
        let msg = format!("{e}");
        assert!(msg.contains('2') && msg.contains('1'));
    }
}

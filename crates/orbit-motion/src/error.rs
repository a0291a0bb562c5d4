//! Motion controller error types.

/// Errors raised while building a controller or restoring its state.
///
/// Degenerate vectors during a frame are never errors; they are absorbed by
/// the normalization guards in [`crate::geo`].
#[derive(Debug, thiserror::Error)]
pub enum MotionError {
    /// A configuration value violates a controller invariant.
    #[error("invalid {field}: {reason}")]
    InvalidConfig {
        /// Name of the offending config field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A restored state contains NaN/infinite or center-coincident values.
    #[error("invalid orbit state: {0}")]
    InvalidState(&'static str),

    /// Failed to parse a RON state snapshot.
    #[error("failed to parse state snapshot: {0}")]
    SnapshotParse(#[source] ron::error::SpannedError),

    /// Failed to serialize a state snapshot.
    #[error("failed to serialize state snapshot: {0}")]
    SnapshotSerialize(#[source] ron::Error),
}

impl MotionError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

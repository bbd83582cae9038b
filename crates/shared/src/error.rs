use thiserror::Error;

use crate::models::PointId;

/// Failure to turn the floor data file into a point set. Fatal for the session.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to parse floor data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("point #{index} has neither an `id` nor a `row`")]
    MissingIdentity { index: usize },

    #[error("duplicate point identity `{0}`")]
    DuplicateId(PointId),

    #[error("{kind} point `{id}` is missing required field `{field}`")]
    MissingField {
        id: PointId,
        kind: &'static str,
        field: &'static str,
    },

    #[error("point `{id}` has a non-numeric reading for signal `{signal}`")]
    InvalidSignal { id: PointId, signal: String },
}

/// Rejected selection request. The selection is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Start value must be less than or equal to end value")]
    InvalidRange { from: i64, to: i64 },

    #[error("No points found in this range")]
    EmptyRange { from: i64, to: i64 },

    #[error("Range selection is only available while comparing selected points")]
    NotComparing,
}

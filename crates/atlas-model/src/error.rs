//! Failures of the descriptor pipeline.

/// Everything that can go wrong turning descriptor text into frame plans.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AtlasError {
    /// The descriptor text was empty. Kept apart from [`AtlasError::Malformed`]
    /// so an empty file is reported as such.
    #[error("descriptor is empty")]
    EmptyInput,

    #[error("malformed descriptor: {message}")]
    Malformed { message: String },

    #[error("missing required field `{field}`")]
    MissingField { field: String },

    #[error("invalid geometry: {message}")]
    InvalidGeometry { message: String },
}

impl AtlasError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed {
            message: msg.into(),
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            message: msg.into(),
        }
    }
}

impl From<serde_json::Error> for AtlasError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed(err.to_string())
    }
}

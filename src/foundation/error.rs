/// Convenience result type used across genospec.
pub type GenoResult<T> = Result<T, GenoError>;

/// Top-level error taxonomy used by compiler APIs.
#[derive(thiserror::Error, Debug)]
pub enum GenoError {
    /// A node that is neither a view nor a track, or claims to be both.
    #[error("structure error: {path}: {message}")]
    Structure {
        /// Location of the offending node, e.g. `$.views[1]`.
        path: String,
        /// What is wrong with the node.
        message: String,
    },

    /// Unknown template or missing required template channel.
    #[error("template error: {0}")]
    Template(String),

    /// Validity failures promoted to a hard error (strict compiles only).
    #[error("validity error: {0}")]
    Validity(String),

    /// Errors when serializing or deserializing specs and configurations.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GenoError {
    /// Build a [`GenoError::Structure`] value.
    pub fn structure(path: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Structure {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Build a [`GenoError::Template`] value.
    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }

    /// Build a [`GenoError::Validity`] value.
    pub fn validity(msg: impl Into<String>) -> Self {
        Self::Validity(msg.into())
    }

    /// Build a [`GenoError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for GenoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

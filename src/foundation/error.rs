/// Convenience result type used across dynfigure.
pub type DynfigureResult<T> = Result<T, DynfigureError>;

/// Top-level error taxonomy used by scene, render and export APIs.
#[derive(thiserror::Error, Debug)]
pub enum DynfigureError {
    /// Invalid caller-provided configuration or scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown color names and malformed color expressions.
    #[error("color error: {0}")]
    Color(String),

    /// A renderer was asked to draw an element kind it has no implementation for.
    #[error("unsupported element: {0}")]
    Unsupported(String),

    /// Failures of the external encoder or converter process.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DynfigureError {
    /// Build a [`DynfigureError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DynfigureError::Color`] value.
    pub fn color(msg: impl Into<String>) -> Self {
        Self::Color(msg.into())
    }

    /// Build a [`DynfigureError::Unsupported`] value.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Build a [`DynfigureError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

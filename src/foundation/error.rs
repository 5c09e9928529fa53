/// Convenience result type used across Shotframe.
pub type ShotframeResult<T> = Result<T, ShotframeError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum ShotframeError {
    /// Invalid user-provided template, transform, or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A device frame asset or font could not be read or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// The user-supplied file is not a decodable raster image.
    #[error("unsupported image: {0}")]
    UnsupportedImage(String),

    /// Failures inside the compositing pipeline.
    #[error("render error: {0}")]
    Render(String),

    /// PNG encoding or export sink failures.
    #[error("encode error: {0}")]
    Encode(String),

    /// The entitlement collaborator has no free exports left.
    #[error("quota exhausted: {0}")]
    QuotaExhausted(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShotframeError {
    /// Build a [`ShotframeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ShotframeError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`ShotframeError::UnsupportedImage`] value.
    pub fn unsupported_image(msg: impl Into<String>) -> Self {
        Self::UnsupportedImage(msg.into())
    }

    /// Build a [`ShotframeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ShotframeError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`ShotframeError::QuotaExhausted`] value.
    pub fn quota_exhausted(msg: impl Into<String>) -> Self {
        Self::QuotaExhausted(msg.into())
    }

    /// Build a [`ShotframeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether retrying the same operation may succeed.
    ///
    /// Export failures (encoding, sink IO) are transient from the user's point of view;
    /// invalid input and exhausted quota are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Encode(_) => true,
            Self::Other(e) => e.downcast_ref::<std::io::Error>().is_some(),
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

use ort::Error as OrtError;

/// Represents the different types of errors that can occur in the image classifier.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// Classification was attempted with no usable image
    #[error("no image selected or captured")]
    MissingInput,
    /// The inference backend was never successfully constructed
    #[error("model not initialized: {0}")]
    NotInitialized(String),
    /// The forward pass failed or produced an unexpected buffer
    #[error("recognition failed: {0}")]
    Invocation(String),
    /// The classifier was assembled from mismatched parts; a packaging
    /// defect, not a runtime condition
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<OrtError> for ClassifierError {
    fn from(err: OrtError) -> Self {
        ClassifierError::NotInitialized(err.to_string())
    }
}

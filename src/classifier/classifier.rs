use std::path::Path;
use std::sync::{Arc, Mutex};

use image::DynamicImage;
use log::{debug, warn};

use super::decode::{decode, Classification};
use super::error::ClassifierError;
use super::labels::LabelTable;
use super::preprocess::prepare;
use crate::backend::InferenceBackend;
use crate::ModelCharacteristics;

/// A thread-safe animal image classifier over a quantized model.
///
/// # Thread Safety
///
/// The classifier may be shared across threads with `Arc`. The label
/// table is immutable after load and shared without synchronization; the
/// inference backend does not support concurrent invocations on one
/// instance, so it lives behind a `Mutex` and at most one classification
/// is in flight per classifier.
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use fauna::{Classifier, LabelTable, ScriptedBackend};
/// use std::sync::Arc;
/// use std::thread;
///
/// let classifier = Arc::new(Classifier::builder()
///     .with_backend(
///         Box::new(ScriptedBackend::constant(vec![200, 50])?),
///         LabelTable::from_text("cat\ndog")?,
///     )?
///     .build()?);
///
/// let classifier_clone = Arc::clone(&classifier);
/// thread::spawn(move || {
///     let image = image::DynamicImage::new_rgb8(64, 64);
///     classifier_clone.classify(&image).unwrap();
/// });
/// # Ok(())
/// # }
/// ```
pub struct Classifier {
    pub(crate) model_path: String,
    pub(crate) labels_path: Option<String>,
    pub(crate) backend: Mutex<Box<dyn InferenceBackend>>,
    pub(crate) labels: Arc<LabelTable>,
    pub(crate) characteristics: ModelCharacteristics,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Classifier>();
    }
};

impl Classifier {
    /// Creates a new ClassifierBuilder for fluent construction
    pub fn builder() -> super::builder::ClassifierBuilder {
        super::builder::ClassifierBuilder::new()
    }

    /// Returns information about the classifier's current state
    pub fn info(&self) -> super::ClassifierInfo {
        super::ClassifierInfo {
            model_path: self.model_path.clone(),
            labels_path: self.labels_path.clone(),
            num_classes: self.labels.len(),
            class_labels: self.labels.labels().to_vec(),
            input_width: self.characteristics.input_width,
            input_height: self.characteristics.input_height,
        }
    }

    /// Classifies a decoded image and returns the best-guess class with
    /// its confidence.
    ///
    /// Runs the full pipeline synchronously: preprocess to the model's
    /// input tensor, one blocking forward pass, then score decoding.
    /// Callers that need a responsive foreground should move the whole
    /// call onto a background execution context.
    ///
    /// # Errors
    /// * [`ClassifierError::MissingInput`] for an empty image
    /// * [`ClassifierError::Invocation`] if the forward pass fails;
    ///   classification can be retried with a new image
    pub fn classify(&self, image: &DynamicImage) -> Result<Classification, ClassifierError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(ClassifierError::MissingInput);
        }

        let tensor = prepare(
            image,
            self.characteristics.input_width,
            self.characteristics.input_height,
        );

        let mut output = vec![0u8; self.labels.len()];
        {
            let mut backend = self.backend.lock().map_err(|_| {
                ClassifierError::Invocation("inference backend lock poisoned".to_string())
            })?;
            backend.invoke(&tensor, &mut output)?;
        }

        let classification = decode(&output, &self.labels)?;
        debug!(
            "Classified image as '{}' ({:.3})",
            classification.label, classification.confidence
        );
        Ok(classification)
    }

    /// Reads and decodes the image at `path`, then classifies it.
    ///
    /// An unreadable or undecodable file is treated the same as no image
    /// having been supplied at all.
    pub fn classify_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<Classification, ClassifierError> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|e| {
            warn!("Failed to decode image {}: {}", path.display(), e);
            ClassifierError::MissingInput
        })?;
        self.classify(&image)
    }
}

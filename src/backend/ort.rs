use std::collections::HashMap;
use std::path::Path;

use log::info;
use ndarray::Array4;
use ort::session::Session;
use ort::value::Tensor;

use super::InferenceBackend;
use crate::classifier::{ClassifierError, InputTensor};
use crate::runtime::{create_session_builder, RuntimeConfig};

/// Input tensor name declared by the quantized MobileNet exports.
const INPUT_NAME: &str = "input";

/// The production inference backend: an ONNX Runtime session over a
/// quantized image-classification model.
///
/// The model artifact is opaque to this crate. Its contract is fixed: one
/// input of shape `[1, height, width, 3]` in unsigned bytes, one output of
/// `[1, num_classes]` unsigned-byte scores.
pub struct OrtBackend {
    session: Session,
    num_classes: usize,
}

impl OrtBackend {
    /// Loads the model artifact at `model_path` into a new session.
    ///
    /// Fails with [`ClassifierError::NotInitialized`] if the artifact is
    /// missing or malformed, or if the runtime environment cannot be
    /// brought up.
    pub fn from_file<P: AsRef<Path>>(
        model_path: P,
        num_classes: usize,
        config: &RuntimeConfig,
    ) -> Result<Self, ClassifierError> {
        let model_path = model_path.as_ref();
        if !model_path.exists() {
            return Err(ClassifierError::NotInitialized(format!(
                "model file not found: {}",
                model_path.display()
            )));
        }

        let session = create_session_builder(config)
            .map_err(|e| ClassifierError::NotInitialized(e.to_string()))?
            .commit_from_file(model_path)
            .map_err(|e| ClassifierError::NotInitialized(e.to_string()))?;

        Self::validate_session(&session)?;
        info!("Model loaded from {}", model_path.display());

        Ok(Self {
            session,
            num_classes,
        })
    }

    /// Checks that the model declares the expected input/output structure.
    fn validate_session(session: &Session) -> Result<(), ClassifierError> {
        if session.inputs.is_empty() {
            return Err(ClassifierError::NotInitialized(
                "model must declare an image input".to_string(),
            ));
        }
        if session.outputs.is_empty() {
            return Err(ClassifierError::NotInitialized(
                "model must declare a score output".to_string(),
            ));
        }
        Ok(())
    }
}

impl InferenceBackend for OrtBackend {
    fn num_classes(&self) -> usize {
        self.num_classes
    }

    fn invoke(
        &mut self,
        input: &InputTensor,
        output: &mut [u8],
    ) -> Result<(), ClassifierError> {
        let height = input.height() as usize;
        let width = input.width() as usize;

        let pixel_array =
            Array4::from_shape_vec((1, height, width, 3), input.as_bytes().to_vec()).map_err(
                |e| ClassifierError::Invocation(format!("failed to shape input tensor: {}", e)),
            )?;
        let pixel_dyn = pixel_array.into_dyn();
        let pixels = pixel_dyn.as_standard_layout();

        let mut input_tensors = HashMap::new();
        input_tensors.insert(
            INPUT_NAME,
            Tensor::from_array(&pixels).map_err(|e| {
                ClassifierError::Invocation(format!("failed to create input tensor: {}", e))
            })?,
        );

        let outputs = self
            .session
            .run(input_tensors)
            .map_err(|e| ClassifierError::Invocation(format!("forward pass failed: {}", e)))?;
        let scores = outputs[0].try_extract_tensor::<u8>().map_err(|e| {
            ClassifierError::Invocation(format!("failed to extract score tensor: {}", e))
        })?;

        if scores.len() != output.len() {
            return Err(ClassifierError::Invocation(format!(
                "model produced {} scores, expected {}",
                scores.len(),
                output.len()
            )));
        }
        for (slot, &score) in output.iter_mut().zip(scores.iter()) {
            *slot = score;
        }
        Ok(())
    }
}

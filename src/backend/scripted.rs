use super::InferenceBackend;
use crate::classifier::{ClassifierError, InputTensor};

/// A substitute backend that replays scripted output buffers.
///
/// Each invocation consumes the next scripted buffer; once the script is
/// exhausted the last buffer repeats. Useful for tests and demos where no
/// model artifact is available.
pub struct ScriptedBackend {
    outputs: Vec<Vec<u8>>,
    cursor: usize,
}

impl ScriptedBackend {
    /// Creates a backend that plays `outputs` in order. All buffers must
    /// be non-empty and share one length.
    pub fn new(outputs: Vec<Vec<u8>>) -> Result<Self, ClassifierError> {
        let first_len = outputs
            .first()
            .map(Vec::len)
            .ok_or_else(|| {
                ClassifierError::Configuration(
                    "scripted backend needs at least one output buffer".to_string(),
                )
            })?;
        if first_len == 0 {
            return Err(ClassifierError::Configuration(
                "scripted output buffers must not be empty".to_string(),
            ));
        }
        if outputs.iter().any(|buffer| buffer.len() != first_len) {
            return Err(ClassifierError::Configuration(
                "scripted output buffers must all share one length".to_string(),
            ));
        }
        Ok(Self { outputs, cursor: 0 })
    }

    /// Creates a backend that returns the same scores on every invocation.
    pub fn constant(scores: Vec<u8>) -> Result<Self, ClassifierError> {
        Self::new(vec![scores])
    }
}

impl InferenceBackend for ScriptedBackend {
    fn num_classes(&self) -> usize {
        self.outputs[0].len()
    }

    fn invoke(
        &mut self,
        _input: &InputTensor,
        output: &mut [u8],
    ) -> Result<(), ClassifierError> {
        let scripted = &self.outputs[self.cursor];
        if self.cursor + 1 < self.outputs.len() {
            self.cursor += 1;
        }
        if scripted.len() != output.len() {
            return Err(ClassifierError::Invocation(format!(
                "scripted buffer has {} scores, expected {}",
                scripted.len(),
                output.len()
            )));
        }
        output.copy_from_slice(scripted);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::prepare;
    use image::DynamicImage;

    fn tensor() -> InputTensor {
        prepare(&DynamicImage::new_rgb8(8, 8), 224, 224)
    }

    #[test]
    fn test_replays_buffers_in_order_then_repeats_the_last() {
        let mut backend =
            ScriptedBackend::new(vec![vec![1, 0], vec![0, 1]]).unwrap();
        let mut output = [0u8; 2];

        backend.invoke(&tensor(), &mut output).unwrap();
        assert_eq!(output, [1, 0]);
        backend.invoke(&tensor(), &mut output).unwrap();
        assert_eq!(output, [0, 1]);
        backend.invoke(&tensor(), &mut output).unwrap();
        assert_eq!(output, [0, 1]);
    }

    #[test]
    fn test_rejects_empty_script() {
        assert!(matches!(
            ScriptedBackend::new(vec![]),
            Err(ClassifierError::Configuration(_))
        ));
        assert!(matches!(
            ScriptedBackend::constant(vec![]),
            Err(ClassifierError::Configuration(_))
        ));
    }

    #[test]
    fn test_rejects_ragged_script() {
        assert!(matches!(
            ScriptedBackend::new(vec![vec![1, 2], vec![3]]),
            Err(ClassifierError::Configuration(_))
        ));
    }

    #[test]
    fn test_rejects_mismatched_output_buffer() {
        let mut backend = ScriptedBackend::constant(vec![1, 2, 3]).unwrap();
        let mut output = [0u8; 2];
        assert!(matches!(
            backend.invoke(&tensor(), &mut output),
            Err(ClassifierError::Invocation(_))
        ));
    }
}

//! Inference backends.
//!
//! The model runtime is a capability the classifier is handed, not a
//! global it reaches for. [`InferenceBackend`] is the seam: the production
//! implementation wraps an ONNX Runtime session, and [`ScriptedBackend`]
//! replays canned output buffers so the pipeline can be exercised without
//! a model artifact.

pub mod ort;
pub mod scripted;

pub use self::ort::OrtBackend;
pub use scripted::ScriptedBackend;

use crate::classifier::{ClassifierError, InputTensor};

/// A synchronous, blocking inference capability.
///
/// One invocation fills one output buffer in place. Implementations are
/// not required to support concurrent invocations on the same instance;
/// `invoke` takes `&mut self` so that requirement is visible in the
/// signature, and callers that share an instance must serialize
/// (`Classifier` holds its backend behind a mutex).
pub trait InferenceBackend: Send {
    /// Number of class scores one invocation produces.
    fn num_classes(&self) -> usize;

    /// Runs one forward pass, filling `output` with one quantized score
    /// per class. Blocks the calling thread for the duration.
    fn invoke(&mut self, input: &InputTensor, output: &mut [u8])
        -> Result<(), ClassifierError>;
}

//! A thread-safe animal image classifier using quantized ONNX models.
//!
//! The pipeline is small and fixed: an input image is stretched to the
//! model's 224x224 RGB byte tensor, one blocking forward pass fills a
//! quantized score buffer, and the argmax score is mapped through an
//! ordered label table to a `(label, confidence)` pair.
//!
//! # Basic Usage
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use fauna::{BuiltinModel, Classifier};
//!
//! let classifier = Classifier::builder()
//!     .with_model(BuiltinModel::MobileNetV1Quant)?
//!     .build()?;
//!
//! let image = image::open("photos/heron.jpg")?;
//! let classification = classifier.classify(&image)?;
//! println!(
//!     "Predicted class: {} ({:.1}%)",
//!     classification.label,
//!     classification.confidence * 100.0
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Substitute Backends
//!
//! The inference runtime is injected, never ambient, so the pipeline runs
//! against scripted score buffers without any model artifact:
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use fauna::{Classifier, LabelTable, ScriptedBackend};
//!
//! let classifier = Classifier::builder()
//!     .with_backend(
//!         Box::new(ScriptedBackend::constant(vec![200, 50])?),
//!         LabelTable::from_text("cat\ndog")?,
//!     )?
//!     .build()?;
//!
//! let image = image::DynamicImage::new_rgb8(64, 64);
//! let classification = classifier.classify(&image)?;
//! assert_eq!(classification.label, "cat");
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The classifier is `Send + Sync` and can be shared across threads with
//! `Arc`; invocations against the underlying model are serialized so at
//! most one classification is in flight per classifier instance.

pub mod backend;
pub mod classifier;
pub mod lookup;
pub mod model_manager;
pub mod models;
mod runtime;

pub use backend::{InferenceBackend, OrtBackend, ScriptedBackend};
pub use classifier::{
    decode, prepare, Classification, Classifier, ClassifierBuilder, ClassifierError,
    ClassifierInfo, InputTensor, LabelTable,
};
pub use model_manager::{ModelError, ModelManager};
pub use models::{BuiltinModel, ModelCharacteristics, ModelInfo};
pub use runtime::{create_session_builder, RuntimeConfig};

pub fn init_logger() {
    env_logger::init();
}

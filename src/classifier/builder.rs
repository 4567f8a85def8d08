use std::sync::{Arc, Mutex};

use log::info;

use super::classifier::Classifier;
use super::error::ClassifierError;
use super::labels::LabelTable;
use crate::backend::{InferenceBackend, OrtBackend};
use crate::runtime::RuntimeConfig;
use crate::{BuiltinModel, ModelCharacteristics, ModelManager};

/// A builder for constructing a Classifier with a fluent interface.
///
/// The builder is where configuration defects are caught: the label table
/// must line up one-to-one with the model's output scores before a single
/// classification is attempted.
#[derive(Default)]
pub struct ClassifierBuilder {
    model_path: Option<String>,
    labels_path: Option<String>,
    backend: Option<Box<dyn InferenceBackend>>,
    labels: Option<LabelTable>,
    characteristics: Option<ModelCharacteristics>,
    runtime_config: RuntimeConfig,
}

impl ClassifierBuilder {
    /// Creates a new empty ClassifierBuilder instance with default configuration
    pub fn new() -> Self {
        Self {
            model_path: None,
            labels_path: None,
            backend: None,
            labels: None,
            characteristics: None,
            runtime_config: RuntimeConfig::default(),
        }
    }

    /// Sets the runtime configuration for ONNX model execution
    ///
    /// # Example
    /// ```
    /// use fauna::{ClassifierBuilder, RuntimeConfig};
    ///
    /// let config = RuntimeConfig::default();
    /// let builder = ClassifierBuilder::new()
    ///     .with_runtime_config(config);
    /// ```
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Sets the model to use for classification using a built-in model type.
    ///
    /// The model and label artifacts are resolved through the default
    /// [`ModelManager`] cache; they must already be downloaded.
    ///
    /// # Errors
    /// * [`ClassifierError::NotInitialized`] if the artifacts are not
    ///   downloaded or the model fails to load
    /// * [`ClassifierError::Configuration`] if a model was already set or
    ///   the label resource is unreadable
    pub fn with_model(mut self, model: BuiltinModel) -> Result<Self, ClassifierError> {
        if self.backend.is_some() {
            return Err(ClassifierError::Configuration(
                "model already set".to_string(),
            ));
        }

        let manager = ModelManager::new_default().map_err(|e| {
            ClassifierError::NotInitialized(format!("failed to create model manager: {}", e))
        })?;

        if !manager.is_model_downloaded(model) {
            return Err(ClassifierError::NotInitialized(format!(
                "model '{:?}' is not downloaded. Please download it first using ModelManager::download_model()",
                model
            )));
        }

        let model_path = manager.get_model_path(model);
        let labels_path = manager.get_labels_path(model);
        let characteristics = model.characteristics();

        let labels = LabelTable::from_file(&labels_path)?;
        let backend = OrtBackend::from_file(
            &model_path,
            characteristics.num_classes,
            &self.runtime_config,
        )?;
        info!("Model '{:?}' loaded and validated", model);

        self.model_path = Some(model_path.to_string_lossy().to_string());
        self.labels_path = Some(labels_path.to_string_lossy().to_string());
        self.backend = Some(Box::new(backend));
        self.labels = Some(labels);
        self.characteristics = Some(characteristics);
        Ok(self)
    }

    /// Sets a custom model artifact and label resource for the classifier.
    ///
    /// `characteristics` describes the artifact's fixed contract (input
    /// geometry and class count); it is not inferred from the file.
    ///
    /// # Example
    /// ```no_run
    /// use fauna::{ClassifierBuilder, ModelCharacteristics};
    ///
    /// let builder = ClassifierBuilder::new()
    ///     .with_custom_model(
    ///         "path/to/model.onnx",
    ///         "path/to/labels.txt",
    ///         ModelCharacteristics {
    ///             input_width: 224,
    ///             input_height: 224,
    ///             input_channels: 3,
    ///             num_classes: 1001,
    ///             model_size_mb: 0,
    ///         },
    ///     );
    /// ```
    pub fn with_custom_model(
        mut self,
        model_path: &str,
        labels_path: &str,
        characteristics: ModelCharacteristics,
    ) -> Result<Self, ClassifierError> {
        if model_path.is_empty() || labels_path.is_empty() {
            return Err(ClassifierError::Configuration(
                "model and label paths cannot be empty".to_string(),
            ));
        }
        if self.backend.is_some() {
            return Err(ClassifierError::Configuration(
                "model already set".to_string(),
            ));
        }

        let labels = LabelTable::from_file(labels_path)?;
        let backend = OrtBackend::from_file(
            model_path,
            characteristics.num_classes,
            &self.runtime_config,
        )?;

        self.model_path = Some(model_path.to_string());
        self.labels_path = Some(labels_path.to_string());
        self.backend = Some(Box::new(backend));
        self.labels = Some(labels);
        self.characteristics = Some(characteristics);
        Ok(self)
    }

    /// Sets a substitute inference backend and an explicit label table.
    ///
    /// This is the seam for tests and demos: any [`InferenceBackend`]
    /// implementation can stand in for the model runtime. Input geometry
    /// defaults to the MobileNet 224x224x3 contract.
    pub fn with_backend(
        mut self,
        backend: Box<dyn InferenceBackend>,
        labels: LabelTable,
    ) -> Result<Self, ClassifierError> {
        if self.backend.is_some() {
            return Err(ClassifierError::Configuration(
                "model already set".to_string(),
            ));
        }

        let characteristics = ModelCharacteristics {
            input_width: 224,
            input_height: 224,
            input_channels: 3,
            num_classes: backend.num_classes(),
            model_size_mb: 0,
        };

        self.model_path = Some("<injected backend>".to_string());
        self.labels_path = None;
        self.backend = Some(backend);
        self.labels = Some(labels);
        self.characteristics = Some(characteristics);
        Ok(self)
    }

    /// Builds and returns the final Classifier instance.
    ///
    /// # Errors
    /// * [`ClassifierError::NotInitialized`] if no backend was configured
    /// * [`ClassifierError::Configuration`] if no label table was set, or
    ///   its length disagrees with the number of scores the backend
    ///   produces — a packaging defect that must never reach `classify`
    pub fn build(self) -> Result<Classifier, ClassifierError> {
        let backend = self.backend.ok_or_else(|| {
            ClassifierError::NotInitialized("no inference backend configured".to_string())
        })?;
        let labels = self.labels.ok_or_else(|| {
            ClassifierError::Configuration("no label table configured".to_string())
        })?;
        let characteristics = self.characteristics.ok_or_else(|| {
            ClassifierError::Configuration("model characteristics not set".to_string())
        })?;

        if labels.len() != backend.num_classes() {
            return Err(ClassifierError::Configuration(format!(
                "label table has {} entries but the model produces {} scores",
                labels.len(),
                backend.num_classes()
            )));
        }

        Ok(Classifier {
            model_path: self.model_path.unwrap_or_default(),
            labels_path: self.labels_path,
            backend: Mutex::new(backend),
            labels: Arc::new(labels),
            characteristics,
        })
    }
}

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use crate::models::{BuiltinModel, ModelInfo};

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Model not downloaded: {0}")]
    NotDownloaded(String),
    #[error("Download error: {0}")]
    DownloadError(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Model verification failed")]
    VerificationFailed,
    #[error("Hash mismatch: expected {expected}, got {actual} for {file_type} file")]
    HashMismatch {
        file_type: String,
        expected: String,
        actual: String,
    },
}

/// Fetches and verifies the versioned artifacts a built-in model is made
/// of: the model file itself and its label resource.
///
/// Artifacts live in a per-user cache directory and are verified by
/// SHA-256 before use; a corrupt file is re-fetched rather than loaded.
#[derive(Clone)]
pub struct ModelManager {
    models_dir: PathBuf,
    download_lock: Arc<Mutex<()>>,
}

impl ModelManager {
    /// Creates a new ModelManager with the default models directory
    pub fn new_default() -> io::Result<Self> {
        Self::new(Self::get_default_models_dir())
    }

    /// Returns the default models directory path
    pub fn get_default_models_dir() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var("FAUNA_CACHE") {
            return PathBuf::from(path).join("models");
        }

        // 2. Use platform-specific cache directory
        if let Some(cache_dir) = dirs::cache_dir() {
            return cache_dir.join("fauna").join("models");
        }

        // 3. Fallback to user's home directory
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(".cache").join("fauna").join("models");
        }

        // 4. If all else fails, use system temp directory (platform agnostic)
        env::temp_dir().join("fauna").join("models")
    }

    pub fn new<P: AsRef<Path>>(models_dir: P) -> io::Result<Self> {
        let models_dir = models_dir.as_ref().to_path_buf();
        fs::create_dir_all(&models_dir)?;
        Ok(Self {
            models_dir,
            download_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn get_model_path(&self, model: BuiltinModel) -> PathBuf {
        let info = model.get_model_info();
        self.models_dir.join(info.name).join("model.onnx")
    }

    pub fn get_labels_path(&self, model: BuiltinModel) -> PathBuf {
        let info = model.get_model_info();
        self.models_dir.join(info.name).join("labels.txt")
    }

    pub fn is_model_downloaded(&self, model: BuiltinModel) -> bool {
        let model_path = self.get_model_path(model);
        let labels_path = self.get_labels_path(model);
        log::debug!(
            "Model file {:?} (exists: {}), label file {:?} (exists: {})",
            model_path,
            model_path.exists(),
            labels_path,
            labels_path.exists()
        );
        model_path.exists() && labels_path.exists()
    }

    /// Downloads both artifacts, verifying existing files first and
    /// re-fetching anything that fails its hash check. Cleans up on
    /// failure so a half-downloaded model never looks usable.
    pub async fn download_model(&self, model: BuiltinModel) -> Result<(), ModelError> {
        let info = model.get_model_info();
        let _lock = self.download_lock.lock().await;

        let model_dir = self.models_dir.join(&info.name);
        fs::create_dir_all(&model_dir)?;

        let model_path = self.get_model_path(model);
        let model_result = self
            .refresh_file(&model_path, &info.model_url, &info.model_hash, "model")
            .await;

        let labels_path = self.get_labels_path(model);
        let labels_result = self
            .refresh_file(&labels_path, &info.labels_url, &info.labels_hash, "labels")
            .await;

        match (model_result, labels_result) {
            (Ok(()), Ok(())) => {
                log::info!("Model and labels ready to use");
                Ok(())
            }
            (Err(e), _) | (_, Err(e)) => {
                log::error!("Failed to set up model artifacts: {}", e);
                let _ = self.remove_download(model);
                Err(e)
            }
        }
    }

    /// Keeps an existing verified file, otherwise downloads a fresh copy.
    async fn refresh_file(
        &self,
        path: &Path,
        url: &str,
        expected_hash: &str,
        file_type: &str,
    ) -> Result<(), ModelError> {
        if path.exists() {
            if self.verify_file(path, expected_hash)? {
                log::info!("Existing {} file verified successfully", file_type);
                return Ok(());
            }
            log::warn!("{} file failed verification, redownloading", file_type);
        }
        self.download_and_verify_file(url, path, expected_hash, file_type)
            .await
    }

    fn verify_file(&self, path: &Path, expected_hash: &str) -> Result<bool, ModelError> {
        let bytes = fs::read(path)?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let hash = format!("{:x}", hasher.finalize());
        log::debug!("Verifying {:?}: calculated {}", path, hash);
        Ok(hash == expected_hash)
    }

    pub fn verify_model(&self, model: BuiltinModel) -> Result<bool, ModelError> {
        let info = model.get_model_info();
        let model_path = self.get_model_path(model);
        let labels_path = self.get_labels_path(model);

        if !model_path.exists() || !labels_path.exists() {
            return Ok(false);
        }

        let model_ok = self.verify_file(&model_path, &info.model_hash)?;
        let labels_ok = self.verify_file(&labels_path, &info.labels_hash)?;
        Ok(model_ok && labels_ok)
    }

    async fn download_and_verify_file(
        &self,
        url: &str,
        path: &Path,
        expected_hash: &str,
        file_type: &str,
    ) -> Result<(), ModelError> {
        log::info!("Downloading {} file from {} to {:?}", file_type, url, path);
        let response = reqwest::get(url).await?;
        let bytes = response.bytes().await?;
        log::info!("Downloaded {} bytes", bytes.len());

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let hash = format!("{:x}", hasher.finalize());

        if hash != expected_hash {
            log::error!(
                "{} hash mismatch: expected {}, got {}",
                file_type,
                expected_hash,
                hash
            );
            return Err(ModelError::HashMismatch {
                file_type: file_type.to_string(),
                expected: expected_hash.to_string(),
                actual: hash,
            });
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)?;

        // Verify after writing
        if !self.verify_file(path, expected_hash)? {
            return Err(ModelError::VerificationFailed);
        }

        log::info!("{} file downloaded and verified successfully", file_type);
        Ok(())
    }

    pub fn remove_download(&self, model: BuiltinModel) -> Result<(), ModelError> {
        let model_path = self.get_model_path(model);
        let labels_path = self.get_labels_path(model);

        if model_path.exists() {
            fs::remove_file(&model_path)?;
        }
        if labels_path.exists() {
            fs::remove_file(&labels_path)?;
        }
        Ok(())
    }

    /// Ensures that a model is downloaded and verified.
    /// If the model doesn't exist, it will be downloaded.
    /// If verification fails, it will be re-downloaded.
    pub async fn ensure_model_downloaded(&self, model: BuiltinModel) -> Result<(), ModelError> {
        if !self.is_model_downloaded(model) {
            log::info!("Model not found, downloading...");
            self.download_model(model).await?;
        } else if !self.verify_model(model)? {
            log::info!("Model verification failed, re-downloading...");
            self.remove_download(model)?;
            self.download_model(model).await?;
        } else {
            log::info!("Model verification successful");
        }
        Ok(())
    }
}

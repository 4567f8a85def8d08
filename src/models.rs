/// Represents the available built-in models in the library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinModel {
    /// MobileNet v1 with 8-bit quantized weights and activations
    ///
    /// Characteristics:
    /// - Input: 224x224 RGB, one byte per channel
    /// - Output: 1001 quantized class scores
    /// - Size: ~4MB
    /// - Fast enough for per-frame use on modest hardware
    MobileNetV1Quant,
}

/// Characteristics of a model including its input geometry and output width
#[derive(Debug, Clone)]
pub struct ModelCharacteristics {
    /// Width in pixels of the image input the model expects
    pub input_width: u32,
    /// Height in pixels of the image input the model expects
    pub input_height: u32,
    /// Number of color channels the model expects (interleaved, byte per channel)
    pub input_channels: usize,
    /// Number of class scores the model produces
    pub num_classes: usize,
    /// Approximate size of the model in memory
    pub model_size_mb: usize,
}

/// Locations and checksums of the artifacts a built-in model is made of
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub name: String,
    pub model_url: String,
    pub model_hash: String,
    pub labels_url: String,
    pub labels_hash: String,
}

impl BuiltinModel {
    /// Get the characteristics of the model
    pub fn characteristics(&self) -> ModelCharacteristics {
        match self {
            Self::MobileNetV1Quant => ModelCharacteristics {
                input_width: 224,
                input_height: 224,
                input_channels: 3,
                num_classes: 1001,
                model_size_mb: 4,
            },
        }
    }

    /// Get the download locations and expected hashes for the model's artifacts
    pub fn get_model_info(&self) -> ModelInfo {
        match self {
            Self::MobileNetV1Quant => ModelInfo {
                name: "mobilenet-v1-quant".to_string(),
                model_url: "https://huggingface.co/fauna-rs/mobilenet-v1-quant/resolve/main/model.onnx"
                    .to_string(),
                model_hash: "0b3f7f7cbe4bd74e6e9b0b5c9f2a8d41a86f83a7e9c15d2f6a04c38e5d917b62"
                    .to_string(),
                labels_url: "https://huggingface.co/fauna-rs/mobilenet-v1-quant/resolve/main/labels.txt"
                    .to_string(),
                labels_hash: "6c5bfb0be4f5e40b095cbbc1ae531bfdb88a5dbcfdf71ff4cb7dcbcbf22f1b29"
                    .to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_characteristics() {
        let characteristics = BuiltinModel::MobileNetV1Quant.characteristics();
        assert_eq!(characteristics.input_width, 224);
        assert_eq!(characteristics.input_height, 224);
        assert_eq!(characteristics.input_channels, 3);
        assert_eq!(characteristics.num_classes, 1001);
    }

    #[test]
    fn test_model_info() {
        let info = BuiltinModel::MobileNetV1Quant.get_model_info();
        assert_eq!(info.name, "mobilenet-v1-quant");
        assert!(info.model_url.ends_with("model.onnx"));
        assert!(info.labels_url.ends_with("labels.txt"));
    }
}

use std::path::PathBuf;

use crate::detection::domain::detector_provider::{DetectorProvider, ProviderFactory};
use crate::detection::domain::provider_options::ProviderOptions;
use crate::detection::infrastructure::model_resolver;
use crate::detection::infrastructure::onnx_face_provider::OnnxFaceProvider;

/// Production [`ProviderFactory`]: resolves the model asset named in the
/// options, then builds an [`OnnxFaceProvider`] over it.
pub struct OnnxProviderFactory {
    bundled_dir: Option<PathBuf>,
}

impl OnnxProviderFactory {
    pub fn new() -> Self {
        Self { bundled_dir: None }
    }

    /// Also check `dir` for the model before downloading.
    pub fn with_bundled_dir(dir: PathBuf) -> Self {
        Self {
            bundled_dir: Some(dir),
        }
    }
}

impl Default for OnnxProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderFactory for OnnxProviderFactory {
    fn create(
        &self,
        options: &ProviderOptions,
    ) -> Result<Box<dyn DetectorProvider>, Box<dyn std::error::Error>> {
        let asset = &options.base_options.model_asset;
        let model_path =
            model_resolver::resolve(&asset.name, &asset.url, self.bundled_dir.as_deref())?;
        log::debug!("face model resolved to {}", model_path.display());

        let provider = OnnxFaceProvider::new(&model_path, options)?;
        Ok(Box::new(provider))
    }
}

use crate::shared::constants::{
    DEFAULT_MIN_DETECTION_CONFIDENCE, FACE_MODEL_NAME, FACE_MODEL_URL,
};

/// Hardware preference for provider inference.
///
/// `Gpu` is a preference, not a guarantee: platforms without a usable
/// accelerated path fall back to CPU inside the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delegate {
    Gpu,
    Cpu,
}

/// Whether the provider is tuned for sequential per-frame calls or
/// independent still images.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunningMode {
    Video,
    Image,
}

/// A model asset identified by file name and download location.
#[derive(Clone, Debug)]
pub struct ModelAsset {
    pub name: String,
    pub url: String,
}

impl ModelAsset {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct BaseOptions {
    pub model_asset: ModelAsset,
    pub delegate: Delegate,
}

/// Configuration bag handed to a [`ProviderFactory`].
///
/// [`ProviderFactory`]: crate::detection::domain::detector_provider::ProviderFactory
#[derive(Clone, Debug)]
pub struct ProviderOptions {
    pub base_options: BaseOptions,
    pub running_mode: RunningMode,
    pub min_detection_confidence: f64,
}

impl Default for ProviderOptions {
    /// GPU-preferred, video-mode, 0.5 confidence, stock face model.
    fn default() -> Self {
        Self {
            base_options: BaseOptions {
                model_asset: ModelAsset::new(FACE_MODEL_NAME, FACE_MODEL_URL),
                delegate: Delegate::Gpu,
            },
            running_mode: RunningMode::Video,
            min_detection_confidence: DEFAULT_MIN_DETECTION_CONFIDENCE,
        }
    }
}

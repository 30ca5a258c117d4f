use crate::detection::domain::provider_options::ProviderOptions;
use crate::shared::frame::Frame;

/// Raw bounding box as reported by a provider, in frame pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundingBox {
    pub origin_x: f64,
    pub origin_y: f64,
    pub width: f64,
    pub height: f64,
}

/// One classification entry attached to a raw detection.
///
/// Providers are not required to score their detections; a missing score
/// is represented explicitly rather than smuggled in as 0.0.
#[derive(Clone, Debug, PartialEq)]
pub struct Category {
    pub score: Option<f64>,
}

/// One face as reported by a provider, before result shaping.
#[derive(Clone, Debug, PartialEq)]
pub struct RawDetection {
    pub bounding_box: BoundingBox,
    pub categories: Vec<Category>,
}

/// Provider response for one frame. Detections keep the provider's
/// native ordering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetectorOutput {
    pub detections: Vec<RawDetection>,
}

/// Domain interface for the external face detection capability.
///
/// Implementations may keep per-call state (e.g. timestamp bookkeeping in
/// video mode), hence `&mut self`. Timestamps must be non-decreasing across
/// successive calls for the same source; that is the caller's obligation and
/// is not enforced here.
pub trait DetectorProvider: Send {
    fn detect_for_video(
        &mut self,
        frame: &Frame,
        timestamp_ms: f64,
    ) -> Result<DetectorOutput, Box<dyn std::error::Error>>;
}

/// Factory seam for acquiring a provider instance.
///
/// Acquisition is where model resolution and runtime construction happen,
/// so it can fail for network, parse, or hardware reasons. Injecting the
/// factory lets the initializer be exercised against stub outcomes.
pub trait ProviderFactory: Send + Sync {
    fn create(
        &self,
        options: &ProviderOptions,
    ) -> Result<Box<dyn DetectorProvider>, Box<dyn std::error::Error>>;
}

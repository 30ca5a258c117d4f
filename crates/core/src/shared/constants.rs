pub const FACE_MODEL_NAME: &str = "blaze_face_short_range.onnx";
pub const FACE_MODEL_URL: &str =
    "https://github.com/facewatch/facewatch/releases/download/v0.1.0/blaze_face_short_range.onnx";

/// Detections below this confidence are discarded by the provider.
pub const DEFAULT_MIN_DETECTION_CONFIDENCE: f64 = 0.5;

/// Score assigned to a detection whose category list carries no usable score.
pub const DEFAULT_CATEGORY_SCORE: f64 = 0.5;

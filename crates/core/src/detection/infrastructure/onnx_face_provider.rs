/// BlazeFace (short range) face detection via ONNX Runtime.
///
/// Produces raw detections in the provider wire shape; result shaping to the
/// public value type happens in the session layer.
use std::path::Path;

use crate::detection::domain::detector_provider::{
    BoundingBox, Category, DetectorOutput, DetectorProvider, RawDetection,
};
use crate::detection::domain::provider_options::{ProviderOptions, RunningMode};
use crate::detection::infrastructure::execution_provider::execution_providers_for;
use crate::shared::frame::Frame;

/// BlazeFace model input resolution.
const INPUT_SIZE: u32 = 128;

/// Number of anchors in the short-range model.
const NUM_ANCHORS: usize = 896;

/// NMS IoU threshold.
const NMS_IOU_THRESH: f64 = 0.3;

pub struct OnnxFaceProvider {
    session: ort::session::Session,
    min_confidence: f64,
    running_mode: RunningMode,
    anchors: Vec<[f32; 2]>,
    last_timestamp_ms: Option<f64>,
}

impl OnnxFaceProvider {
    /// Build a provider from a local BlazeFace ONNX model, honoring the
    /// delegate preference in `options`.
    pub fn new(
        model_path: &Path,
        options: &ProviderOptions,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let mut builder = ort::session::Session::builder()?;
        let providers = execution_providers_for(options.base_options.delegate);
        if !providers.is_empty() {
            builder = builder.with_execution_providers(providers)?;
        }
        let session = builder.commit_from_file(model_path)?;

        Ok(Self {
            session,
            min_confidence: options.min_detection_confidence,
            running_mode: options.running_mode,
            anchors: generate_anchors(),
            last_timestamp_ms: None,
        })
    }
}

impl DetectorProvider for OnnxFaceProvider {
    fn detect_for_video(
        &mut self,
        frame: &Frame,
        timestamp_ms: f64,
    ) -> Result<DetectorOutput, Box<dyn std::error::Error>> {
        if self.running_mode == RunningMode::Video {
            // Monotonicity is a caller obligation; a regression is worth a
            // trace but not a rejection.
            if let Some(last) = self.last_timestamp_ms {
                if timestamp_ms < last {
                    log::debug!("video timestamp regressed: {timestamp_ms}ms after {last}ms");
                }
            }
            self.last_timestamp_ms = Some(timestamp_ms);
        }

        let input_tensor = preprocess(frame, INPUT_SIZE);
        let input_value = ort::value::Tensor::from_array(input_tensor)?;
        let outputs = self.session.run(ort::inputs![input_value])?;

        // The model emits two tensors:
        // - regressors: [1, 896, 16] (box deltas + keypoints)
        // - classificators: [1, 896, 1] (confidence logits)
        if outputs.len() < 2 {
            return Err(format!("BlazeFace model expected 2 outputs, got {}", outputs.len()).into());
        }
        let regressors = outputs[0].try_extract_array::<f32>()?;
        let logits = outputs[1].try_extract_array::<f32>()?;
        let reg_data = regressors.as_slice().ok_or("Cannot get regressor slice")?;
        let logit_data = logits.as_slice().ok_or("Cannot get score slice")?;

        let mut candidates = decode_candidates(
            reg_data,
            logit_data,
            &self.anchors,
            frame.width(),
            frame.height(),
            self.min_confidence,
        );
        let kept = nms(&mut candidates, NMS_IOU_THRESH);

        Ok(DetectorOutput {
            detections: kept.iter().map(Candidate::to_raw_detection).collect(),
        })
    }
}

// ---------------------------------------------------------------------------
// Preprocessing
// ---------------------------------------------------------------------------

/// Nearest-neighbor resize to `size × size`, normalized to [0,1], NCHW.
fn preprocess(frame: &Frame, size: u32) -> ndarray::Array4<f32> {
    let src = frame.as_ndarray();
    let src_h = frame.height() as usize;
    let src_w = frame.width() as usize;
    let s = size as usize;

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, s, s));
    for y in 0..s {
        let src_y = (((y as f64 + 0.5) * src_h as f64 / s as f64) as usize).min(src_h - 1);
        for x in 0..s {
            let src_x = (((x as f64 + 0.5) * src_w as f64 / s as f64) as usize).min(src_w - 1);
            for c in 0..3 {
                tensor[[0, c, y, x]] = src[[src_y, src_x, c]] as f32 / 255.0;
            }
        }
    }
    tensor
}

// ---------------------------------------------------------------------------
// Anchor decode
// ---------------------------------------------------------------------------

/// Anchor centers for the short-range model: a 16×16 grid with 2 anchors per
/// cell followed by an 8×8 grid with 6.
fn generate_anchors() -> Vec<[f32; 2]> {
    let strides = [(8, 2), (16, 6)]; // (stride, anchors_per_cell)
    let mut anchors = Vec::with_capacity(NUM_ANCHORS);

    for &(stride, per_cell) in &strides {
        let grid = INPUT_SIZE as usize / stride;
        for y in 0..grid {
            for x in 0..grid {
                let cx = (x as f32 + 0.5) / grid as f32;
                let cy = (y as f32 + 0.5) / grid as f32;
                for _ in 0..per_cell {
                    anchors.push([cx, cy]);
                }
            }
        }
    }
    anchors
}

#[derive(Clone, Debug)]
struct Candidate {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    score: f64,
}

impl Candidate {
    fn to_raw_detection(&self) -> RawDetection {
        RawDetection {
            bounding_box: BoundingBox {
                origin_x: self.x1,
                origin_y: self.y1,
                width: self.x2 - self.x1,
                height: self.y2 - self.y1,
            },
            categories: vec![Category {
                score: Some(self.score),
            }],
        }
    }
}

/// Decode anchor-relative box regressions into frame-pixel candidates,
/// keeping only those at or above `min_confidence`.
fn decode_candidates(
    reg_data: &[f32],
    logit_data: &[f32],
    anchors: &[[f32; 2]],
    frame_width: u32,
    frame_height: u32,
    min_confidence: f64,
) -> Vec<Candidate> {
    let fw = frame_width as f32;
    let fh = frame_height as f32;
    let mut candidates = Vec::new();

    for (i, &logit) in logit_data.iter().enumerate().take(anchors.len()) {
        let score = sigmoid(logit) as f64;
        if score < min_confidence {
            continue;
        }

        let reg_offset = i * 16;
        if reg_offset + 4 > reg_data.len() {
            break;
        }

        let anchor = &anchors[i];
        let cx = anchor[0] + reg_data[reg_offset] / INPUT_SIZE as f32;
        let cy = anchor[1] + reg_data[reg_offset + 1] / INPUT_SIZE as f32;
        let w = reg_data[reg_offset + 2] / INPUT_SIZE as f32;
        let h = reg_data[reg_offset + 3] / INPUT_SIZE as f32;

        candidates.push(Candidate {
            x1: ((cx - w / 2.0) * fw).max(0.0) as f64,
            y1: ((cy - h / 2.0) * fh).max(0.0) as f64,
            x2: ((cx + w / 2.0) * fw).min(fw) as f64,
            y2: ((cy + h / 2.0) * fh).min(fh) as f64,
            score,
        });
    }
    candidates
}

// ---------------------------------------------------------------------------
// NMS
// ---------------------------------------------------------------------------

fn nms(candidates: &mut [Candidate], iou_thresh: f64) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep = Vec::new();
    let mut suppressed = vec![false; candidates.len()];

    for i in 0..candidates.len() {
        if suppressed[i] {
            continue;
        }
        keep.push(candidates[i].clone());
        for j in (i + 1)..candidates.len() {
            if !suppressed[j] && box_iou(&candidates[i], &candidates[j]) > iou_thresh {
                suppressed[j] = true;
            }
        }
    }
    keep
}

fn box_iou(a: &Candidate, b: &Candidate) -> f64 {
    let x1 = a.x1.max(b.x1);
    let y1 = a.y1.max(b.y1);
    let x2 = a.x2.min(b.x2);
    let y2 = a.y2.min(b.y2);

    let inter = (x2 - x1).max(0.0) * (y2 - y1).max(0.0);
    if inter == 0.0 {
        return 0.0;
    }
    let area_a = (a.x2 - a.x1) * (a.y2 - a.y1);
    let area_b = (b.x2 - b.x1) * (b.y2 - b.y1);
    inter / (area_a + area_b - inter)
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

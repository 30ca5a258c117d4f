use std::sync::Arc;

use crate::detection::domain::detection::{shape_output, Detection};
use crate::session::detector_cell::{DetectorCell, DetectorLifecycle};
use crate::session::frame_source_registry::FrameSourceRegistry;
use crate::session::session_clock::SessionClock;

/// Owns the per-process detection state: the provider cell, the frame
/// source registry, and the monotonic clock.
///
/// Constructed once by whatever drives the process lifetime and shared from
/// there; [`detect_faces`](DetectionSession::detect_faces) is the sole query surface.
pub struct DetectionSession {
    cell: Arc<DetectorCell>,
    registry: Arc<FrameSourceRegistry>,
    clock: SessionClock,
}

impl DetectionSession {
    pub fn new() -> Self {
        Self {
            cell: Arc::new(DetectorCell::new()),
            registry: Arc::new(FrameSourceRegistry::new()),
            clock: SessionClock::new(),
        }
    }

    /// The cell the initializer writes into.
    pub fn cell(&self) -> &Arc<DetectorCell> {
        &self.cell
    }

    pub fn registry(&self) -> &Arc<FrameSourceRegistry> {
        &self.registry
    }

    pub fn lifecycle(&self) -> DetectorLifecycle {
        self.cell.lifecycle()
    }

    /// Block until initialization has either succeeded or failed.
    pub fn wait_until_settled(&self) -> DetectorLifecycle {
        self.cell.wait_until_settled()
    }

    /// Detect faces in the current frame of the source registered as
    /// `source_id`.
    ///
    /// Total by contract: never panics, never returns an error.
    /// - `None` — detector not ready, unknown/unloaded source, or an
    ///   internal failure (logged at error level).
    /// - `Some(vec![])` — detection ran and found nothing.
    /// - `Some(detections)` — faces, in the provider's native order.
    pub fn detect_faces(&self, source_id: &str) -> Option<Vec<Detection>> {
        if !self.cell.is_ready() {
            return None;
        }

        let source = self.registry.get(source_id)?;
        if !source.ready_state().can_sample() {
            return None;
        }

        let timestamp_ms = self.clock.now_ms();
        let frame = match source.current_frame() {
            Ok(frame) => frame,
            Err(e) => {
                log::error!("frame sampling failed for source {source_id:?}: {e}");
                return None;
            }
        };

        let result = self
            .cell
            .with_provider(|provider| provider.detect_for_video(&frame, timestamp_ms))?;

        match result {
            Ok(output) => Some(shape_output(&output)),
            Err(e) => {
                log::error!("face detection failed for source {source_id:?}: {e}");
                None
            }
        }
    }
}

impl Default for DetectionSession {
    fn default() -> Self {
        Self::new()
    }
}

use crate::shared::frame::Frame;

/// How far along a frame source is in making frames available, mirroring
/// media-element readiness semantics.
///
/// Ordering is meaningful: a source can be sampled once it reaches
/// [`ReadyState::HaveCurrentData`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReadyState {
    HaveNothing,
    HaveMetadata,
    HaveCurrentData,
    HaveFutureData,
    HaveEnoughData,
}

impl ReadyState {
    /// True when a decodable current frame exists.
    pub fn can_sample(self) -> bool {
        self >= ReadyState::HaveCurrentData
    }
}

/// A live producer of frames, looked up by string id at query time.
///
/// Implementations that advance over time (cameras, decoders) use interior
/// mutability; `current_frame` is a sample of "now", not a pull from a queue.
pub trait FrameSource: Send + Sync {
    fn ready_state(&self) -> ReadyState;

    /// Sample the current frame. Only meaningful when
    /// [`ready_state`](Self::ready_state) reports a sampleable state; callers
    /// are expected to check first.
    fn current_frame(&self) -> Result<Frame, Box<dyn std::error::Error>>;
}

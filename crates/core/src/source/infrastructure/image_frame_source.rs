use std::path::Path;

use crate::shared::frame::Frame;
use crate::source::domain::frame_source::{FrameSource, ReadyState};

/// Adapts a still image to the [`FrameSource`] interface.
///
/// The frame is decoded eagerly at construction, so the source is always
/// fully loaded; every sample returns the same frame. Used by the CLI and
/// anywhere a repeatable, known source is needed.
pub struct ImageFrameSource {
    frame: Frame,
}

impl ImageFrameSource {
    /// Decode `path` into an RGB frame.
    pub fn open(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let img = image::open(path)?.to_rgb8();
        let (width, height) = img.dimensions();
        Ok(Self {
            frame: Frame::rgb(img.into_raw(), width, height),
        })
    }

    /// Wrap an already-materialized frame.
    pub fn from_frame(frame: Frame) -> Self {
        Self { frame }
    }
}

impl FrameSource for ImageFrameSource {
    fn ready_state(&self) -> ReadyState {
        ReadyState::HaveEnoughData
    }

    fn current_frame(&self) -> Result<Frame, Box<dyn std::error::Error>> {
        Ok(self.frame.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_test_image(dir: &Path, width: u32, height: u32) -> PathBuf {
        let path = dir.join("test.png");
        let mut img = image::RgbImage::new(width, height);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgb([50, 100, 200]);
        }
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_open_decodes_rgb_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_image(dir.path(), 100, 80);
        let source = ImageFrameSource::open(&path).unwrap();

        let frame = source.current_frame().unwrap();
        assert_eq!(frame.width(), 100);
        assert_eq!(frame.height(), 80);
        assert_eq!(frame.channels(), 3);
        assert_eq!(&frame.data()[..3], &[50, 100, 200]);
    }

    #[test]
    fn test_open_nonexistent_errors() {
        assert!(ImageFrameSource::open(Path::new("/nonexistent/test.png")).is_err());
    }

    #[test]
    fn test_always_fully_loaded() {
        let source = ImageFrameSource::from_frame(Frame::rgb(vec![0u8; 12], 2, 2));
        assert_eq!(source.ready_state(), ReadyState::HaveEnoughData);
        assert!(source.ready_state().can_sample());
    }

    #[test]
    fn test_repeated_samples_return_same_frame() {
        let source = ImageFrameSource::from_frame(Frame::rgb(vec![9u8; 12], 2, 2));
        let a = source.current_frame().unwrap();
        let b = source.current_frame().unwrap();
        assert_eq!(a.data(), b.data());
    }
}

//! Trait for the upstream producer of per-frame annotations.

use std::collections::VecDeque;
use std::convert::Infallible;

use crate::overlay::{Detection, FrameAnnotations};

/// Producer of per-frame detections and overlay requests.
///
/// Implement this trait to connect any detector or metadata stream to the
/// annotation pipeline. Frames are yielded in presentation order.
///
/// # Example
///
/// ```ignore
/// use osd_coord_rs::{AnnotationSource, FrameAnnotations};
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl AnnotationSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn next_frame(&mut self) -> Result<Option<FrameAnnotations>, Self::Error> {
///         // Run inference and return the frame's detections
///         Ok(None)
///     }
/// }
/// ```
pub trait AnnotationSource {
    /// Error type for source failures.
    type Error;

    /// The next frame's annotations, or `None` at end of stream.
    fn next_frame(&mut self) -> Result<Option<FrameAnnotations>, Self::Error>;
}

/// Helper trait for converting model-specific outputs to `FrameAnnotations`.
///
/// Implement this for your model's output format to enable easy conversion.
pub trait IntoFrameAnnotations {
    /// Convert the output into one frame's annotations.
    fn into_frame_annotations(self) -> FrameAnnotations;
}

impl IntoFrameAnnotations for FrameAnnotations {
    fn into_frame_annotations(self) -> FrameAnnotations {
        self
    }
}

impl IntoFrameAnnotations for Vec<Detection> {
    fn into_frame_annotations(self) -> FrameAnnotations {
        FrameAnnotations::new(self)
    }
}

/// Source replaying a fixed list of frames.
#[derive(Debug, Clone, Default)]
pub struct VecSource {
    frames: VecDeque<FrameAnnotations>,
}

impl VecSource {
    pub fn new<I, F>(frames: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: IntoFrameAnnotations,
    {
        Self {
            frames: frames
                .into_iter()
                .map(IntoFrameAnnotations::into_frame_annotations)
                .collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl AnnotationSource for VecSource {
    type Error = Infallible;

    fn next_frame(&mut self) -> Result<Option<FrameAnnotations>, Self::Error> {
        Ok(self.frames.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::Rect;

    #[test]
    fn test_vec_source_yields_in_order() {
        let frames = vec![
            vec![Detection::new(0, Rect::new(0.0, 0.0, 1.0, 1.0))],
            vec![],
        ];
        let mut source = VecSource::new(frames);
        assert_eq!(source.remaining(), 2);
        assert_eq!(source.next_frame().unwrap().unwrap().detections.len(), 1);
        assert!(source.next_frame().unwrap().unwrap().detections.is_empty());
        assert!(source.next_frame().unwrap().is_none());
    }
}

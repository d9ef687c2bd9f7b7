//! AnnotationPipeline for combining batched drawing with metadata publishing.

use log::{info, warn};

use super::{DrawTarget, RenderBackend};
use crate::config::OsdConfig;
use crate::error::{ConfigError, PipelineError, PublishError};
use crate::metadata::{MetadataPublisher, MetadataSink, PublishStatus};
use crate::overlay::{
    ClockParams, FlushSummary, FrameAnnotationExtractor, FrameAnnotations, FrameContext,
    RenderMode,
};

/// How the frame's metadata delivery went.
#[derive(Debug)]
pub enum PublishOutcome {
    /// The frame had no records.
    Skipped,
    Delivered { bytes: usize },
    /// Delivery failed; the frame itself was still drawn.
    Failed(PublishError),
}

impl PublishOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl From<Result<PublishStatus, PublishError>> for PublishOutcome {
    fn from(result: Result<PublishStatus, PublishError>) -> Self {
        match result {
            Ok(PublishStatus::Skipped) => Self::Skipped,
            Ok(PublishStatus::Delivered { bytes }) => Self::Delivered { bytes },
            Err(e) => Self::Failed(e),
        }
    }
}

/// Summary of one processed frame.
#[derive(Debug)]
pub struct FrameReport {
    pub frame_number: u64,
    /// Coordinate records extracted (and offered to the sink).
    pub records: usize,
    pub flushes: FlushSummary,
    pub publish: PublishOutcome,
}

/// A combined pipeline that bundles batched OSD drawing with metadata
/// publishing.
///
/// Owns the frame context and all per-frame buffers; frames are processed
/// one at a time on the calling thread.
pub struct AnnotationPipeline<B: RenderBackend, S: MetadataSink> {
    backend: B,
    extractor: FrameAnnotationExtractor,
    publisher: MetadataPublisher<S>,
    ctx: FrameContext,
    requested_mode: RenderMode,
    clock: Option<ClockParams>,
    configured_size: Option<(u32, u32)>,
    initialized: bool,
}

impl<B: RenderBackend, S: MetadataSink> AnnotationPipeline<B, S> {
    /// Create a new pipeline from a validated configuration.
    pub fn new(config: &OsdConfig, backend: B, sink: S) -> Result<Self, ConfigError> {
        let extractor = FrameAnnotationExtractor::new(config.toggles(), config.palette()?);
        Self::with_extractor(config, backend, sink, extractor)
    }

    /// Create a pipeline around a custom extractor (e.g. a smaller batch capacity).
    pub fn with_extractor(
        config: &OsdConfig,
        backend: B,
        sink: S,
        extractor: FrameAnnotationExtractor,
    ) -> Result<Self, ConfigError> {
        let clock = config.clock_params()?;
        let publisher = MetadataPublisher::new(
            sink,
            config.broker.connection_params(),
            config.broker.queue.clone(),
        );
        Ok(Self {
            backend,
            extractor,
            publisher,
            ctx: FrameContext::new(config.process_mode),
            requested_mode: config.process_mode,
            clock: config.display_clock.then_some(clock),
            configured_size: None,
            initialized: false,
        })
    }

    /// Prepare the backend and connect the metadata sink.
    ///
    /// Must be called once before the first frame.
    pub fn initialize(&mut self) -> Result<(), PipelineError> {
        self.backend
            .make_current()
            .map_err(|e| PipelineError::Backend(Box::new(e)))?;

        self.ctx.mode = self.requested_mode.resolve(self.backend.is_integrated());
        self.backend
            .init_hw_blend_colors(self.extractor.palette())
            .map_err(|e| PipelineError::Backend(Box::new(e)))?;
        if let Some(clock) = &self.clock {
            self.backend
                .set_clock_params(clock)
                .map_err(|e| PipelineError::Backend(Box::new(e)))?;
        }

        self.publisher.connect().map_err(PipelineError::Connect)?;
        self.initialized = true;
        info!(
            "annotation pipeline ready in {:?} mode, {} palette entries",
            self.ctx.mode,
            self.extractor.palette().len()
        );
        Ok(())
    }

    /// Set the frame dimensions; reconfigures the backend only on change.
    pub fn set_frame_size(&mut self, width: u32, height: u32) -> Result<(), PipelineError> {
        if self.configured_size == Some((width, height)) {
            return Ok(());
        }
        self.backend
            .make_current()
            .map_err(|e| PipelineError::Backend(Box::new(e)))?;
        self.backend
            .configure(width, height)
            .map_err(|e| PipelineError::Backend(Box::new(e)))?;
        if let Some(clock) = &self.clock {
            self.backend
                .set_clock_params(clock)
                .map_err(|e| PipelineError::Backend(Box::new(e)))?;
        }
        self.ctx.width = width;
        self.ctx.height = height;
        self.configured_size = Some((width, height));
        Ok(())
    }

    /// Annotate one frame and publish its coordinate metadata.
    ///
    /// Draw and device failures abort the frame and are returned; metadata
    /// delivery failures are logged and reported in the [`FrameReport`].
    ///
    /// Once the frame's records have been offered to the sink the frame number
    /// is consumed, even if the terminal flush then fails, so published frame
    /// numbers never repeat.
    pub fn process_frame(
        &mut self,
        surface: &mut B::Surface,
        frame: &FrameAnnotations,
    ) -> Result<FrameReport, PipelineError> {
        if !self.initialized {
            return Err(PipelineError::NotInitialized);
        }

        let frame_number = self.ctx.frame_number;
        let mut target = DrawTarget::new(&mut self.backend, surface, &self.ctx);
        target.activate()?;

        let records = self.extractor.extract(frame, &mut target)?;
        let record_count = records.len();
        let publish = PublishOutcome::from(self.publisher.publish(records));
        if let PublishOutcome::Failed(e) = &publish {
            warn!("frame {}: metadata not delivered: {}", frame_number, e);
        }

        let finished = self.extractor.finish(&mut target);
        self.ctx.frame_number += 1;
        let flushes = finished?;

        Ok(FrameReport {
            frame_number,
            records: record_count,
            flushes,
            publish,
        })
    }

    /// Disconnect the sink and release the backend context.
    pub fn shutdown(&mut self) -> Result<(), PipelineError> {
        self.initialized = false;
        let disconnected = self.publisher.disconnect();
        self.backend
            .release()
            .map_err(|e| PipelineError::Backend(Box::new(e)))?;
        disconnected.map_err(PipelineError::Connect)?;
        info!(
            "annotation pipeline stopped after {} frame(s)",
            self.ctx.frame_number
        );
        Ok(())
    }

    /// Number the next processed frame will carry.
    pub fn frame_number(&self) -> u64 {
        self.ctx.frame_number
    }

    pub fn context(&self) -> &FrameContext {
        &self.ctx
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Get a reference to the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Get a mutable reference to the underlying backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Get a reference to the metadata publisher.
    pub fn publisher(&self) -> &MetadataPublisher<S> {
        &self.publisher
    }

    /// Get a mutable reference to the metadata publisher.
    pub fn publisher_mut(&mut self) -> &mut MetadataPublisher<S> {
        &mut self.publisher
    }

    pub fn extractor(&self) -> &FrameAnnotationExtractor {
        &self.extractor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::RecordingBackend;
    use crate::metadata::{FrameMessage, MemorySink};
    use crate::overlay::{Detection, Rect};

    #[test]
    fn test_annotation_pipeline() {
        let config = OsdConfig::default();
        let mut pipeline =
            AnnotationPipeline::new(&config, RecordingBackend::new(), MemorySink::new()).unwrap();
        pipeline.initialize().unwrap();
        pipeline.set_frame_size(640, 480).unwrap();

        let frame = FrameAnnotations::new(vec![Detection::new(0, Rect::new(10.0, 20.0, 40.0, 60.0))]);
        let report = pipeline.process_frame(&mut (), &frame).unwrap();

        assert_eq!(report.frame_number, 0);
        assert_eq!(report.records, 1);
        assert!(matches!(report.publish, PublishOutcome::Delivered { .. }));
        assert_eq!(pipeline.frame_number(), 1);
        assert_eq!(pipeline.backend().frame_size(), Some((640, 480)));

        let messages = pipeline.publisher().sink().messages();
        let msg: FrameMessage = serde_json::from_slice(&messages[0].payload).unwrap();
        assert_eq!(msg.frame_number, 0);
        assert_eq!(messages[0].destination, "peoplenet-metadata-queue-test");
    }

    #[test]
    fn test_process_before_initialize_fails() {
        let mut pipeline =
            AnnotationPipeline::new(&OsdConfig::default(), RecordingBackend::new(), MemorySink::new())
                .unwrap();
        let err = pipeline
            .process_frame(&mut (), &FrameAnnotations::default())
            .unwrap_err();
        assert!(matches!(err, PipelineError::NotInitialized));
    }
}

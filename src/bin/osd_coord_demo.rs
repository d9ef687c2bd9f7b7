//! Dry-run driver: annotates synthetic frames with a recording backend and
//! writes each frame's metadata message to stdout as one JSON line.

use std::error::Error;
use std::io;

use clap::Parser;
use log::info;

use osd_coord_rs::integration::{RecordingBackend, VecSource};
use osd_coord_rs::metadata::WriterSink;
use osd_coord_rs::{AnnotationPipeline, AnnotationSource, Detection, DetectionBuilder, OsdConfig};

#[derive(Parser, Debug)]
#[command(name = "osd-coord-demo", version, about)]
struct Args {
    /// TOML configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<String>,

    /// Number of frames to generate.
    #[arg(short, long, default_value_t = 10)]
    frames: usize,

    /// Detections per frame.
    #[arg(short, long, default_value_t = 3)]
    detections: usize,

    #[arg(long, default_value_t = 1920)]
    width: u32,

    #[arg(long, default_value_t = 1080)]
    height: u32,
}

fn synthetic_frame(frame: usize, count: usize) -> Vec<Detection> {
    (0..count)
        .map(|i| {
            let step = (frame * 8) as f32;
            let left = 40.0 + (i as f32) * 160.0 + step;
            DetectionBuilder::new()
                .tlwh(60.0 + step, left, 120.0, 240.0)
                .class_id((i % 4) as i32)
                .label(format!("object-{}", i))
                .build()
        })
        .collect()
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => OsdConfig::from_file(path)?,
        None => OsdConfig::default(),
    };

    let mut source = VecSource::new((0..args.frames).map(|f| synthetic_frame(f, args.detections)));
    let sink = WriterSink::new(io::stdout().lock());
    let mut pipeline = AnnotationPipeline::new(&config, RecordingBackend::new(), sink)?;
    pipeline.initialize()?;
    pipeline.set_frame_size(args.width, args.height)?;

    while let Some(frame) = source.next_frame()? {
        let report = pipeline.process_frame(&mut (), &frame)?;
        info!(
            "frame {}: {} record(s), {} draw call(s)",
            report.frame_number,
            report.records,
            report.flushes.total()
        );
    }

    pipeline.shutdown()?;
    info!(
        "{} draw call(s) recorded in total",
        pipeline.backend().calls().len()
    );
    Ok(())
}

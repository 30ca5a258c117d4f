use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;

use facewatch_core::detection::domain::provider_options::{Delegate, ModelAsset, ProviderOptions};
use facewatch_core::detection::infrastructure::onnx_provider_factory::OnnxProviderFactory;
use facewatch_core::session::detector_cell::DetectorLifecycle;
use facewatch_core::session::detection_session::DetectionSession;
use facewatch_core::session::initializer::{ImmediateHost, Initializer};
use facewatch_core::shared::constants::FACE_MODEL_NAME;
use facewatch_core::source::infrastructure::image_frame_source::ImageFrameSource;

const SOURCE_ID: &str = "input0";

/// Face detection over a registered frame source.
#[derive(Parser)]
#[command(name = "facewatch")]
struct Cli {
    /// Input image file to register as the frame source.
    input: PathBuf,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value = "0.5")]
    confidence: f64,

    /// Inference delegate: gpu or cpu.
    #[arg(long, default_value = "gpu")]
    delegate: String,

    /// Override the model download URL.
    #[arg(long)]
    model_url: Option<String>,

    /// Directory to check for a bundled model before downloading.
    #[arg(long)]
    model_dir: Option<PathBuf>,

    /// Number of sequential detection calls to issue.
    #[arg(long, default_value = "1")]
    frames: usize,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let session = DetectionSession::new();
    session
        .registry()
        .register(SOURCE_ID, Arc::new(ImageFrameSource::open(&cli.input)?));

    let factory: Arc<OnnxProviderFactory> = match cli.model_dir.clone() {
        Some(dir) => Arc::new(OnnxProviderFactory::with_bundled_dir(dir)),
        None => Arc::new(OnnxProviderFactory::new()),
    };
    let initializer = Initializer::new(session.cell().clone(), factory, build_options(&cli)?);
    initializer.trigger(&ImmediateHost);

    if session.wait_until_settled() == DetectorLifecycle::Failed {
        return Err("detector initialization failed (see warnings above)".into());
    }

    for call in 0..cli.frames {
        match session.detect_faces(SOURCE_ID) {
            Some(detections) if detections.is_empty() => {
                log::info!("call {call}: no faces found");
            }
            Some(detections) => {
                for d in &detections {
                    println!(
                        "{:.1} {:.1} {:.1} {:.1} {:.3}",
                        d.x, d.y, d.width, d.height, d.score
                    );
                }
            }
            None => log::warn!("call {call}: detection unavailable"),
        }
    }

    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("input file not found: {}", cli.input.display()).into());
    }
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err("confidence must be between 0.0 and 1.0".into());
    }
    if cli.frames == 0 {
        return Err("frames must be at least 1".into());
    }
    Ok(())
}

fn build_options(cli: &Cli) -> Result<ProviderOptions, Box<dyn std::error::Error>> {
    let mut options = ProviderOptions::default();
    options.min_detection_confidence = cli.confidence;
    options.base_options.delegate = match cli.delegate.as_str() {
        "gpu" => Delegate::Gpu,
        "cpu" => Delegate::Cpu,
        other => return Err(format!("unknown delegate: {other}").into()),
    };
    if let Some(url) = &cli.model_url {
        options.base_options.model_asset = ModelAsset::new(FACE_MODEL_NAME, url.clone());
    }
    Ok(options)
}

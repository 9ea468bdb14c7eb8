use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use face_monitor_core::detection::domain::face_detector::FaceDetector;
use face_monitor_core::detection::domain::landmark_predictor::LandmarkPredictor;
use face_monitor_core::detection::infrastructure::onnx_landmark_predictor::OnnxLandmarkPredictor;
use face_monitor_core::detection::infrastructure::onnx_yolo_detector::{
    OnnxYoloDetector, DEFAULT_CONFIDENCE,
};
use face_monitor_core::display::domain::display_surface::DisplaySurface;
use face_monitor_core::display::infrastructure::headless_display::HeadlessDisplay;
use face_monitor_core::display::infrastructure::highgui_display::HighguiDisplay;
use face_monitor_core::gaze::domain::gaze_estimator::{GazeThreshold, DEFAULT_THRESHOLD_DEGREES};
use face_monitor_core::pipeline::monitor_faces_use_case::MonitorFacesUseCase;
use face_monitor_core::pipeline::pipeline_logger::LogPipelineLogger;
use face_monitor_core::shared::constants::{
    DEFAULT_CAMERA_INDEX, DEFAULT_CAPTURE_HEIGHT, DEFAULT_CAPTURE_WIDTH, DEFAULT_QUIT_KEY,
    LANDMARK_MODEL_NAME, YOLO_MODEL_NAME, YOLO_MODEL_URL,
};
use face_monitor_core::shared::model_resolver;
use face_monitor_core::video::domain::frame_source::FrameSource;
use face_monitor_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use face_monitor_core::video::infrastructure::opencv_camera::OpenCvCamera;

/// Reports whether each detected face is looking at the monitor.
#[derive(Parser, Debug)]
#[command(name = "face-monitor")]
struct Cli {
    /// Capture device index.
    #[arg(long, default_value_t = DEFAULT_CAMERA_INDEX)]
    camera: i32,

    /// Read a video or image file instead of the camera.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Requested capture width (best-effort).
    #[arg(long, default_value_t = DEFAULT_CAPTURE_WIDTH)]
    width: u32,

    /// Requested capture height (best-effort).
    #[arg(long, default_value_t = DEFAULT_CAPTURE_HEIGHT)]
    height: u32,

    /// Largest eye-line angle, in degrees, still counted as facing (0-90).
    #[arg(long, default_value_t = DEFAULT_THRESHOLD_DEGREES)]
    threshold: f64,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE)]
    confidence: f64,

    /// Key that stops monitoring.
    #[arg(long, default_value_t = DEFAULT_QUIT_KEY)]
    quit_key: char,

    /// Log decisions instead of opening a window.
    #[arg(long)]
    headless: bool,
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

    let bundled_dir = std::env::current_dir()?;
    let detector = build_detector(&cli, &bundled_dir)?;
    let predictor = build_predictor(&bundled_dir)?;
    let source = open_source(&cli)?;
    let display: Box<dyn DisplaySurface> = if cli.headless {
        Box::new(HeadlessDisplay::new())
    } else {
        Box::new(HighguiDisplay::new()?)
    };

    let mut use_case = MonitorFacesUseCase::new(
        source,
        detector,
        predictor,
        display,
        GazeThreshold::new(cli.threshold),
        cli.quit_key,
        Box::new(LogPipelineLogger::default()),
    );
    let summary = use_case.execute((cli.width, cli.height))?;

    log::info!(
        "{} of {} faces were looking at the monitor",
        summary.faces_facing,
        summary.faces_analysed
    );
    Ok(())
}

fn open_source(cli: &Cli) -> Result<Box<dyn FrameSource>, Box<dyn std::error::Error>> {
    match &cli.input {
        Some(path) => Ok(Box::new(FfmpegReader::open(path)?)),
        None => Ok(Box::new(OpenCvCamera::open(cli.camera)?)),
    }
}

fn build_detector(
    cli: &Cli,
    bundled_dir: &Path,
) -> Result<Box<dyn FaceDetector>, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {YOLO_MODEL_NAME}");
    let model_path = model_resolver::resolve(
        YOLO_MODEL_NAME,
        Some(YOLO_MODEL_URL),
        Some(bundled_dir),
        Some(Box::new(download_progress)),
    )?;
    Ok(Box::new(OnnxYoloDetector::new(&model_path, cli.confidence)?))
}

fn build_predictor(
    bundled_dir: &Path,
) -> Result<Box<dyn LandmarkPredictor>, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {LANDMARK_MODEL_NAME}");
    let model_path = model_resolver::resolve(LANDMARK_MODEL_NAME, None, Some(bundled_dir), None)?;
    Ok(Box::new(OnnxLandmarkPredictor::new(&model_path)?))
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(input) = &cli.input {
        if !input.exists() {
            return Err(format!("Input file not found: {}", input.display()).into());
        }
    }
    if cli.camera < 0 {
        return Err(format!("Camera index must be non-negative, got {}", cli.camera).into());
    }
    if cli.width == 0 || cli.height == 0 {
        return Err(format!(
            "Capture size must be positive, got {}x{}",
            cli.width, cli.height
        )
        .into());
    }
    if !(0.0..=90.0).contains(&cli.threshold) {
        return Err(format!(
            "Threshold must be between 0 and 90 degrees, got {}",
            cli.threshold
        )
        .into());
    }
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    if !cli.quit_key.is_ascii_graphic() {
        return Err(format!(
            "Quit key must be a printable ASCII character, got {:?}",
            cli.quit_key
        )
        .into());
    }
    Ok(())
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading face detection model... {pct}%");
        if downloaded >= total {
            eprintln!();
        }
    } else {
        eprint!("\rDownloading face detection model... {downloaded} bytes");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["face-monitor"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults_match_plain_invocation() {
        let cli = parse(&[]);
        assert_eq!(cli.camera, 0);
        assert!(cli.input.is_none());
        assert_eq!((cli.width, cli.height), (10, 5));
        assert_eq!(cli.threshold, 30.0);
        assert_eq!(cli.confidence, 0.5);
        assert_eq!(cli.quit_key, 'q');
        assert!(!cli.headless);
        assert!(validate(&cli).is_ok());
    }

    #[test]
    fn test_flags_are_parsed() {
        let cli = parse(&[
            "--camera", "2", "--width", "640", "--height", "480", "--threshold", "15",
            "--confidence", "0.7", "--quit-key", "x", "--headless",
        ]);
        assert_eq!(cli.camera, 2);
        assert_eq!((cli.width, cli.height), (640, 480));
        assert_eq!(cli.threshold, 15.0);
        assert_eq!(cli.quit_key, 'x');
        assert!(cli.headless);
        assert!(validate(&cli).is_ok());
    }

    #[test]
    fn test_multi_character_quit_key_is_rejected_by_parser() {
        assert!(Cli::try_parse_from(["face-monitor", "--quit-key", "qq"]).is_err());
    }

    #[rstest]
    #[case::threshold_high(&["--threshold", "91"], "Threshold")]
    #[case::threshold_negative(&["--threshold=-1"], "Threshold")]
    #[case::confidence(&["--confidence", "1.5"], "Confidence")]
    #[case::zero_width(&["--width", "0"], "Capture size")]
    #[case::negative_camera(&["--camera=-1"], "Camera index")]
    #[case::non_ascii_key(&["--quit-key", "é"], "Quit key")]
    #[case::space_key(&["--quit-key", " "], "Quit key")]
    #[case::missing_input(&["--input", "/nonexistent/clip.mp4"], "Input file not found")]
    fn test_validate_rejects(#[case] args: &[&str], #[case] message: &str) {
        let err = validate(&parse(args)).unwrap_err();
        assert!(
            err.to_string().contains(message),
            "expected {message:?} in {err}"
        );
    }

    #[test]
    fn test_validate_accepts_existing_input() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let cli = parse(&["--input", file.path().to_str().unwrap()]);
        assert!(validate(&cli).is_ok());
    }
}

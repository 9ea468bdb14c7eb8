use std::time::Instant;

use crate::detection::domain::face_detector::FaceDetector;
use crate::detection::domain::landmark_predictor::LandmarkPredictor;
use crate::display::domain::display_surface::DisplaySurface;
use crate::display::domain::gaze_label::GazeLabel;
use crate::gaze::domain::eye_landmarks::EyeLandmarks;
use crate::gaze::domain::gaze_estimator::GazeThreshold;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::video::domain::frame_source::FrameSource;

/// Why the monitor loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    EndOfStream,
    AcquisitionFailed,
    QuitRequested,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoopState {
    Running,
    Stopped(StopReason),
}

/// Totals for one monitoring run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonitorSummary {
    pub frames_displayed: usize,
    pub faces_analysed: usize,
    pub faces_facing: usize,
    pub stop_reason: StopReason,
}

#[derive(Default)]
struct Tally {
    frames_displayed: usize,
    faces_analysed: usize,
    faces_facing: usize,
}

impl Tally {
    fn finish(self, stop_reason: StopReason) -> MonitorSummary {
        MonitorSummary {
            frames_displayed: self.frames_displayed,
            faces_analysed: self.faces_analysed,
            faces_facing: self.faces_facing,
            stop_reason,
        }
    }
}

/// Live gaze monitor: read → luminance → detect → landmarks → label → show
/// → poll key, until the stream ends or the quit key is pressed.
///
/// The source is released and the display closed on every exit path.
pub struct MonitorFacesUseCase {
    source: Box<dyn FrameSource>,
    detector: Box<dyn FaceDetector>,
    predictor: Box<dyn LandmarkPredictor>,
    display: Box<dyn DisplaySurface>,
    threshold: GazeThreshold,
    quit_key: char,
    logger: Box<dyn PipelineLogger>,
}

impl MonitorFacesUseCase {
    pub fn new(
        source: Box<dyn FrameSource>,
        detector: Box<dyn FaceDetector>,
        predictor: Box<dyn LandmarkPredictor>,
        display: Box<dyn DisplaySurface>,
        threshold: GazeThreshold,
        quit_key: char,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            source,
            detector,
            predictor,
            display,
            threshold,
            quit_key,
            logger,
        }
    }

    /// Runs the loop to completion.
    ///
    /// `requested` is passed to the source as a best-effort resolution.
    /// Acquisition failures end the run normally; detector, predictor and
    /// display failures are returned after cleanup.
    pub fn execute(
        &mut self,
        requested: (u32, u32),
    ) -> Result<MonitorSummary, Box<dyn std::error::Error>> {
        let (width, height) = requested;
        if let Err(e) = self.source.configure(width, height) {
            log::warn!("Could not request {width}x{height} capture: {e}");
        }

        self.logger.info(&format!(
            "Monitoring (threshold {:.1}°, press '{}' to quit)",
            self.threshold.degrees(),
            self.quit_key
        ));

        let result = self.run();
        self.source.release();
        self.display.close();
        let summary = result?;

        self.logger.info(&format!(
            "Stopped ({:?}) after {} frames",
            summary.stop_reason, summary.frames_displayed
        ));
        self.logger.summary();
        Ok(summary)
    }

    fn run(&mut self) -> Result<MonitorSummary, Box<dyn std::error::Error>> {
        let mut tally = Tally::default();
        loop {
            if let LoopState::Stopped(reason) = self.step(&mut tally)? {
                return Ok(tally.finish(reason));
            }
        }
    }

    fn step(&mut self, tally: &mut Tally) -> Result<LoopState, Box<dyn std::error::Error>> {
        let t0 = Instant::now();
        let frame = match self.source.read() {
            Ok(Some(frame)) => frame,
            Ok(None) => return Ok(LoopState::Stopped(StopReason::EndOfStream)),
            Err(e) => {
                log::warn!("Frame acquisition failed: {e}");
                return Ok(LoopState::Stopped(StopReason::AcquisitionFailed));
            }
        };
        self.logger.timing("read", elapsed_ms(t0));

        let luma = frame.to_luma();

        let t0 = Instant::now();
        let regions = self.detector.detect(&luma)?;
        self.logger.timing("detect", elapsed_ms(t0));
        self.logger.metric("faces", regions.len() as f64);

        let t0 = Instant::now();
        let mut labels = Vec::with_capacity(regions.len());
        for region in &regions {
            let shape = self.predictor.predict(&luma, region)?;
            let eyes = EyeLandmarks::from_shape(&shape);
            let facing = eyes.is_facing_camera(self.threshold);
            log::debug!(
                "Frame {}: eye angle {:.1}°, facing={facing}",
                frame.index(),
                eyes.facing_angle()
            );
            tally.faces_analysed += 1;
            tally.faces_facing += usize::from(facing);
            labels.push(GazeLabel::for_decision(facing));
        }
        if !regions.is_empty() {
            self.logger.timing("landmarks", elapsed_ms(t0));
        }

        let t0 = Instant::now();
        self.display.show(&frame, &labels)?;
        self.logger.timing("display", elapsed_ms(t0));
        tally.frames_displayed += 1;
        self.logger.progress(tally.frames_displayed);

        if self.display.poll_key()? == Some(self.quit_key) {
            return Ok(LoopState::Stopped(StopReason::QuitRequested));
        }
        Ok(LoopState::Running)
    }
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}

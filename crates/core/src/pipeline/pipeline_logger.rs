use std::collections::HashMap;
use std::time::Instant;

/// Observer for monitor-loop events.
///
/// Keeps the use case free of any particular output mechanism.
pub trait PipelineLogger {
    /// Report that `current` frames have been processed so far.
    fn progress(&mut self, current: usize);

    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. faces in the frame).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards all events.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Sample count and sum for one stage or metric.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct RunningStat {
    count: usize,
    total: f64,
}

impl RunningStat {
    fn record(&mut self, value: f64) {
        self.count += 1;
        self.total += value;
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }
}

/// Forwards events to the `log` facade and aggregates per-stage timings and
/// metrics for an end-of-run summary.
///
/// Streams have no known length, so progress is reported every
/// `throttle_frames` frames. Only running totals are kept per name.
pub struct LogPipelineLogger {
    throttle_frames: usize,
    timings: HashMap<String, RunningStat>,
    metrics: HashMap<String, RunningStat>,
    start_time: Instant,
    frames: usize,
}

impl LogPipelineLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            frames: 0,
        }
    }

    /// Formatted summary, or `None` if nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Monitor summary ({} frames, {:.1}s):",
            self.frames,
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.iter().collect();
        stages.sort_by(|a, b| a.0.cmp(b.0));
        for (stage, stat) in stages {
            let total_ms = stat.total;
            let share = if elapsed_ms > 0.0 {
                total_ms / elapsed_ms * 100.0
            } else {
                0.0
            };
            lines.push(format!(
                "  {stage:10}: avg {:6.1}ms  total {total_ms:7.0}ms  ({share:4.1}%)",
                stat.mean()
            ));
        }

        let mut metrics: Vec<_> = self.metrics.iter().collect();
        metrics.sort_by(|a, b| a.0.cmp(b.0));
        for (name, stat) in metrics {
            lines.push(format!("  {name}: avg {:.1}", stat.mean()));
        }

        if self.frames > 0 && elapsed_ms > 0.0 {
            let fps = self.frames as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }

    #[cfg(test)]
    fn timings_for(&self, stage: &str) -> Option<RunningStat> {
        self.timings.get(stage).copied()
    }

    #[cfg(test)]
    fn metrics_for(&self, name: &str) -> Option<RunningStat> {
        self.metrics.get(name).copied()
    }
}

impl Default for LogPipelineLogger {
    fn default() -> Self {
        Self::new(100)
    }
}

impl PipelineLogger for LogPipelineLogger {
    fn progress(&mut self, current: usize) {
        self.frames = current;
        if current % self.throttle_frames == 0 {
            log::info!("Processed {current} frames");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .record(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .record(value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_null_logger_accepts_everything() {
        let mut logger = NullPipelineLogger;
        logger.progress(1);
        logger.timing("detect", 5.0);
        logger.metric("faces", 1.0);
        logger.info("hello");
        logger.summary();
    }

    #[test]
    fn test_timings_are_kept_per_stage() {
        let mut logger = LogPipelineLogger::new(10);
        logger.timing("detect", 20.0);
        logger.timing("detect", 30.0);
        logger.timing("landmarks", 5.0);

        let detect = logger.timings_for("detect").unwrap();
        assert_eq!(detect.count, 2);
        assert_relative_eq!(detect.total, 50.0);
        assert_relative_eq!(detect.mean(), 25.0);
        assert_eq!(logger.timings_for("landmarks").unwrap().count, 1);
        assert!(logger.timings_for("display").is_none());
    }

    #[test]
    fn test_metric_average() {
        let mut logger = LogPipelineLogger::new(10);
        logger.metric("faces", 1.0);
        logger.metric("faces", 2.0);

        assert_relative_eq!(logger.metrics_for("faces").unwrap().mean(), 1.5);
    }

    #[test]
    fn test_long_stream_keeps_constant_state() {
        let mut logger = LogPipelineLogger::new(1_000_000);
        // One hour at 30 fps, recording what each monitor iteration records.
        let frames = 30 * 60 * 60;
        for frame in 1..=frames {
            for stage in ["read", "detect", "landmarks", "display"] {
                logger.timing(stage, 2.0);
            }
            logger.metric("faces", 1.0);
            logger.progress(frame);
        }

        assert_eq!(logger.timings.len(), 4);
        assert_eq!(logger.metrics.len(), 1);
        let read = logger.timings_for("read").unwrap();
        assert_eq!(read.count, frames);
        assert_relative_eq!(read.mean(), 2.0);
        assert_eq!(logger.metrics_for("faces").unwrap().count, frames);
    }

    #[test]
    fn test_running_stat_mean_of_nothing_is_zero() {
        assert_eq!(RunningStat::default().mean(), 0.0);
    }

    #[test]
    fn test_summary_lists_stages_metrics_and_throughput() {
        let mut logger = LogPipelineLogger::new(10);
        logger.progress(12);
        logger.timing("read", 4.0);
        logger.timing("detect", 20.0);
        logger.metric("faces", 1.0);
        logger.metric("faces", 2.0);

        let summary = logger.summary_string().unwrap();
        assert!(summary.starts_with("Monitor summary (12 frames"));
        assert!(summary.contains("read"));
        assert!(summary.contains("detect"));
        assert!(summary.contains("faces: avg 1.5"));
        assert!(summary.contains("fps"));
    }

    #[test]
    fn test_summary_stages_are_sorted() {
        let mut logger = LogPipelineLogger::new(10);
        logger.timing("read", 1.0);
        logger.timing("display", 1.0);

        let summary = logger.summary_string().unwrap();
        assert!(summary.find("display").unwrap() < summary.find("read").unwrap());
    }

    #[test]
    fn test_empty_summary_returns_none() {
        assert!(LogPipelineLogger::new(10).summary_string().is_none());
    }

    #[test]
    fn test_progress_tracks_frame_count() {
        let mut logger = LogPipelineLogger::new(3);
        for i in 1..=7 {
            logger.progress(i);
        }
        assert_eq!(logger.frames, 7);
    }

    #[test]
    fn test_zero_throttle_is_clamped() {
        assert_eq!(LogPipelineLogger::new(0).throttle_frames, 1);
        assert_eq!(LogPipelineLogger::default().throttle_frames, 100);
    }
}

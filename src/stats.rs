//! Frame latency bookkeeping
//!
//! Validation frames carry the oracle work and are not timed. The first frame
//! after them only sets the reference finish time; every later frame is
//! printed and folded into the running averages.

use satellite_simulation::FrameReport;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct FrameStats {
    /// Frames at the start of the run that are skipped
    warmup_frames: u64,
    previous_finish: Option<Instant>,
    frames: u32,
    physics_total: Duration,
    paint_total: Duration,
    frame_total: Duration,
}

fn ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

impl FrameStats {
    pub fn new(warmup_frames: u64) -> Self {
        Self {
            warmup_frames,
            previous_finish: None,
            frames: 0,
            physics_total: Duration::ZERO,
            paint_total: Duration::ZERO,
            frame_total: Duration::ZERO,
        }
    }

    pub fn record(&mut self, report: &FrameReport, finish: Instant) {
        use std::cmp::Ordering;

        match report.frame.cmp(&self.warmup_frames) {
            Ordering::Less => {}
            Ordering::Equal => {
                self.previous_finish = Some(finish);
                log::info!(
                    "Time spent on moving satellites + Time spent on space coloring : \
                     Total time in milliseconds between frames"
                );
            }
            Ordering::Greater => {
                let total = self
                    .previous_finish
                    .map(|previous| finish.duration_since(previous))
                    .unwrap_or_default();
                self.previous_finish = Some(finish);

                log::info!(
                    "Latency of this frame {:.1} + {:.1} : {:.1}ms",
                    ms(report.physics_time),
                    ms(report.paint_time),
                    ms(total)
                );

                self.frames += 1;
                self.physics_total += report.physics_time;
                self.paint_total += report.paint_time;
                self.frame_total += total;

                if let Some((physics, paint, total)) = self.averages() {
                    log::info!(
                        "Averaged over all frames: {:.1} + {:.1} : {:.1}ms",
                        ms(physics),
                        ms(paint),
                        ms(total)
                    );
                }
            }
        }
    }

    /// Mean physics, paint and frame-to-frame time over the timed frames
    pub fn averages(&self) -> Option<(Duration, Duration, Duration)> {
        if self.frames == 0 {
            return None;
        }
        Some((
            self.physics_total / self.frames,
            self.paint_total / self.frames,
            self.frame_total / self.frames,
        ))
    }

    pub fn timed_frames(&self) -> u32 {
        self.frames
    }
}

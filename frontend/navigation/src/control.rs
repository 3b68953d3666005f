use std::time::Instant;
use anyhow::Context;
use common::tag::TagObservation;
use crossbeam::channel::{Receiver, TryRecvError};
use tracing::{debug, error, info};
use crate::frame::FrameSnapshot;
use crate::motion::{Drive, MotionCommander};
use crate::state::Navigator;

/// Source of tag observations, one call per camera frame
pub trait Detector {
    /// Pixel width of the frames being analysed
    fn frame_width(&self) -> u32;

    /// Blocks until the next frame has been processed. `Ok(None)` means the
    /// source has run out of frames.
    fn detect(&mut self) -> anyhow::Result<Option<Vec<TagObservation>>>;
}

impl<T: Detector + ?Sized> Detector for &mut T {
    fn frame_width(&self) -> u32 {
        (**self).frame_width()
    }

    fn detect(&mut self) -> anyhow::Result<Option<Vec<TagObservation>>> {
        (**self).detect()
    }
}

impl<T: Detector + ?Sized> Detector for Box<T> {
    fn frame_width(&self) -> u32 {
        (**self).frame_width()
    }

    fn detect(&mut self) -> anyhow::Result<Option<Vec<TagObservation>>> {
        (**self).detect()
    }
}

/// Monotonic millisecond time source
pub trait Clock {
    fn now_ms(&mut self) -> u64;
}

/// Milliseconds since the clock was created
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        MonotonicClock {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&mut self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopExit {
    /// A shutdown was requested
    Interrupted,
    /// The detector ran out of frames
    EndOfStream,
}

/// Run the control loop until a shutdown request arrives, the detector runs
/// dry or something fails.
///
/// The motors are stopped before this returns, whichever way it returns. A
/// message on `shutdown`, or every sender hanging up, counts as a shutdown
/// request.
pub fn run<T, D, C>(detector: &mut T, mut commander: MotionCommander<D>, navigator: &mut Navigator, clock: &mut C, shutdown: &Receiver<()>) -> anyhow::Result<LoopExit>
    where
        T: Detector,
        D: Drive,
        C: Clock,
{
    let result = run_ticks(detector, &mut commander, navigator, clock, shutdown);

    commander.shutdown();

    match &result {
        Ok(exit) => info!("control loop finished: {:?}", exit),
        Err(e) => error!("control loop failed: {:?}", e),
    }

    result
}

fn run_ticks<T: Detector, D: Drive, C: Clock>(detector: &mut T, commander: &mut MotionCommander<D>, navigator: &mut Navigator, clock: &mut C, shutdown: &Receiver<()>) -> anyhow::Result<LoopExit> {
    loop {
        match shutdown.try_recv() {
            Ok(()) | Err(TryRecvError::Disconnected) => {
                info!("shutdown requested");
                return Ok(LoopExit::Interrupted);
            }
            Err(TryRecvError::Empty) => {}
        }

        let tags = match detector.detect().context("tag detection failed")? {
            Some(tags) => tags,
            None => return Ok(LoopExit::EndOfStream),
        };

        let frame = FrameSnapshot::new(tags, clock.now_ms(), detector.frame_width());
        let (left, right) = navigator.tick(&frame);
        let [left_command, right_command] = commander.apply(left, right).context("could not drive motors")?;

        info!(
            state = %navigator.state(),
            tags = frame.tags.len(),
            left = left_command.power,
            right = right_command.power,
            "tick"
        );
        debug!(
            at = frame.timestamp_ms,
            left_power = left,
            right_power = right,
            missing_frames = navigator.memory().missing_frames,
            "memory"
        );
    }
}

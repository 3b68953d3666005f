use std::io;
use std::thread;
use anyhow::Context;
use crossbeam::channel::{bounded, Receiver};
use tracing::{error, warn};

/// Process signals that ask the rover to stop
#[cfg(unix)]
pub struct Signals {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl Signals {
    /// Replaces the default handlers for SIGINT and SIGTERM. Must be called
    /// from inside a tokio runtime.
    pub fn install() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Signals {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    /// Name of the first signal to arrive
    pub async fn recv(&mut self) -> &'static str {
        tokio::select! {
            _ = self.interrupt.recv() => "SIGINT",
            _ = self.terminate.recv() => "SIGTERM",
        }
    }
}

#[cfg(windows)]
pub struct Signals {
    ctrl_c: tokio::signal::windows::CtrlC,
}

#[cfg(windows)]
impl Signals {
    pub fn install() -> io::Result<Self> {
        Ok(Signals {
            ctrl_c: tokio::signal::windows::ctrl_c()?,
        })
    }

    pub async fn recv(&mut self) -> &'static str {
        self.ctrl_c.recv().await;
        "ctrl-c"
    }
}

/// Forward SIGINT and SIGTERM into a channel the control loop polls every tick.
///
/// Only returns once the handlers are in place. If the watcher dies later its
/// sender is dropped, which the loop also treats as a shutdown request.
pub fn watch_signals() -> anyhow::Result<Receiver<()>> {
    let (tx, rx) = bounded(1);
    let (ready_tx, ready_rx) = bounded(1);

    thread::Builder::new()
        .name("Shutdown Watcher".to_owned())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(e) => {
                    error!("could not start signal runtime: {:?}", e);
                    return;
                }
            };

            let received = runtime.block_on(async {
                let mut signals = Signals::install()?;
                let _ = ready_tx.send(());
                Ok::<_, io::Error>(signals.recv().await)
            });

            match received {
                Ok(signal) => {
                    warn!(signal, "shutdown signal received");
                    let _ = tx.send(());
                }
                Err(e) => error!("could not install signal handlers: {:?}", e),
            }
        })?;

    ready_rx.recv().context("signal watcher failed to start")?;

    Ok(rx)
}

#[cfg(all(test, unix))]
mod tests {
    use std::process::{self, Command};
    use std::time::Duration;
    use common::controller::Wheel;
    use common::tag::TagObservation;
    use glam::{DVec2, DVec3};
    use navigation::{control, Detector, Drive, LoopExit, MonotonicClock, MotionCommander, NavigationConfig, Navigator};
    use super::*;

    fn send_signal(name: &str) {
        let status = Command::new("kill")
            .args([name, &process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());
    }

    #[derive(Default)]
    struct RecordingDrive(Vec<(Wheel, bool, u8)>);

    impl Drive for RecordingDrive {
        fn forward(&mut self, wheel: Wheel, power: u8) -> anyhow::Result<()> {
            self.0.push((wheel, true, power));
            Ok(())
        }

        fn backward(&mut self, wheel: Wheel, power: u8) -> anyhow::Result<()> {
            self.0.push((wheel, false, power));
            Ok(())
        }
    }

    /// A centered tag every 10ms, sends SIGTERM to this process on the third frame
    struct TerminatedCourse {
        frames: usize,
    }

    impl Detector for TerminatedCourse {
        fn frame_width(&self) -> u32 {
            640
        }

        fn detect(&mut self) -> anyhow::Result<Option<Vec<TagObservation>>> {
            self.frames += 1;
            if self.frames == 3 {
                send_signal("-TERM");
            }
            if self.frames > 500 {
                return Ok(None);
            }

            std::thread::sleep(Duration::from_millis(10));
            let tag = TagObservation::new(1, DVec2::new(320.0, 100.0), [DVec2::ZERO; 4], DVec3::new(0.0, 0.0, 1.5));
            Ok(Some(vec![tag]))
        }
    }

    #[test]
    fn sigint_requests_shutdown() {
        let shutdown = watch_signals().unwrap();
        send_signal("-INT");
        assert_eq!(shutdown.recv_timeout(Duration::from_secs(5)), Ok(()));
    }

    #[test]
    fn sigterm_stops_the_wheels_once() {
        let shutdown = watch_signals().unwrap();
        let mut drive = RecordingDrive::default();
        let mut navigator = Navigator::new(NavigationConfig::default());

        let exit = control::run(
            &mut TerminatedCourse { frames: 0 },
            MotionCommander::new(&mut drive, 127),
            &mut navigator,
            &mut MonotonicClock::new(),
            &shutdown,
        ).unwrap();

        assert_eq!(exit, LoopExit::Interrupted);

        let stops = drive.0.iter().filter(|&&(_, forward, power)| forward && power == 0).count();
        assert_eq!(stops, 2);
        assert_eq!(drive.0[drive.0.len() - 2..], [(Wheel::Left, true, 0), (Wheel::Right, true, 0)]);
    }
}

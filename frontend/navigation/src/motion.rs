use anyhow::bail;
use common::controller::{Wheel, WheelCommand};
use tracing::{error, info};

/// A differential drive that takes one direction primitive per wheel
pub trait Drive {
    fn forward(&mut self, wheel: Wheel, power: u8) -> anyhow::Result<()>;
    fn backward(&mut self, wheel: Wheel, power: u8) -> anyhow::Result<()>;
}

impl<D: Drive + ?Sized> Drive for &mut D {
    fn forward(&mut self, wheel: Wheel, power: u8) -> anyhow::Result<()> {
        (**self).forward(wheel, power)
    }

    fn backward(&mut self, wheel: Wheel, power: u8) -> anyhow::Result<()> {
        (**self).backward(wheel, power)
    }
}

impl<D: Drive + ?Sized> Drive for Box<D> {
    fn forward(&mut self, wheel: Wheel, power: u8) -> anyhow::Result<()> {
        (**self).forward(wheel, power)
    }

    fn backward(&mut self, wheel: Wheel, power: u8) -> anyhow::Result<()> {
        (**self).backward(wheel, power)
    }
}

/// Owns the drive for the lifetime of the control loop.
///
/// Dropping the commander stops both wheels, so the motors are stopped on every
/// way out of the loop, unwinding panics included.
pub struct MotionCommander<D: Drive> {
    drive: D,
    max_power: u8,
    stopped: bool,
}

impl<D: Drive> MotionCommander<D> {
    pub fn new(drive: D, max_power: u8) -> Self {
        MotionCommander {
            drive,
            max_power,
            stopped: false,
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Clamp and truncate the powers, then send them left wheel first
    pub fn apply(&mut self, left: f32, right: f32) -> anyhow::Result<[WheelCommand; 2]> {
        if self.stopped {
            bail!("drive has already been shut down");
        }

        let commands = [self.quantize(Wheel::Left, left), self.quantize(Wheel::Right, right)];
        for command in commands {
            self.send(command)?;
        }

        Ok(commands)
    }

    /// Send forward at zero to both wheels. Only the first call does anything.
    pub fn shutdown(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;

        for wheel in [Wheel::Left, Wheel::Right] {
            if let Err(e) = self.drive.forward(wheel, 0) {
                error!("could not stop {:?} wheel: {:?}", wheel, e);
            }
        }

        info!("motors stopped");
    }

    fn quantize(&self, wheel: Wheel, power: f32) -> WheelCommand {
        let max_power = self.max_power as f32;
        WheelCommand::new(wheel, power.clamp(-max_power, max_power) as i16)
    }

    fn send(&mut self, command: WheelCommand) -> anyhow::Result<()> {
        if command.is_forward() {
            self.drive.forward(command.wheel, command.magnitude())
        } else {
            self.drive.backward(command.wheel, command.magnitude())
        }
    }
}

impl<D: Drive> Drop for MotionCommander<D> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

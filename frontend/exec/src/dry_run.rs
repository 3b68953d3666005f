use common::controller::Wheel;
use navigation::Drive;
use tracing::info;

/// Stands in for the motor controller when there is no hardware attached
#[derive(Default)]
pub struct DryRunDrive;

impl Drive for DryRunDrive {
    fn forward(&mut self, wheel: Wheel, power: u8) -> anyhow::Result<()> {
        info!(?wheel, power, "forward");
        Ok(())
    }

    fn backward(&mut self, wheel: Wheel, power: u8) -> anyhow::Result<()> {
        info!(?wheel, power, "backward");
        Ok(())
    }
}

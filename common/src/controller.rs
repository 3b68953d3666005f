use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wheel {
    Left,
    Right,
}

/// Signed power for one wheel, positive is forwards
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WheelCommand {
    pub wheel: Wheel,
    pub power: i16,
}

impl WheelCommand {
    pub fn new(wheel: Wheel, power: i16) -> Self {
        WheelCommand { wheel, power }
    }

    /// Zero is sent as a forwards command
    pub fn is_forward(&self) -> bool {
        self.power >= 0
    }

    pub fn magnitude(&self) -> u8 {
        self.power.unsigned_abs().min(u8::MAX as u16) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_goes_forwards() {
        let command = WheelCommand::new(Wheel::Left, 0);
        assert!(command.is_forward());
        assert_eq!(command.magnitude(), 0);
    }

    #[test]
    fn negative_goes_backwards() {
        let command = WheelCommand::new(Wheel::Right, -45);
        assert!(!command.is_forward());
        assert_eq!(command.magnitude(), 45);
    }
}

pub mod controller;
pub mod tag;

pub const BAUD_RATE_ROBOCLAW: u32 = 38400;
pub const ROBOCLAW_ADDRESS: u8 = 0x80;

/// Largest magnitude a wheel command may carry
pub const MAX_POWER: u8 = 127;

pub const TAG_FORWARD: u32 = 1;
pub const TAG_TURN_LEFT: u32 = 2;

/// How long the turn marker may be out of sight before the pivot starts
pub const TURN_TAG_TIMEOUT_MS: u64 = 3000;
/// Percent of the half frame width a target may sit off center and still count as centered
pub const CENTER_TOLERANCE_PERCENT: f64 = 15.0;
pub const PIVOT_POWER: u8 = 30;
/// Powers smaller than this are sent as a hard zero
pub const POWER_SNAP_THRESHOLD: f32 = 0.1;
/// Tag distance (meters) that maps to full forward power
pub const MAX_TAG_DISTANCE_M: f64 = 3.0;

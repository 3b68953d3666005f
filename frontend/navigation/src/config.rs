use std::fmt::{Display, Formatter};
use std::str::FromStr;
use anyhow::bail;

/// Which observations refresh the turn marker's last seen timestamp
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LastSeenPolicy {
    /// Any visible tag counts, the turn marker does not have to be among them.
    /// This is the behavior the rover has always had.
    #[default]
    AnyTag,
    /// Only frames that contain the turn marker count
    TurnTagOnly,
}

impl Display for LastSeenPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LastSeenPolicy::AnyTag => write!(f, "any"),
            LastSeenPolicy::TurnTagOnly => write!(f, "turn"),
        }
    }
}

impl FromStr for LastSeenPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(LastSeenPolicy::AnyTag),
            "turn" => Ok(LastSeenPolicy::TurnTagOnly),
            other => bail!("unknown last seen policy {:?}, expected \"any\" or \"turn\"", other),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NavigationConfig {
    pub max_power: u8,
    pub turn_tag_id: u32,
    pub turn_timeout_ms: u64,
    pub center_tolerance_percent: f64,
    pub pivot_power: u8,
    pub snap_threshold: f32,
    pub last_seen_policy: LastSeenPolicy,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        NavigationConfig {
            max_power: common::MAX_POWER,
            turn_tag_id: common::TAG_TURN_LEFT,
            turn_timeout_ms: common::TURN_TAG_TIMEOUT_MS,
            center_tolerance_percent: common::CENTER_TOLERANCE_PERCENT,
            pivot_power: common::PIVOT_POWER,
            snap_threshold: common::POWER_SNAP_THRESHOLD,
            last_seen_policy: LastSeenPolicy::default(),
        }
    }
}

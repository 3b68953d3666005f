use std::fmt::{Display, Formatter};
use tracing::{debug, info};
use crate::config::{LastSeenPolicy, NavigationConfig};
use crate::frame::FrameSnapshot;
use crate::power;
use crate::select;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavigationState {
    /// Drive at the farthest tag in view
    #[default]
    GoFarthest,
    /// Follow the turn marker until it has been gone long enough
    GoTurn,
    /// Pivot left until a forward tag is centered
    TurnLeft,
}

impl Display for NavigationState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NavigationState::GoFarthest => write!(f, "go farthest"),
            NavigationState::GoTurn => write!(f, "go turn"),
            NavigationState::TurnLeft => write!(f, "turn left"),
        }
    }
}

/// Everything the navigator carries from one tick to the next
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ControllerMemory {
    pub state: NavigationState,
    pub left_power: f32,
    pub right_power: f32,
    /// `None` until the first qualifying frame
    pub turn_tag_last_seen_at: Option<u64>,
    /// Consecutive frames without any tag, diagnostics only
    pub missing_frames: u32,
}

impl ControllerMemory {
    pub fn powers(&self) -> (f32, f32) {
        (self.left_power, self.right_power)
    }

    fn set_powers(&mut self, (left, right): (i32, i32), max_power: u8) {
        let max_power = max_power as i32;
        self.left_power = left.clamp(-max_power, max_power) as f32;
        self.right_power = right.clamp(-max_power, max_power) as f32;
    }

    /// Coast towards a stop while there is nothing to steer at
    fn decay(&mut self) {
        self.left_power /= 2.0;
        self.right_power /= 2.0;
    }

    fn snap_to_zero(&mut self, threshold: f32) {
        if self.left_power.abs() < threshold {
            self.left_power = 0.0;
        }
        if self.right_power.abs() < threshold {
            self.right_power = 0.0;
        }
    }

    fn millis_since_seen(&self, now: u64) -> Option<u64> {
        self.turn_tag_last_seen_at.map(|seen| now.saturating_sub(seen))
    }

    fn mark_seen(&mut self, now: u64) {
        let seen = self.turn_tag_last_seen_at.map_or(now, |last| last.max(now));
        self.turn_tag_last_seen_at = Some(seen);
    }
}

/// The behavior state machine
pub struct Navigator {
    config: NavigationConfig,
    memory: ControllerMemory,
}

impl Navigator {
    pub fn new(config: NavigationConfig) -> Self {
        Navigator {
            config,
            memory: ControllerMemory::default(),
        }
    }

    pub fn memory(&self) -> &ControllerMemory {
        &self.memory
    }

    pub fn state(&self) -> NavigationState {
        self.memory.state
    }

    /// Run one frame through the state machine and return the left and right
    /// powers to send
    pub fn tick(&mut self, frame: &FrameSnapshot) -> (f32, f32) {
        let next = match self.memory.state {
            NavigationState::GoFarthest => self.go_farthest(frame),
            NavigationState::GoTurn => self.go_turn(frame),
            NavigationState::TurnLeft => self.turn_left(frame),
        };

        if next != self.memory.state {
            info!(from = %self.memory.state, to = %next, "state transition");
            self.memory.state = next;
        }

        self.track_visibility(frame);
        self.memory.snap_to_zero(self.config.snap_threshold);

        self.memory.powers()
    }

    fn go_farthest(&mut self, frame: &FrameSnapshot) -> NavigationState {
        if let Some(tag) = select::farthest(&frame.tags) {
            debug!(id = tag.id, y = tag.center.y, "steering at farthest tag");
            let powers = power::power_for_tag(tag, frame.frame_width, self.config.max_power);
            self.memory.set_powers(powers, self.config.max_power);
        } else {
            self.memory.decay();
        }

        if select::any_turn_marker(&frame.tags, self.config.turn_tag_id) {
            NavigationState::GoTurn
        } else {
            NavigationState::GoFarthest
        }
    }

    fn go_turn(&mut self, frame: &FrameSnapshot) -> NavigationState {
        let unseen_for = self.memory.millis_since_seen(frame.timestamp_ms);

        // Powers are left alone on the tick the marker times out
        if unseen_for.map_or(true, |millis| millis > self.config.turn_timeout_ms) {
            return NavigationState::TurnLeft;
        }

        if let Some(tag) = select::turn_marker(&frame.tags, self.config.turn_tag_id) {
            let powers = power::power_for_tag(tag, frame.frame_width, self.config.max_power);
            self.memory.set_powers(powers, self.config.max_power);
        } else {
            self.memory.decay();
        }

        NavigationState::GoTurn
    }

    fn turn_left(&mut self, frame: &FrameSnapshot) -> NavigationState {
        let pivot = self.config.pivot_power as i32;
        self.memory.set_powers((-pivot, pivot), self.config.max_power);

        let target = select::farthest_excluding_turn(&frame.tags, self.config.turn_tag_id);
        if let Some(tag) = target {
            let offset = power::center_offset_percent(tag, frame.frame_width);
            debug!(id = tag.id, offset, "pivot target in view");

            if offset.abs() < self.config.center_tolerance_percent {
                self.memory.set_powers((0, 0), self.config.max_power);
                return NavigationState::GoFarthest;
            }
        }

        NavigationState::TurnLeft
    }

    fn track_visibility(&mut self, frame: &FrameSnapshot) {
        if frame.is_empty() {
            self.memory.missing_frames = self.memory.missing_frames.saturating_add(1);
            return;
        }

        self.memory.missing_frames = 0;

        let seen = match self.config.last_seen_policy {
            LastSeenPolicy::AnyTag => true,
            LastSeenPolicy::TurnTagOnly => select::any_turn_marker(&frame.tags, self.config.turn_tag_id),
        };
        if seen {
            self.memory.mark_seen(frame.timestamp_ms);
        }
    }
}

//! Decision pipeline for the tag following rover.
//!
//! Every tick a [`FrameSnapshot`] goes through the [`Navigator`], which picks a
//! target tag, runs the behavior state machine and produces wheel powers. The
//! [`MotionCommander`] turns those powers into drive primitives and owns the
//! guaranteed stop. [`control::run`] ties it all to a detector and a clock.

pub mod config;
pub mod control;
pub mod frame;
pub mod motion;
pub mod power;
pub mod select;
pub mod state;

pub use config::{LastSeenPolicy, NavigationConfig};
pub use control::{Clock, Detector, LoopExit, MonotonicClock};
pub use frame::FrameSnapshot;
pub use motion::{Drive, MotionCommander};
pub use state::{ControllerMemory, NavigationState, Navigator};

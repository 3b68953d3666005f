mod dry_run;
mod replay;
mod shutdown;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use clap::Parser;
use navigation::{control, Drive, LastSeenPolicy, LoopExit, MonotonicClock, MotionCommander, NavigationConfig, Navigator};
use tracing::{error, info};
use crate::dry_run::DryRunDrive;
use crate::replay::ReplayDetector;

/// Drive the rover along a course of fiducial tags
#[derive(Parser, Debug)]
#[command(name = "tagnav")]
#[command(version)]
struct Cli {
    /// Recorded detections to play back, one JSON array of tags per line
    #[arg(long)]
    replay: PathBuf,

    /// Serial port of the motor controller. Autodetected over USB when left out
    #[arg(long, conflicts_with = "dry_run")]
    port: Option<String>,

    /// Log motor commands instead of sending them
    #[arg(long)]
    dry_run: bool,

    /// Packet serial address of the motor controller
    #[arg(long, default_value_t = common::ROBOCLAW_ADDRESS)]
    address: u8,

    /// Pixel width of the camera frames
    #[arg(long, default_value_t = 640, value_parser = clap::value_parser!(u32).range(1..))]
    frame_width: u32,

    /// Delay between replayed frames in milliseconds
    #[arg(long, default_value_t = 33)]
    frame_interval_ms: u64,

    /// Largest power sent to either wheel
    #[arg(long, default_value_t = common::MAX_POWER, value_parser = clap::value_parser!(u8).range(1..=127))]
    max_power: u8,

    /// Id of the tag that starts the left turn
    #[arg(long, default_value_t = common::TAG_TURN_LEFT)]
    turn_tag: u32,

    /// How long the turn tag may be out of view before pivoting
    #[arg(long, default_value_t = common::TURN_TAG_TIMEOUT_MS)]
    turn_timeout_ms: u64,

    /// Percent off center a new tag may be and still end the pivot
    #[arg(long, default_value_t = common::CENTER_TOLERANCE_PERCENT)]
    center_tolerance: f64,

    /// Which tags keep the turn alive: "any" visible tag or only the "turn" tag
    #[arg(long, default_value_t = LastSeenPolicy::AnyTag)]
    last_seen: LastSeenPolicy,
}

impl Cli {
    fn navigation_config(&self) -> NavigationConfig {
        NavigationConfig {
            max_power: self.max_power,
            turn_tag_id: self.turn_tag,
            turn_timeout_ms: self.turn_timeout_ms,
            center_tolerance_percent: self.center_tolerance,
            last_seen_policy: self.last_seen,
            ..NavigationConfig::default()
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(exit) => {
            info!("exiting after {:?}", exit);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("fatal: {:?}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<LoopExit> {
    let config = cli.navigation_config();
    info!("navigation config: {:?}", config);

    let drive: Box<dyn Drive> = if cli.dry_run {
        Box::new(DryRunDrive)
    } else {
        Box::new(serial::open(cli.port.as_deref(), cli.address)?)
    };
    // From here on every exit path stops the motors
    let commander = MotionCommander::new(drive, config.max_power);

    let shutdown = shutdown::watch_signals()?;
    let mut detector = ReplayDetector::open(&cli.replay, cli.frame_width, Duration::from_millis(cli.frame_interval_ms))?;
    let mut navigator = Navigator::new(config);
    let mut clock = MonotonicClock::new();

    control::run(&mut detector, commander, &mut navigator, &mut clock, &shutdown)
}

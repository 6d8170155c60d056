use anyhow::{anyhow, Context};
use config::{Config, File};
use log::{warn, LevelFilter};
use simple_logger::SimpleLogger;
use std::{
    path::{Path, PathBuf},
    process,
    time::Duration,
};
use structopt::StructOpt;
use strum::{Display, EnumString};
use tumble::{Direction, Game, GameConfig, PositionChanged};

/// Headless driver for the Tumble rolling-cube engine. Replays a scripted
/// command sequence against a game, running each animation to completion,
/// and prints every settle notification as a JSON line on stdout.
#[derive(Debug, StructOpt)]
#[structopt(name = "tumble")]
struct Opt {
    /// Path to a config file that defines the game to run. Supported
    /// formats: JSON, TOML. Omit to use the built-in default (a single
    /// 3x3 board)
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// Milliseconds of wall-clock time simulated per tick
    #[structopt(long, default_value = "16")]
    tick_ms: u64,

    /// The logging level to use while running. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,

    /// The commands to replay, in order: up/down/left/right to roll,
    /// reset to return to the starting state
    commands: Vec<ReplayCommand>,
}

/// One scripted input: a roll in some direction, or a reset.
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum ReplayCommand {
    Up,
    Down,
    Left,
    Right,
    Reset,
}

impl ReplayCommand {
    /// The roll direction for this command, or `None` for a reset.
    fn direction(self) -> Option<Direction> {
        match self {
            Self::Up => Some(Direction::Up),
            Self::Down => Some(Direction::Down),
            Self::Left => Some(Direction::Left),
            Self::Right => Some(Direction::Right),
            Self::Reset => None,
        }
    }
}

fn load_config(config_path: &Path) -> anyhow::Result<GameConfig> {
    // Load config
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

fn print_notification(notification: &PositionChanged) {
    // One settled state per line, for easy piping into other tools
    println!(
        "{}",
        serde_json::to_string(notification)
            // Panics only if the notification isn't serializable (a bug)
            .expect("error serializing notification")
    );
}

/// Tick the game until the current animation (and any follow-up level
/// transition) settles, printing each notification as it fires.
fn run_until_idle(game: &mut Game, tick: Duration) {
    while game.is_animating() {
        if let Some(notification) = game.tick(tick).settled {
            print_notification(&notification);
        }
    }
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let config = match &opt.config {
        Some(config_path) => load_config(config_path)?,
        None => GameConfig::default(),
    };
    let mut game = Game::new(config)?;
    let tick = Duration::from_millis(opt.tick_ms.max(1));

    // Listeners hear about the starting state too
    print_notification(&game.position_report());

    for command in opt.commands {
        match command.direction() {
            Some(direction) => {
                // Rejected moves are normal input timing, not errors
                if !game.request_move(direction) {
                    warn!("Move {} rejected", command);
                }
            }
            None => match game.request_reset() {
                Some(notification) => print_notification(&notification),
                None => warn!("Reset rejected"),
            },
        }
        run_until_idle(&mut game, tick);
    }

    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}

//! Tumble is a rolling-cube puzzle engine. This crate contains all the
//! core logic: grid topology, pivot-rotation kinematics and the motion
//! state machine. Presentation layers (rendering, input devices) are
//! implemented elsewhere and talk to the engine through [Game].
//!
//! ```
//! use std::time::Duration;
//! use tumble::{Direction, Game, GameConfig};
//!
//! let mut game = Game::new(GameConfig::default()).unwrap();
//! game.request_move(Direction::Right);
//! // Drive the animation forward; each tick yields a pose to draw
//! let tick = game.tick(Duration::from_millis(16));
//! println!("{:?}", tick.pose.position);
//! ```
//!
//! See [GameConfig] for details on how a game can be customized.

mod config;
mod cube;
mod game;
mod grid;
mod physics;

// Re-export these crates, because other crates in this repo need to use the
// same versions (e.g. for error downcasting at the wasm boundary)
pub use anyhow;
pub use validator;

pub use crate::{
    config::{
        GameConfig, InputAction, InputConfig, LevelConfig, SpecialCell,
    },
    cube::{CubePose, CubePosition, CubeState},
    game::{Game, PositionChanged, Tick},
    grid::{
        Direction, GridGeometry, GridPosition, GridPositionMap,
        GridPositionSet, GridStack, Level, Transition,
    },
    physics::{
        ease_in_out_cubic, RollAnimation, TransitionAnimation,
        ROLL_DURATION, TRANSITION_DURATION,
    },
};

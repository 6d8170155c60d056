//! The motion controller: a small state machine that gates input,
//! advances animations tick by tick, and commits settled states. This is
//! the main entry point for both the wasm and cli layers.

use crate::{
    config::GameConfig,
    cube::{CubePose, CubePosition, CubeState},
    grid::{Direction, GridStack},
    physics::{RollAnimation, TransitionAnimation},
};
use anyhow::Context;
use log::{debug, info};
use serde::Serialize;
use std::{mem, time::Duration};
use validator::Validate;

/// What the cube is doing right now. Input is only accepted while
/// `Idle`; an in-flight animation always runs to completion.
#[derive(Clone, Debug)]
enum Motion {
    Idle,
    Rolling(RollAnimation),
    Transitioning(TransitionAnimation),
}

/// Notification emitted every time the cube settles on a cell: the
/// committed location plus a board-notation label on 8x8 boards. Emitted
/// exactly once per settled state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PositionChanged {
    pub column: i16,
    pub row: i16,
    pub level: usize,
    /// Standard board coordinates (file `a`-`h`, rank `1`-`8` counted
    /// from the far edge). Only present on 8x8 boards.
    pub notation: Option<String>,
}

/// The result of advancing the game by one tick: the pose to draw this
/// frame, and a settle notification if an animation completed during the
/// tick.
#[derive(Clone, Debug)]
pub struct Tick {
    pub pose: CubePose,
    pub settled: Option<PositionChanged>,
}

/// A running game: static topology plus the cube's state and whatever
/// motion is in flight.
///
/// The controller is frame-driven and single-threaded: hosts call
/// [Self::tick] once per frame with the elapsed wall-clock time, and all
/// mutation happens inside that call. Progress is derived from elapsed
/// time against fixed durations, so variable frame timing never skips or
/// reorders a commit.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    stack: GridStack,
    cube: CubeState,
    motion: Motion,
}

impl Game {
    /// Initialize a game from a config. Fails fast if the config is
    /// invalid, because building a topology from a bad config would
    /// silently violate its invariants.
    pub fn new(config: GameConfig) -> anyhow::Result<Self> {
        config.validate().context("invalid config")?;
        let stack = GridStack::from_config(&config);
        let cube = CubeState::starting(&stack);
        info!(
            "Initialized game: {}x{} board, {} level(s), cube at {}",
            config.grid_size,
            config.grid_size,
            stack.len(),
            cube.location().pos,
        );
        Ok(Self {
            config,
            stack,
            cube,
            motion: Motion::Idle,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn stack(&self) -> &GridStack {
        &self.stack
    }

    /// The cube's settled location. While animating this is still the
    /// *committed* location; in-between poses never appear here.
    pub fn location(&self) -> CubePosition {
        self.cube.location()
    }

    /// The pose to draw right now: the in-flight animation sample if one
    /// is running, the settled pose otherwise.
    pub fn pose(&self) -> CubePose {
        match &self.motion {
            Motion::Idle => self.cube.pose(),
            Motion::Rolling(roll) => roll.pose(),
            Motion::Transitioning(transition) => transition.pose(),
        }
    }

    pub fn is_animating(&self) -> bool {
        !matches!(self.motion, Motion::Idle)
    }

    /// The notification describing the current settled state. Hosts
    /// should emit this once at startup; after that, [Self::tick] and
    /// [Self::request_reset] hand out each subsequent one.
    pub fn position_report(&self) -> PositionChanged {
        let location = self.cube.location();
        PositionChanged {
            column: location.pos.col,
            row: location.pos.row,
            level: location.level,
            notation: board_notation(
                self.stack.geometry().size(),
                location.pos.col,
                location.pos.row,
            ),
        }
    }

    /// Ask the cube to roll one cell. Returns whether the move was
    /// accepted. A move is silently rejected (normal player-timing
    /// behavior, not an error) when an animation is already in flight or
    /// the target cell is off the board.
    pub fn request_move(&mut self, direction: Direction) -> bool {
        if self.is_animating() {
            return false;
        }
        if !self.cube.can_roll(&self.stack, direction) {
            debug!("Rejected out-of-bounds move {:?}", direction);
            return false;
        }
        debug!("Rolling {:?} from {}", direction, self.cube.location().pos);
        self.motion = Motion::Rolling(RollAnimation::new(
            &self.stack,
            &self.cube,
            direction,
        ));
        true
    }

    /// Ask for a reset to the starting state. Accepted only while idle
    /// (like moves, reset is dropped during an animation, so an in-flight
    /// roll can never be cancelled). On success the cube snaps to the
    /// start and the settle notification for the restored state is
    /// returned; `None` means the request was dropped.
    pub fn request_reset(&mut self) -> Option<PositionChanged> {
        if self.is_animating() {
            return None;
        }
        self.cube.reset(&self.stack);
        debug!("Reset cube to {}", self.cube.location().pos);
        Some(self.position_report())
    }

    /// Advance the game by one frame's worth of wall-clock time.
    ///
    /// If an animation completes during the tick, its target state is
    /// committed, the settle notification is included in the returned
    /// [Tick], and (for rolls landing on a special cell) the follow-up
    /// level transition starts immediately with no idle frame in between.
    pub fn tick(&mut self, dt: Duration) -> Tick {
        // Take ownership of the motion so we can consume the animation on
        // completion; it's put back below if it's still running
        let motion = mem::replace(&mut self.motion, Motion::Idle);
        let settled = match motion {
            Motion::Idle => None,
            Motion::Rolling(mut roll) => {
                if roll.advance(dt) {
                    self.settle_roll(roll)
                } else {
                    self.motion = Motion::Rolling(roll);
                    None
                }
            }
            Motion::Transitioning(mut transition) => {
                if transition.advance(dt) {
                    self.cube.settle(
                        transition.target_location(),
                        transition.target_pose(),
                    );
                    Some(self.position_report())
                } else {
                    self.motion = Motion::Transitioning(transition);
                    None
                }
            }
        };
        Tick {
            pose: self.pose(),
            settled,
        }
    }

    /// Commit a finished roll, then check the landed cell for a level
    /// transition. Landing on a special cell whose polarity points off
    /// the end of the stack is a no-op.
    fn settle_roll(&mut self, roll: RollAnimation) -> Option<PositionChanged> {
        self.cube.settle(roll.target_location(), roll.target_pose());
        let location = self.cube.location();
        if let Some(transition) =
            self.stack.special_effect(location.level, location.pos)
        {
            if let Some(target_level) =
                self.stack.transition_target(location.level, transition)
            {
                debug!(
                    "Special cell at {}: transitioning {} -> {}",
                    location.pos, location.level, target_level
                );
                self.motion = Motion::Transitioning(TransitionAnimation::new(
                    &self.stack,
                    &self.cube,
                    target_level,
                ));
            }
        }
        Some(self.position_report())
    }
}

/// Board-notation label for a cell, on boards where it applies (8x8
/// only). Files run `a`-`h` left to right, ranks `1`-`8` counted from
/// the far edge, so `(0, 0)` is `a8` and `(7, 7)` is `h1`.
fn board_notation(size: u16, col: i16, row: i16) -> Option<String> {
    if size != 8 {
        return None;
    }
    let file = (b'a' + col as u8) as char;
    let rank = 8 - row;
    Some(format!("{}{}", file, rank))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_notation() {
        assert_eq!(board_notation(8, 0, 0).as_deref(), Some("a8"));
        assert_eq!(board_notation(8, 7, 7).as_deref(), Some("h1"));
        assert_eq!(board_notation(8, 4, 3).as_deref(), Some("e5"));
        // Only 8x8 boards have notation
        assert_eq!(board_notation(3, 0, 0), None);
        assert_eq!(board_notation(9, 0, 0), None);
    }
}

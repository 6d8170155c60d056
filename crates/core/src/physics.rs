//! Animation kinematics: the math that moves the cube between settled
//! states. A roll is a rigid rotation about the cell edge the cube tips
//! over, a level transition is a straight vertical slide. Both are pure
//! samplers: the caller feeds in elapsed time and reads out a pose,
//! nothing here touches the settled state.

use crate::{
    cube::{CubePose, CubePosition, CubeState},
    grid::{Direction, GridStack},
};
use nalgebra::{Point3, Unit, UnitQuaternion, Vector3};
use std::{f64::consts::FRAC_PI_2, time::Duration};

/// How long one roll takes, wall-clock.
pub const ROLL_DURATION: Duration = Duration::from_millis(300);
/// How long one level transition takes, wall-clock.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(800);

/// Cubic ease-in-out on `[0, 1]`: slow at both ends, fastest in the
/// middle. This is what gives rolls their weight; transitions stay
/// linear.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// An in-flight roll: the cube tipping 90° over one of its bottom edges
/// into the adjacent cell.
///
/// The geometry: the pivot is the midpoint of the bottom edge facing the
/// travel direction, i.e. the cube's center pushed half a cell along the
/// travel vector and half a cell down. Rotating the center around the
/// pivot by the eased angle sweeps the arc; the same rotation is
/// premultiplied onto the starting orientation so the cube's faces turn
/// with it. At full angle the swept center lands exactly on the target
/// cell, but [Self::pose] still snaps to the precomputed target so no
/// floating-point residue survives a settle.
#[derive(Clone, Debug)]
pub struct RollAnimation {
    axis: Unit<Vector3<f64>>,
    pivot: Point3<f64>,
    start: CubePose,
    target: CubePose,
    target_location: CubePosition,
    elapsed: Duration,
}

impl RollAnimation {
    /// Set up a roll from the cube's current resting state. The move must
    /// already be known to be legal (in bounds); this does no checking.
    pub fn new(
        stack: &GridStack,
        cube: &CubeState,
        direction: Direction,
    ) -> Self {
        let start = cube.pose();
        let half = stack.geometry().cube_half();
        let pivot = start.position + direction.travel_vector() * half
            - Vector3::new(0.0, half, 0.0);

        let location = cube.location();
        let target_location = CubePosition {
            level: location.level,
            pos: location.pos.adjacent(direction),
        };
        let axis = direction.roll_axis();
        let target = CubePose {
            position: stack
                .world_position(target_location.level, target_location.pos),
            // World-space rotations premultiply
            orientation: UnitQuaternion::from_axis_angle(&axis, FRAC_PI_2)
                * start.orientation,
        };

        Self {
            axis,
            pivot,
            start,
            target,
            target_location,
            elapsed: Duration::ZERO,
        }
    }

    /// Advance the animation clock. Returns true once the roll is
    /// complete (including exactly at the boundary).
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.elapsed += dt;
        self.elapsed >= ROLL_DURATION
    }

    /// Fraction of the roll's duration that has elapsed, clamped to
    /// `[0, 1]`.
    pub fn progress(&self) -> f64 {
        (self.elapsed.as_secs_f64() / ROLL_DURATION.as_secs_f64()).min(1.0)
    }

    /// Sample the cube's pose at the current progress. Progress 0 and 1
    /// return the start and target poses exactly.
    pub fn pose(&self) -> CubePose {
        let progress = self.progress();
        if progress <= 0.0 {
            return self.start;
        }
        if progress >= 1.0 {
            return self.target;
        }

        let angle = FRAC_PI_2 * ease_in_out_cubic(progress);
        let rotation = UnitQuaternion::from_axis_angle(&self.axis, angle);
        CubePose {
            position: self.pivot + rotation * (self.start.position - self.pivot),
            orientation: rotation * self.start.orientation,
        }
    }

    /// Where the cube ends up once this roll completes.
    pub fn target_location(&self) -> CubePosition {
        self.target_location
    }

    /// The exact pose the cube settles in.
    pub fn target_pose(&self) -> CubePose {
        self.target
    }
}

/// An in-flight level transition: a straight vertical slide from one
/// level's board plane to another's, same cell, no rotation. Linear by
/// design so the descent reads as mechanical rather than physical.
#[derive(Clone, Debug)]
pub struct TransitionAnimation {
    start: CubePose,
    target: CubePose,
    target_location: CubePosition,
    elapsed: Duration,
}

impl TransitionAnimation {
    /// Set up a slide from the cube's current cell to the same cell on
    /// `target_level`. The target level must exist in the stack.
    pub fn new(
        stack: &GridStack,
        cube: &CubeState,
        target_level: usize,
    ) -> Self {
        let start = cube.pose();
        let target_location = CubePosition {
            level: target_level,
            pos: cube.location().pos,
        };
        let target = CubePose {
            position: stack
                .world_position(target_level, target_location.pos),
            orientation: start.orientation,
        };
        Self {
            start,
            target,
            target_location,
            elapsed: Duration::ZERO,
        }
    }

    /// Advance the animation clock. Returns true once the slide is
    /// complete.
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.elapsed += dt;
        self.elapsed >= TRANSITION_DURATION
    }

    pub fn progress(&self) -> f64 {
        (self.elapsed.as_secs_f64() / TRANSITION_DURATION.as_secs_f64())
            .min(1.0)
    }

    /// Sample the pose: linear interpolation of position, orientation
    /// untouched. Progress 0 and 1 return the endpoints exactly.
    pub fn pose(&self) -> CubePose {
        let progress = self.progress();
        if progress <= 0.0 {
            return self.start;
        }
        if progress >= 1.0 {
            return self.target;
        }
        CubePose {
            position: self.start.position
                + (self.target.position - self.start.position) * progress,
            orientation: self.start.orientation,
        }
    }

    pub fn target_location(&self) -> CubePosition {
        self.target_location
    }

    pub fn target_pose(&self) -> CubePose {
        self.target
    }
}

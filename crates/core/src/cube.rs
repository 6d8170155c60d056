//! The authoritative state of the cube itself. Everything in here is a
//! *settled* value: while an animation is in flight the in-between poses
//! live in [crate::physics], and this state is only updated once the
//! animation completes. That way a dropped frame or an interrupted
//! animation can never leave the cube between cells.

use crate::grid::{Direction, GridPosition, GridStack};
use nalgebra::{Point3, UnitQuaternion};

/// The cube's discrete location: which cell on which level.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CubePosition {
    pub level: usize,
    pub pos: GridPosition,
}

/// A renderable snapshot of the cube: the world-space position of its
/// center and its orientation. The orientation is canonically a
/// quaternion; Euler angles can be derived for display but are never fed
/// back in, because accumulating them drifts once rotations mix axes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CubePose {
    pub position: Point3<f64>,
    pub orientation: UnitQuaternion<f64>,
}

impl CubePose {
    /// Extrinsic `(roll, pitch, yaw)` Euler angles of the orientation,
    /// for display layers that want them.
    pub fn euler_angles(&self) -> (f64, f64, f64) {
        self.orientation.euler_angles()
    }
}

/// The settled state of the cube: its location plus the pose it's resting
/// in. Mutated only through [Self::settle] and [Self::reset], both of
/// which land it exactly on a cell.
#[derive(Clone, Debug)]
pub struct CubeState {
    location: CubePosition,
    pose: CubePose,
}

impl CubeState {
    /// A cube at rest on the given cell with the identity orientation.
    pub fn at_rest(stack: &GridStack, location: CubePosition) -> Self {
        Self {
            location,
            pose: CubePose {
                position: stack.world_position(location.level, location.pos),
                orientation: UnitQuaternion::identity(),
            },
        }
    }

    /// The starting state: centered on the top level, identity
    /// orientation.
    pub fn starting(stack: &GridStack) -> Self {
        Self::at_rest(
            stack,
            CubePosition {
                level: 0,
                pos: stack.geometry().starting_position(),
            },
        )
    }

    pub fn location(&self) -> CubePosition {
        self.location
    }

    pub fn pose(&self) -> CubePose {
        self.pose
    }

    /// Can the cube roll one cell in the given direction from where it
    /// sits now?
    pub fn can_roll(&self, stack: &GridStack, direction: Direction) -> bool {
        stack.geometry().can_move(self.location.pos, direction)
    }

    /// Commit a finished animation: the cube is now at `location` in
    /// exactly `pose`. The pose comes from the animation's endpoint
    /// sample, which snaps to the exact target, so no rounding
    /// accumulates across moves.
    pub(crate) fn settle(&mut self, location: CubePosition, pose: CubePose) {
        self.location = location;
        self.pose = pose;
    }

    /// Put the cube back in the starting state.
    pub(crate) fn reset(&mut self, stack: &GridStack) {
        *self = Self::starting(stack);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use assert_approx_eq::assert_approx_eq;
    use strum::IntoEnumIterator;

    fn stack() -> GridStack {
        GridStack::from_config(&GameConfig::default())
    }

    #[test]
    fn test_starting_state() {
        let stack = stack();
        let cube = CubeState::starting(&stack);
        assert_eq!(cube.location().level, 0);
        assert_eq!(cube.location().pos, GridPosition::new(1, 1));
        // Centered on the board, resting height above the plane
        let pose = cube.pose();
        assert_approx_eq!(pose.position.x, 0.0);
        assert_approx_eq!(pose.position.y, 1.0);
        assert_approx_eq!(pose.position.z, 0.0);
        assert_eq!(pose.orientation, UnitQuaternion::identity());
    }

    #[test]
    fn test_can_roll() {
        let stack = stack();
        // From the center of a 3x3, everything is legal
        let center = CubeState::starting(&stack);
        for direction in Direction::iter() {
            assert!(center.can_roll(&stack, direction));
        }
        // From a corner, only inward rolls are
        let corner = CubeState::at_rest(
            &stack,
            CubePosition {
                level: 0,
                pos: GridPosition::new(0, 0),
            },
        );
        assert!(!corner.can_roll(&stack, Direction::Up));
        assert!(!corner.can_roll(&stack, Direction::Left));
        assert!(corner.can_roll(&stack, Direction::Down));
        assert!(corner.can_roll(&stack, Direction::Right));
    }
}

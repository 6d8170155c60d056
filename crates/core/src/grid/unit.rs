//! This sub-module contains the basic unit types of the grid coordinate
//! system: cell positions, roll directions and level-transition
//! polarities. See the parent module documentation for a description of
//! the coordinate systems.

use derive_more::Display;
use fnv::FnvBuildHasher;
use nalgebra::{Unit, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// A set of grid positions
pub type GridPositionSet = HashSet<GridPosition, FnvBuildHasher>;
/// A map of grid positions to some `T`
pub type GridPositionMap<T> = HashMap<GridPosition, T, FnvBuildHasher>;

/// A discrete cell position on one level's board. Columns grow rightward
/// (world `+x`), rows grow toward the viewer (world `+z`).
///
/// The components are stored as `i16`s. Valid positions are always in
/// `[0, size)` on both axes, but this type itself is unvalidated: an
/// out-of-bounds position is a legal *value* (e.g. the result of
/// [Self::adjacent] at a board edge), it just doesn't refer to any cell.
/// Use [GridGeometry::contains](crate::grid::GridGeometry::contains)
/// before treating one as a real cell.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "({}, {})", col, row)]
pub struct GridPosition {
    pub col: i16,
    pub row: i16,
}

impl GridPosition {
    pub const fn new(col: i16, row: i16) -> Self {
        Self { col, row }
    }

    /// Get the position one cell away in the given direction. No bounds
    /// are applied here; the result may be off the board.
    pub fn adjacent(self, direction: Direction) -> Self {
        let (dcol, drow) = direction.offset();
        Self::new(self.col + dcol, self.row + drow)
    }
}

/// The four cardinal directions the cube can roll in, as seen from the
/// standard top-down view: `Up` is away from the viewer (row − 1), `Down`
/// is toward the viewer (row + 1), `Left`/`Right` move along the columns.
#[derive(
    Copy,
    Clone,
    Debug,
    EnumIter,
    EnumString,
    StrumDisplay,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The `(column, row)` delta of a one-cell move in this direction.
    pub fn offset(self) -> (i16, i16) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// The direction that undoes this one.
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// A unit vector in world space pointing the way the cube travels for
    /// this direction.
    pub fn travel_vector(self) -> Vector3<f64> {
        let (dcol, drow) = self.offset();
        Vector3::new(dcol as f64, 0.0, drow as f64)
    }

    /// The world-space axis about which a **positive** (right-hand) 90°
    /// rotation rolls the cube in this direction. This is `ŷ × travel`:
    /// rolling right turns about −z, rolling left about +z, rolling down
    /// (toward the viewer) about +x, rolling up about −x. Four
    /// consecutive rolls about the same axis compose back to the
    /// identity orientation.
    pub fn roll_axis(self) -> Unit<Vector3<f64>> {
        let axis = match self {
            Self::Up => -Vector3::x(),
            Self::Down => Vector3::x(),
            Self::Left => Vector3::z(),
            Self::Right => -Vector3::z(),
        };
        Unit::new_unchecked(axis)
    }
}

/// The polarity of a special cell: which way it sends the cube through
/// the level stack. `Up` moves to the level above (level − 1), `Down` to
/// the level below (level + 1). Polarities that point off the end of the
/// stack are legal and simply do nothing at runtime.
#[derive(
    Copy,
    Clone,
    Debug,
    EnumString,
    StrumDisplay,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Transition {
    Up,
    Down,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_adjacent() {
        let pos = GridPosition::new(1, 1);
        assert_eq!(pos.adjacent(Direction::Up), GridPosition::new(1, 0));
        assert_eq!(pos.adjacent(Direction::Down), GridPosition::new(1, 2));
        assert_eq!(pos.adjacent(Direction::Left), GridPosition::new(0, 1));
        assert_eq!(pos.adjacent(Direction::Right), GridPosition::new(2, 1));
    }

    #[test]
    fn test_opposite() {
        for direction in Direction::iter() {
            // Opposites are symmetric and never fixed points
            assert_eq!(direction.opposite().opposite(), direction);
            assert_ne!(direction.opposite(), direction);
            // Stepping there and back lands on the original cell
            let pos = GridPosition::new(3, 3);
            assert_eq!(
                pos.adjacent(direction).adjacent(direction.opposite()),
                pos
            );
        }
    }

    #[test]
    fn test_roll_axis() {
        for direction in Direction::iter() {
            // The roll axis is always horizontal and perpendicular to
            // travel
            let axis = direction.roll_axis();
            assert_eq!(axis.y, 0.0);
            assert_eq!(axis.dot(&direction.travel_vector()), 0.0);
            // Opposite directions roll about opposite axes
            assert_eq!(
                axis.into_inner(),
                -direction.opposite().roll_axis().into_inner()
            );
        }
    }
}

//! This module holds basic types and math related to the stacked square
//! grids that the cube rolls across.
//!
//! ## Coordinate Systems
//!
//! Tumble uses two different coordinate systems:
//!
//! ### Grid Coordinates
//!
//! Grid coordinates are discrete `(column, row)` pairs that identify one
//! cell on one level's board. Both components are in `[0, size)`, with
//! `(0, 0)` at the near-left corner. Columns grow to the right (world
//! `+x`), rows grow toward the viewer (world `+z`). A full location also
//! carries a **level** index; levels are stacked vertically with level 0
//! rendered topmost.
//!
//! ### World Coordinates
//!
//! World coordinates are continuous 3D points used for rendering and
//! animation. The grid is centered on the world origin, so a cell's world
//! position is its offset from the board center times the cell size. The
//! cube's edge length equals the cell size, so its resting height is half
//! a cell above the board plane. Each level contributes a constant Y
//! origin on top of that (see [GridStack](crate::grid::GridStack)).
//!
//! Use [GridGeometry] to convert between the two systems.

mod stack;
mod unit;

pub use self::{stack::*, unit::*};

use nalgebra::Point3;

/// Pure coordinate math for a single square board, parameterized by board
/// size and cell size. This type is cheap to copy and holds no game state;
/// it only answers geometric questions (bounds, adjacency, grid↔world
/// conversion).
///
/// Constructed from a validated [GameConfig](crate::GameConfig), so the
/// parameters are guaranteed to be sane (positive size and cell size).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridGeometry {
    size: u16,
    cell_size: f64,
}

impl GridGeometry {
    pub fn new(size: u16, cell_size: f64) -> Self {
        // Config validation enforces these before we get here
        debug_assert!(size > 0, "grid size must be positive");
        debug_assert!(cell_size > 0.0, "cell size must be positive");
        Self { size, cell_size }
    }

    /// Number of cells along each edge of the board.
    pub fn size(&self) -> u16 {
        self.size
    }

    /// Edge length of one cell (and of the cube) in world units.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Half the cube's edge length. This shows up all over the rolling
    /// math: it's the resting height of the cube's center above the board
    /// plane, and the distance from the center to the pivot edge.
    pub fn cube_half(&self) -> f64 {
        self.cell_size / 2.0
    }

    /// Is the given position actually on the board?
    pub fn contains(&self, pos: GridPosition) -> bool {
        let size = self.size as i16;
        (0..size).contains(&pos.col) && (0..size).contains(&pos.row)
    }

    /// Would a move from `pos` in the given direction stay on the board?
    /// There is no wraparound; stepping off any edge is invalid.
    pub fn can_move(&self, pos: GridPosition, direction: Direction) -> bool {
        self.contains(pos.adjacent(direction))
    }

    /// The centered starting cell for the cube. For odd sizes this is the
    /// exact center; for even sizes it rounds toward the far corner.
    pub fn starting_position(&self) -> GridPosition {
        let center = (self.size / 2) as i16;
        GridPosition::new(center, center)
    }

    /// Convert a grid cell to the world-space position of a cube resting
    /// on that cell, relative to the level's board plane. The board is
    /// centered on the origin, and Y is the cube's resting height (half a
    /// cell above the plane).
    pub fn grid_to_world(&self, pos: GridPosition) -> Point3<f64> {
        let center_offset = (self.size - 1) as f64 / 2.0;
        Point3::new(
            (pos.col as f64 - center_offset) * self.cell_size,
            self.cube_half(),
            (pos.row as f64 - center_offset) * self.cell_size,
        )
    }

    /// Convert a world-space position back to the nearest grid cell. This
    /// is the rounding inverse of [Self::grid_to_world]; it's only used
    /// for diagnostics and tests, never on the animation path. The
    /// returned position is **not** guaranteed to be on the board.
    pub fn world_to_grid(&self, world: Point3<f64>) -> GridPosition {
        let center_offset = (self.size - 1) as f64 / 2.0;
        GridPosition::new(
            (world.x / self.cell_size + center_offset).round() as i16,
            (world.z / self.cell_size + center_offset).round() as i16,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn test_grid_to_world() {
        let geometry = GridGeometry::new(3, 2.0);
        // Center cell sits on the origin
        let center = geometry.grid_to_world(GridPosition::new(1, 1));
        assert_approx_eq!(center.x, 0.0);
        assert_approx_eq!(center.y, 1.0);
        assert_approx_eq!(center.z, 0.0);
        // Corners are offset by one cell in each axis
        let corner = geometry.grid_to_world(GridPosition::new(0, 2));
        assert_approx_eq!(corner.x, -2.0);
        assert_approx_eq!(corner.z, 2.0);
    }

    #[test]
    fn test_world_to_grid_round_trip() {
        let geometry = GridGeometry::new(5, 2.0);
        for col in 0..5 {
            for row in 0..5 {
                let pos = GridPosition::new(col, row);
                assert_eq!(
                    geometry.world_to_grid(geometry.grid_to_world(pos)),
                    pos
                );
            }
        }
    }

    #[test]
    fn test_bounds() {
        let geometry = GridGeometry::new(3, 2.0);
        assert!(geometry.contains(GridPosition::new(0, 0)));
        assert!(geometry.contains(GridPosition::new(2, 2)));
        assert!(!geometry.contains(GridPosition::new(-1, 0)));
        assert!(!geometry.contains(GridPosition::new(0, 3)));

        // From a corner, only half the directions are legal
        let corner = GridPosition::new(0, 0);
        assert!(!geometry.can_move(corner, Direction::Up));
        assert!(!geometry.can_move(corner, Direction::Left));
        assert!(geometry.can_move(corner, Direction::Down));
        assert!(geometry.can_move(corner, Direction::Right));

        // From the center, everything is legal
        let center = geometry.starting_position();
        for direction in Direction::iter() {
            assert!(geometry.can_move(center, direction));
        }
    }
}

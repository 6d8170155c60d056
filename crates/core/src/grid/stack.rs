//! One or more boards stacked vertically. Most games use a single level,
//! but the stack supports any number: level 0 is the **topmost** board in
//! world space and levels count downward from there. Landing on a special
//! cell moves the cube between adjacent levels.

use crate::{
    config::GameConfig,
    grid::{GridGeometry, GridPosition, GridPositionMap, Transition},
};
use nalgebra::Point3;

/// One board in the stack: a level index, a fixed world-space Y origin
/// for its board plane, and a sparse map of special cells. Immutable
/// after construction.
#[derive(Clone, Debug)]
pub struct Level {
    index: usize,
    origin_y: f64,
    special_cells: GridPositionMap<Transition>,
}

impl Level {
    /// This level's index in the stack (0 = topmost).
    pub fn index(&self) -> usize {
        self.index
    }

    /// World-space Y of this level's board plane.
    pub fn origin_y(&self) -> f64 {
        self.origin_y
    }

    /// The special cells on this level, keyed by position.
    pub fn special_cells(&self) -> &GridPositionMap<Transition> {
        &self.special_cells
    }
}

/// The full static topology of a game: shared board geometry plus an
/// ordered sequence of [Level]s separated by a constant vertical spacing.
/// Built once from a validated [GameConfig] and never modified.
#[derive(Clone, Debug)]
pub struct GridStack {
    geometry: GridGeometry,
    spacing: f64,
    levels: Vec<Level>,
}

impl GridStack {
    /// Build the stack described by the given config. The config must
    /// already be validated (see [crate::Game::new]); this constructor
    /// trusts it.
    pub fn from_config(config: &GameConfig) -> Self {
        let geometry = GridGeometry::new(config.grid_size, config.cell_size);
        let max_level = config.levels.len() - 1;
        let levels = config
            .levels
            .iter()
            .enumerate()
            .map(|(index, level_config)| Level {
                index,
                // Level 0 is topmost, so its origin is the *highest*
                origin_y: (max_level - index) as f64 * config.level_spacing,
                special_cells: level_config
                    .special_cells
                    .iter()
                    .map(|cell| (cell.position(), cell.effect))
                    .collect(),
            })
            .collect();
        Self {
            geometry,
            spacing: config.level_spacing,
            levels,
        }
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Vertical distance between adjacent board planes.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Number of levels in the stack. Always at least 1.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        false // validation guarantees at least one level
    }

    /// Index of the bottom level.
    pub fn max_level(&self) -> usize {
        self.levels.len() - 1
    }

    /// World-space position of a cube resting on the given cell of the
    /// given level: the shared grid conversion plus the level's Y origin.
    ///
    /// Panics if the level index is out of range, which indicates a bug
    /// in the caller (level indices only come from this stack).
    pub fn world_position(
        &self,
        level: usize,
        pos: GridPosition,
    ) -> Point3<f64> {
        let mut world = self.geometry.grid_to_world(pos);
        world.y += self.levels[level].origin_y;
        world
    }

    /// Look up the special-cell effect (if any) for the given cell.
    pub fn special_effect(
        &self,
        level: usize,
        pos: GridPosition,
    ) -> Option<Transition> {
        self.levels[level].special_cells.get(&pos).copied()
    }

    /// Resolve a transition polarity to the level it leads to from the
    /// given level. Returns `None` when the transition points off the end
    /// of the stack (`Up` at level 0, `Down` at the bottom); that's a
    /// clamped no-op, not an error.
    pub fn transition_target(
        &self,
        level: usize,
        transition: Transition,
    ) -> Option<usize> {
        match transition {
            Transition::Up => level.checked_sub(1),
            Transition::Down => {
                let below = level + 1;
                (below <= self.max_level()).then(|| below)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, LevelConfig, SpecialCell};
    use assert_approx_eq::assert_approx_eq;

    fn three_level_stack() -> GridStack {
        GridStack::from_config(&GameConfig {
            grid_size: 3,
            cell_size: 2.0,
            level_spacing: 6.0,
            levels: vec![
                LevelConfig::default(),
                LevelConfig {
                    special_cells: vec![SpecialCell {
                        column: 0,
                        row: 0,
                        effect: Transition::Up,
                    }],
                },
                LevelConfig::default(),
            ],
            ..GameConfig::default()
        })
    }

    #[test]
    fn test_level_origins() {
        let stack = three_level_stack();
        // Level 0 is topmost; the bottom level sits at Y=0
        assert_approx_eq!(stack.levels[0].origin_y(), 12.0);
        assert_approx_eq!(stack.levels[1].origin_y(), 6.0);
        assert_approx_eq!(stack.levels[2].origin_y(), 0.0);

        let pos = GridPosition::new(1, 1);
        let world = stack.world_position(0, pos);
        assert_approx_eq!(world.y, 13.0); // origin + resting height
    }

    #[test]
    fn test_special_effect() {
        let stack = three_level_stack();
        let corner = GridPosition::new(0, 0);
        assert_eq!(stack.special_effect(0, corner), None);
        assert_eq!(stack.special_effect(1, corner), Some(Transition::Up));
        assert_eq!(stack.special_effect(1, GridPosition::new(1, 1)), None);
    }

    #[test]
    fn test_transition_target_clamps_at_ends() {
        let stack = three_level_stack();
        assert_eq!(stack.transition_target(0, Transition::Up), None);
        assert_eq!(stack.transition_target(0, Transition::Down), Some(1));
        assert_eq!(stack.transition_target(1, Transition::Up), Some(0));
        assert_eq!(stack.transition_target(1, Transition::Down), Some(2));
        assert_eq!(stack.transition_target(2, Transition::Down), None);
    }
}

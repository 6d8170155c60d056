use crate::grid::{Direction, GridPosition, Transition};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::{Validate, ValidationError};

/// Configuration that defines one game setup: board dimensions, the level
/// stack with its special cells, and the key bindings that input layers
/// consult. Two games built from the same config are identical.
#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_game_config"))]
pub struct GameConfig {
    /// Number of cells along each edge of every board in the stack. All
    /// levels share the same dimensions.
    #[validate(range(min = 1, max = 64))]
    pub grid_size: u16,

    /// Edge length of one cell in world units. The cube's edge length is
    /// the same, so the cube exactly fills a cell. Must be positive.
    pub cell_size: f64,

    /// Vertical distance between adjacent board planes, in world units.
    /// Must be positive. Irrelevant (but still validated) for
    /// single-level games.
    pub level_spacing: f64,

    /// The level stack, topmost level first. Must contain at least one
    /// level. A level's index in this list is its level number, so
    /// transitions between levels are defined implicitly by ordering.
    #[validate(length(min = 1))]
    pub levels: Vec<LevelConfig>,

    /// Key bindings. The engine itself never reads input devices; this
    /// is carried for the input layers that feed it.
    pub input: InputConfig,
}

/// Configuration for a single level in the stack.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Cells that trigger a level transition when the cube lands on them.
    pub special_cells: Vec<SpecialCell>,
}

/// One transition-triggering cell on a level's board.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct SpecialCell {
    pub column: u16,
    pub row: u16,
    /// Which way this cell sends the cube through the stack. A polarity
    /// that points off the end of the stack is legal and does nothing.
    pub effect: Transition,
}

impl SpecialCell {
    pub fn position(&self) -> GridPosition {
        GridPosition::new(self.column as i16, self.row as i16)
    }
}

/// Key bindings consulted by input layers via [Self::action]. Keys are
/// matched by exact string comparison against whatever key identifiers
/// the host platform produces (e.g. DOM `KeyboardEvent.key` values).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Keys that request a roll, mapped to the roll direction.
    pub move_keys: HashMap<String, Direction>,

    /// Keys that request a reset to the starting state.
    pub reset_keys: Vec<String>,
}

impl InputConfig {
    /// Translate a raw key identifier into a game action, if it's bound
    /// to one.
    pub fn action(&self, key: &str) -> Option<InputAction> {
        if let Some(&direction) = self.move_keys.get(key) {
            Some(InputAction::Move(direction))
        } else if self.reset_keys.iter().any(|reset| reset == key) {
            Some(InputAction::Reset)
        } else {
            None
        }
    }
}

/// A game action produced by resolving a key binding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputAction {
    Move(Direction),
    Reset,
}

impl Default for GameConfig {
    fn default() -> Self {
        // The classic setup: a single 3x3 board with the cube starting in
        // the center
        Self {
            grid_size: 3,
            cell_size: 2.0,
            level_spacing: 6.0,
            levels: vec![LevelConfig::default()],
            input: InputConfig::default(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        let move_keys = [
            ("ArrowUp", Direction::Up),
            ("ArrowDown", Direction::Down),
            ("ArrowLeft", Direction::Left),
            ("ArrowRight", Direction::Right),
        ]
        .iter()
        .map(|&(key, direction)| (key.to_owned(), direction))
        .collect();
        Self {
            move_keys,
            reset_keys: vec!["r".to_owned(), "R".to_owned()],
        }
    }
}

/// Cross-field checks that validator's attribute rules can't express:
/// strict positivity of the world-unit dimensions, and every special
/// cell lying within the board bounds.
fn validate_game_config(config: &GameConfig) -> Result<(), ValidationError> {
    if config.cell_size <= 0.0 {
        return Err(ValidationError::new("cell_size_not_positive"));
    }
    if config.level_spacing <= 0.0 {
        return Err(ValidationError::new("level_spacing_not_positive"));
    }
    for level in &config.levels {
        for cell in &level.special_cells {
            if cell.column >= config.grid_size || cell.row >= config.grid_size
            {
                return Err(ValidationError::new("special_cell_out_of_bounds"));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_input_action_lookup() {
        let input = InputConfig::default();
        assert_eq!(
            input.action("ArrowLeft"),
            Some(InputAction::Move(Direction::Left))
        );
        assert_eq!(input.action("r"), Some(InputAction::Reset));
        assert_eq!(input.action("R"), Some(InputAction::Reset));
        assert_eq!(input.action("x"), None);
    }

    #[test]
    fn test_deserialize_defaults() {
        // An empty document should produce the default config
        let config: GameConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.grid_size, 3);
        assert_eq!(config.levels.len(), 1);
        assert!(config.levels[0].special_cells.is_empty());
    }
}

use tumble::{
    Game, GameConfig, LevelConfig, SpecialCell, Transition,
};
use validator::ValidationErrors;

/// Pull the sorted set of failed field keys out of a construction error.
fn error_fields(config: GameConfig) -> Vec<String> {
    let err = Game::new(config).unwrap_err();
    let validation_errors = err.downcast::<ValidationErrors>().unwrap();
    let mut fields = validation_errors
        .errors()
        .keys()
        .map(|field| field.to_string())
        .collect::<Vec<_>>();
    fields.sort_unstable();
    fields
}

#[test]
fn test_field_validation() {
    let config = GameConfig {
        grid_size: 0,   // invalid (no board at all)
        levels: vec![], // invalid (nowhere to put the cube)
        ..GameConfig::default()
    };
    assert_eq!(error_fields(config), vec!["grid_size", "levels"]);
}

#[test]
fn test_dimensions_must_be_positive() {
    // These are cross-field checks, so they land under the schema key
    let config = GameConfig {
        cell_size: 0.0,
        ..GameConfig::default()
    };
    assert_eq!(error_fields(config), vec!["__all__"]);

    let config = GameConfig {
        level_spacing: -1.0,
        ..GameConfig::default()
    };
    assert_eq!(error_fields(config), vec!["__all__"]);
}

#[test]
fn test_special_cells_must_be_in_bounds() {
    let config = GameConfig {
        grid_size: 3,
        levels: vec![
            LevelConfig::default(),
            LevelConfig {
                special_cells: vec![SpecialCell {
                    column: 3, // one past the edge
                    row: 0,
                    effect: Transition::Up,
                }],
            },
        ],
        ..GameConfig::default()
    };
    assert_eq!(error_fields(config), vec!["__all__"]);
}

#[test]
fn test_valid_configs_construct() {
    assert!(Game::new(GameConfig::default()).is_ok());

    // Clamped polarities (up at the top, down at the bottom) are legal
    let config = GameConfig {
        levels: vec![LevelConfig {
            special_cells: vec![
                SpecialCell {
                    column: 0,
                    row: 0,
                    effect: Transition::Up,
                },
                SpecialCell {
                    column: 2,
                    row: 2,
                    effect: Transition::Down,
                },
            ],
        }],
        ..GameConfig::default()
    };
    assert!(Game::new(config).is_ok());
}

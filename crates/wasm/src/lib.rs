//! This crate provides WebAssembly bindings for Tumble. Construct a
//! [TumbleGame] from a config object, wire your key events into
//! [TumbleGame::press_key], and call [TumbleGame::tick] from your
//! animation-frame callback; each tick hands back the pose to draw and
//! any settle notification to dispatch.
//!
//! You probably won't ever want to include this crate in another Rust
//! project. Instead, use `wasm-pack` to build this into an npm package,
//! then import that into your JS project.

mod util;

use crate::util::{to_js, PosePayload, ResultExt};
use serde::Serialize;
use std::time::Duration;
use tumble::{Game, GameConfig, InputAction, PositionChanged};
use wasm_bindgen::prelude::*;

/// Executed when the Wasm module is first loaded
#[wasm_bindgen(start)]
pub fn main() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    wasm_logger::init(wasm_logger::Config::default());
}

/// Get the default game config as a JS object.
#[wasm_bindgen]
pub fn default_game_config() -> GameConfigObject {
    to_js(&GameConfig::default())
}

/// Validate the given config and return it as a strictly typed JS object.
/// Any missing values will be populated with defaults. If the given value
/// fails to deserialize, or has any invalid values, this will fail.
#[wasm_bindgen]
pub fn validate_game_config(
    input: GameConfigObject,
) -> Result<GameConfigObject, JsValue> {
    util::validate_config(input)
}

/// One settled tick payload: the pose to draw this frame, plus the settle
/// notification if an animation completed during the tick.
#[derive(Serialize)]
struct TickPayload {
    pose: PosePayload,
    settled: Option<PositionChanged>,
}

/// A running game, owned by the JS side. All methods mutate or read the
/// single underlying engine; there is no shared state beyond this object.
#[wasm_bindgen]
pub struct TumbleGame {
    game: Game,
}

#[wasm_bindgen]
impl TumbleGame {
    /// Initialize a game from a config object. The config will be
    /// deserialized and validated, and if either of those fail this will
    /// return an error.
    #[wasm_bindgen(constructor)]
    pub fn new(config: GameConfigObject) -> Result<TumbleGame, JsValue> {
        let config = util::deserialize_config(config)?;
        let game = Game::new(config).into_js()?;
        Ok(Self { game })
    }

    /// Feed a raw key identifier (e.g. a DOM `KeyboardEvent.key`) through
    /// the config's key bindings. Returns whether the key triggered an
    /// accepted action; unbound keys and input during an animation both
    /// return false.
    pub fn press_key(&mut self, key: &str) -> bool {
        match self.game.config().input.action(key) {
            Some(InputAction::Move(direction)) => {
                self.game.request_move(direction)
            }
            Some(InputAction::Reset) => self.game.request_reset().is_some(),
            None => {
                log::debug!("Ignoring unbound key: {}", key);
                false
            }
        }
    }

    /// Request a roll by direction name (`up`/`down`/`left`/`right`),
    /// bypassing the key bindings. Returns whether the move was accepted.
    pub fn request_move(&mut self, direction: &str) -> Result<bool, JsValue> {
        let direction = direction.parse().map_err(|_| {
            JsValue::from(format!("Unknown direction: {}", direction))
        })?;
        Ok(self.game.request_move(direction))
    }

    /// Request a reset to the starting state. Returns the settle
    /// notification for the restored state, or `undefined` if the request
    /// was dropped because an animation is in flight.
    pub fn request_reset(&mut self) -> Option<PositionChangedObject> {
        self.game.request_reset().map(|report| to_js(&report))
    }

    /// Advance the game by the given number of wall-clock milliseconds
    /// (typically the delta between animation-frame timestamps).
    pub fn tick(&mut self, elapsed_ms: f64) -> TickObject {
        let dt = Duration::from_secs_f64(elapsed_ms.max(0.0) / 1000.0);
        let tick = self.game.tick(dt);
        to_js(&TickPayload {
            pose: tick.pose.into(),
            settled: tick.settled,
        })
    }

    /// The pose to draw right now, without advancing time.
    pub fn pose(&self) -> PoseObject {
        to_js(&PosePayload::from(self.game.pose()))
    }

    /// The notification describing the current settled state. Dispatch
    /// this once at startup so listeners see the initial position.
    pub fn position_report(&self) -> PositionChangedObject {
        to_js(&self.game.position_report())
    }

    pub fn is_animating(&self) -> bool {
        self.game.is_animating()
    }
}

#[wasm_bindgen(typescript_custom_section)]
const TS_APPEND_CONTENT: &'static str = r#"
/**
 * See description in the `extern "C"` section below
 */
export interface GameConfigObject {
    grid_size: number;
    cell_size: number;
    level_spacing: number;
    levels: Array<{
        special_cells: Array<{
            column: number;
            row: number;
            effect: 'up' | 'down';
        }>;
    }>;
    input: {
        move_keys: Record<string, 'up' | 'down' | 'left' | 'right'>;
        reset_keys: string[];
    };
}

/**
 * See description in the `extern "C"` section below
 */
export interface PoseObject {
    position: [number, number, number];
    orientation: [number, number, number, number];
    euler: [number, number, number];
}

/**
 * See description in the `extern "C"` section below
 */
export interface PositionChangedObject {
    column: number;
    row: number;
    level: number;
    notation: string | null;
}

/**
 * See description in the `extern "C"` section below
 */
export interface TickObject {
    pose: PoseObject;
    settled: PositionChangedObject | null;
}
"#;

#[wasm_bindgen]
extern "C" {
    /// A TS version of the [GameConfig] type from the core crate. This
    /// needs to be mapped manually because wasm-bindgen can't derive
    /// typings for the serde path. This type represents what **can be
    /// deserialized into a [GameConfig]**.
    ///
    /// **It is very important that this stays up to date with the
    /// [GameConfig] type**.
    #[wasm_bindgen(typescript_type = "GameConfigObject")]
    pub type GameConfigObject;

    /// A cube pose crossing the boundary: position, quaternion
    /// `[x, y, z, w]` and derived Euler angles.
    #[wasm_bindgen(typescript_type = "PoseObject")]
    pub type PoseObject;

    /// A settle notification as seen from JS.
    #[wasm_bindgen(typescript_type = "PositionChangedObject")]
    pub type PositionChangedObject;

    /// The result of one tick: the pose to draw, plus a settle
    /// notification if one fired.
    #[wasm_bindgen(typescript_type = "TickObject")]
    pub type TickObject;
}

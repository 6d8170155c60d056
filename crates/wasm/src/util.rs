use serde::Serialize;
use tumble::{anyhow, validator::Validate, CubePose, GameConfig};
use wasm_bindgen::{prelude::*, JsCast};

use crate::GameConfigObject;

/// An extension trait for `Result` to allow us to add custom methods
pub trait ResultExt<T, E> {
    /// Helper to convert any result to a result with a JS error value.
    fn into_js(self) -> Result<T, JsValue>;
}

impl<T> ResultExt<T, anyhow::Error> for Result<T, anyhow::Error> {
    fn into_js(self) -> Result<T, JsValue> {
        self.map_err(|error| format!("{:#}", error).into())
    }
}

/// Serialize any value into a JS object, then cast it to the given
/// strictly typed JS facade. Panics on serialization failure, which for
/// our own serializable types is a defect rather than a runtime
/// condition.
pub fn to_js<T: Serialize, J: JsCast>(value: &T) -> J {
    JsValue::from_serde(value).unwrap().unchecked_into()
}

/// Deserialize a JS object into a [GameConfig]. The input should be an
/// **object**, not a JSON string. Will return an error if deserialization
/// fails in any way.
pub fn deserialize_config(input: GameConfigObject) -> Result<GameConfig, JsValue> {
    JsValue::into_serde(&input)
        .map_err(|err| format!("Error deserializing config: {:?}", err).into())
}

/// Deserialize and validate a config, then re-serialize it back into a JS
/// object with all defaults populated.
pub fn validate_config(
    input: GameConfigObject,
) -> Result<GameConfigObject, JsValue> {
    let config = deserialize_config(input)?;
    config
        .validate()
        .map_err::<JsValue, _>(|err| format!("Invalid config: {:?}", err).into())?;
    Ok(to_js(&config))
}

/// The serializable shape of a cube pose crossing the JS boundary. The
/// quaternion is `[x, y, z, w]`; the Euler angles are derived extrinsic
/// `(roll, pitch, yaw)` for display layers that want them.
#[derive(Serialize)]
pub struct PosePayload {
    pub position: [f64; 3],
    pub orientation: [f64; 4],
    pub euler: [f64; 3],
}

impl From<CubePose> for PosePayload {
    fn from(pose: CubePose) -> Self {
        let q = pose.orientation.quaternion();
        let (roll, pitch, yaw) = pose.euler_angles();
        Self {
            position: [pose.position.x, pose.position.y, pose.position.z],
            orientation: [q.i, q.j, q.k, q.w],
            euler: [roll, pitch, yaw],
        }
    }
}

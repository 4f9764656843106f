//! Response decoding

use serde_json::Value;

use crate::error::PtvError;
use crate::models::ApiResponse;

/// Turn a raw status/body pair into a decoded response.
///
/// A non-2xx status fails with [`PtvError::Http`] before the body is looked
/// at. A 2xx body that is not a JSON object fails with [`PtvError::Decode`].
pub fn decode(status: u16, body: &[u8]) -> Result<ApiResponse, PtvError> {
    if !(200..300).contains(&status) {
        return Err(PtvError::Http {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(ApiResponse::new(map)),
        Ok(other) => Err(PtvError::Decode(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(PtvError::Decode(e.to_string())),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

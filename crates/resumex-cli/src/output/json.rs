use resumex_core::error::ResumeError;
use serde::Serialize;

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ResumeError> {
    Ok(serde_json::to_string_pretty(value)?)
}

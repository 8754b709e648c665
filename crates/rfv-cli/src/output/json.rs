use std::io;

use rfv_client::contracts::envelope::failure_from_error;
use rfv_client::{ClientError, SuccessEnvelope};
use serde::Serialize;
use serde_json::json;

const JSON_VERSION: &str = "v1";

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    serialize_json_pretty(&json!({
        "ok": true,
        "version": JSON_VERSION,
        "data": success.data,
    }))
}

/// `{ "error": { code, message, recovery_steps, details? } }`, no `ok` key.
pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    serialize_json_pretty(&failure_from_error(error))
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}

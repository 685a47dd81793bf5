//! Response envelope decoding.
//!
//! Every reply is `{"data": ..., "message": ...}`. On status 200 the payload
//! is pulled out of `data` (or a field nested in it, or the whole envelope);
//! on anything else `message` is the only thing read, so error replies never
//! have to look like success replies.

use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::api::endpoints::Payload;
use crate::error::{ClientError, Result};

#[derive(Debug, Deserialize)]
struct MessageEnvelope {
    message: String,
}

/// `auth/token` success body.
#[derive(Debug, Deserialize)]
pub(crate) struct AuthTokenBody {
    pub token: String,
    pub expires: String,
}

pub(crate) fn is_success(status: StatusCode) -> bool {
    status == StatusCode::OK
}

/// Read `message` out of a failure body.
pub(crate) fn decode_message(context: &str, body: &[u8]) -> Result<String> {
    serde_json::from_slice::<MessageEnvelope>(body)
        .map(|envelope| envelope.message)
        .map_err(|e| ClientError::decode(context, format!("error body without a readable `message`: {e}")))
}

pub(crate) fn decode_auth_body(context: &str, body: &[u8]) -> Result<AuthTokenBody> {
    serde_json::from_slice(body).map_err(|e| ClientError::decode(context, e))
}

/// Pull the payload selected by `payload` out of a success body and decode it as `T`.
pub(crate) fn decode_payload<T: DeserializeOwned>(
    context: &str,
    body: &[u8],
    payload: Payload,
) -> Result<T> {
    let envelope: Value =
        serde_json::from_slice(body).map_err(|e| ClientError::decode(context, e))?;

    let value = match payload {
        Payload::Envelope if envelope.is_object() => envelope,
        Payload::Envelope => return Err(ClientError::decode(context, "envelope is not a JSON object")),
        Payload::Data => take_field(context, envelope, "data")?,
        Payload::DataField(key) => {
            let data = take_field(context, envelope, "data")?;
            take_field(context, data, key)?
        }
    };

    serde_json::from_value(value).map_err(|e| ClientError::decode(context, e))
}

fn take_field(context: &str, value: Value, key: &str) -> Result<Value> {
    match value {
        Value::Object(mut map) => map
            .remove(key)
            .filter(|v| !v.is_null())
            .ok_or_else(|| ClientError::decode(context, format!("missing field `{key}`"))),
        _ => Err(ClientError::decode(context, format!("expected an object holding `{key}`"))),
    }
}

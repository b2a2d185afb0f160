use crate::constants::NLS_SUCCESS_STATUS;
use aisign_core::{ConfidenceScale, Error, RecognitionResult, Result, Tag, Vendor};
use http::StatusCode;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

pub(crate) const ACS_VENDOR: Vendor = Vendor::Aliyun;

/// Build the error for a failed reply.
///
/// Non-2xx statuses are transport errors, everything else is a vendor error.
/// Code and message are taken from the body when it has the ACS or NLS shape.
pub(crate) fn error_from_body(status: StatusCode, body: &[u8]) -> Error {
    let value: Option<Value> = serde_json::from_slice(body).ok();
    let field =
        |names: &[&str]| -> Option<String> { value.as_ref().and_then(|v| first_field(v, names)) };

    let code = field(&["Code", "status"]);
    let message = field(&["Message", "message", "ErrMsg"]);

    let err = if status.is_success() {
        Error::vendor_error(
            ACS_VENDOR,
            message.unwrap_or_else(|| "unexpected response shape".to_string()),
        )
    } else {
        Error::transport(message.unwrap_or_else(|| format!("request failed with {status}")))
            .with_vendor(ACS_VENDOR)
    };
    let err = err.with_status(status);
    match code {
        Some(code) => err.with_code(code),
        None => err,
    }
}

fn first_field(value: &Value, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| match value.get(*name)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn unexpected_shape(err: serde_json::Error) -> Error {
    Error::vendor_error(ACS_VENDOR, "unexpected response shape").with_source(err)
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(unexpected_shape)
}

/// Extract `Data` from an ACS reply.
pub(crate) fn parse_data(status: StatusCode, body: &[u8]) -> Result<Value> {
    let data = match serde_json::from_slice::<Value>(body) {
        Ok(mut v) if status.is_success() => v.get_mut("Data").map(Value::take),
        _ => None,
    };

    match data {
        Some(data) if !data.is_null() => Ok(data),
        _ => {
            let err = error_from_body(status, body);
            warn!("aliyun returned error: {err}");
            Err(err)
        }
    }
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct OcrData {
    blocks: Vec<OcrBlock>,
    content: Option<String>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct OcrBlock {
    text: String,
}

/// Text result from `RecognizeGeneral` data.
pub(crate) fn text_result(data: Value) -> Result<RecognitionResult> {
    let data: OcrData = decode(data)?;

    if !data.blocks.is_empty() {
        return Ok(RecognitionResult::from_lines(
            data.blocks.into_iter().map(|b| b.text),
        ));
    }
    Ok(match data.content {
        Some(content) => RecognitionResult::from_lines(content.lines()),
        None => RecognitionResult::NoText,
    })
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct TagData {
    tags: Vec<TagItem>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct TagItem {
    value: String,
    confidence: f64,
}

/// Tag result from `TaggingImage` data, confidence is on a 0-100 scale.
pub(crate) fn tag_result(data: Value) -> Result<RecognitionResult> {
    let data: TagData = decode(data)?;

    Ok(RecognitionResult::Tags(
        data.tags
            .into_iter()
            .map(|t| Tag::new(t.value, t.confidence, ConfidenceScale::Percent))
            .collect(),
    ))
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct NlsReply {
    status: i64,
    result: String,
}

/// Transcript from the NLS one-shot recognition gateway.
pub(crate) fn nls_result(status: StatusCode, body: &[u8]) -> Result<RecognitionResult> {
    let reply: Option<NlsReply> = serde_json::from_slice(body).ok();

    match reply {
        Some(reply) if status.is_success() && reply.status == NLS_SUCCESS_STATUS => {
            Ok(RecognitionResult::from_lines([reply.result]))
        }
        _ => {
            let err = error_from_body(status, body);
            warn!("aliyun nls returned error: {err}");
            Err(err)
        }
    }
}

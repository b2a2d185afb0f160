use crate::constants::SUCCESS_CODE;
use aisign_core::{ConfidenceScale, Error, RecognitionResult, Result, Tag, Vendor};
use http::StatusCode;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

pub(crate) const NETEASE_VENDOR: Vendor = Vendor::Netease;

#[derive(Debug, Deserialize)]
struct Reply {
    code: Option<i64>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    result: Value,
}

/// Extract `result` from a `{code, msg, result}` reply, `code == 200` is success.
fn parse_result<T: DeserializeOwned + Default>(status: StatusCode, body: &[u8]) -> Result<T> {
    let reply: Option<Reply> = serde_json::from_slice(body).ok();

    let err = match reply {
        Some(Reply {
            code: Some(SUCCESS_CODE),
            result,
            ..
        }) if status.is_success() => {
            if result.is_null() {
                return Ok(T::default());
            }
            return serde_json::from_value(result).map_err(|err| {
                Error::vendor_error(NETEASE_VENDOR, "unexpected response shape").with_source(err)
            });
        }
        reply => {
            let (code, msg) = match reply {
                Some(r) => (r.code, r.msg.filter(|m| !m.is_empty())),
                None => (None, None),
            };

            let err = if !status.is_success() {
                Error::transport(msg.unwrap_or_else(|| format!("request failed with {status}")))
                    .with_vendor(NETEASE_VENDOR)
            } else {
                Error::vendor_error(
                    NETEASE_VENDOR,
                    msg.unwrap_or_else(|| "unexpected response shape".to_string()),
                )
            };
            let err = err.with_status(status);
            match code {
                Some(code) => err.with_code(code.to_string()),
                None => err,
            }
        }
    };

    warn!("netease returned error: {err}");
    Err(err)
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct OcrResult {
    texts: Vec<OcrText>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct OcrText {
    content: String,
}

pub(crate) fn text_result(status: StatusCode, body: &[u8]) -> Result<RecognitionResult> {
    let result: OcrResult = parse_result(status, body)?;
    Ok(RecognitionResult::from_lines(
        result.texts.into_iter().map(|t| t.content),
    ))
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct ImageResult {
    tags: Vec<ImageTag>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct ImageTag {
    name: String,
    confidence: f64,
}

/// Tags with confidence already in `[0, 1]`.
pub(crate) fn tag_result(status: StatusCode, body: &[u8]) -> Result<RecognitionResult> {
    let result: ImageResult = parse_result(status, body)?;
    Ok(RecognitionResult::Tags(
        result
            .tags
            .into_iter()
            .map(|t| Tag::new(t.name, t.confidence, ConfidenceScale::Unit))
            .collect(),
    ))
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct AsrResult {
    text: String,
}

pub(crate) fn asr_result(status: StatusCode, body: &[u8]) -> Result<RecognitionResult> {
    let result: AsrResult = parse_result(status, body)?;
    Ok(RecognitionResult::from_lines([result.text]))
}

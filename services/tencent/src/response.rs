use crate::task::TaskStatus;
use aisign_core::{ConfidenceScale, Error, RecognitionResult, Result, Tag, Vendor};
use http::StatusCode;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

pub(crate) const TC_VENDOR: Vendor = Vendor::Tencent;

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct ErrorBody {
    code: String,
    message: String,
}

/// Extract `Response` from a Tencent Cloud API 3.0 reply.
///
/// A `Response.Error` object or a non-2xx status is an error, the latter
/// always a transport error.
pub(crate) fn parse_response(status: StatusCode, body: &[u8]) -> Result<Value> {
    let mut response = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|mut v| v.get_mut("Response").map(Value::take))
        .filter(Value::is_object);

    let vendor_error = response
        .as_mut()
        .and_then(|r| r.get_mut("Error"))
        .map(Value::take)
        .and_then(|e| serde_json::from_value::<ErrorBody>(e).ok());

    let err = match (response, vendor_error) {
        (Some(response), None) if status.is_success() => return Ok(response),
        (_, vendor_error) => {
            let (code, message) = vendor_error
                .map(|e| (Some(e.code).filter(|c| !c.is_empty()), Some(e.message)))
                .unwrap_or_default();
            let message = message.filter(|m| !m.is_empty());

            let err = if status.is_success() {
                Error::vendor_error(
                    TC_VENDOR,
                    message.unwrap_or_else(|| "unexpected response shape".to_string()),
                )
            } else {
                Error::transport(message.unwrap_or_else(|| format!("request failed with {status}")))
                    .with_vendor(TC_VENDOR)
            };
            let err = err.with_status(status);
            match code {
                Some(code) => err.with_code(code),
                None => err,
            }
        }
    };

    warn!("tencent returned error: {err}");
    Err(err)
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|err| {
        Error::vendor_error(TC_VENDOR, "unexpected response shape").with_source(err)
    })
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct OcrResponse {
    text_detections: Vec<TextDetection>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct TextDetection {
    detected_text: String,
}

/// Text result from `GeneralBasicOCR`.
pub(crate) fn text_result(response: Value) -> Result<RecognitionResult> {
    let resp: OcrResponse = decode(response)?;

    Ok(RecognitionResult::from_lines(
        resp.text_detections.into_iter().map(|d| d.detected_text),
    ))
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct LabelResponse {
    labels: Vec<Label>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct Label {
    name: String,
    confidence: f64,
}

/// Tag result from `DetectLabel`, confidence is on a 0-100 scale.
pub(crate) fn tag_result(response: Value) -> Result<RecognitionResult> {
    let resp: LabelResponse = decode(response)?;

    Ok(RecognitionResult::Tags(
        resp.labels
            .into_iter()
            .map(|l| Tag::new(l.name, l.confidence, ConfidenceScale::Percent))
            .collect(),
    ))
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct TaskResponse {
    data: Option<TaskData>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct TaskData {
    task_id: u64,
    status: Option<i64>,
    result: String,
    error_msg: String,
}

/// Task id from `CreateRecTask`.
pub(crate) fn task_id(response: Value) -> Result<u64> {
    let resp: TaskResponse = decode(response)?;

    match resp.data {
        Some(data) if data.task_id != 0 => Ok(data.task_id),
        _ => Err(Error::vendor_error(
            TC_VENDOR,
            "CreateRecTask returned no task id",
        )),
    }
}

/// Status from `DescribeTaskStatus`.
pub(crate) fn task_status(response: Value) -> Result<TaskStatus> {
    let resp: TaskResponse = decode(response)?;

    match resp.data {
        Some(TaskData {
            status: Some(status),
            result,
            error_msg,
            ..
        }) => TaskStatus::from_code(status, result, error_msg),
        _ => Err(Error::vendor_error(
            TC_VENDOR,
            "DescribeTaskStatus returned no status",
        )),
    }
}

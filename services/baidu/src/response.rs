use aisign_core::{ConfidenceScale, Error, RecognitionResult, Result, Tag, Vendor};
use http::StatusCode;
use log::warn;
use serde::Deserialize;
use serde_json::Value;

pub(crate) const BAIDU_VENDOR: Vendor = Vendor::Baidu;

/// Error fields shared by every Baidu reply.
///
/// Business APIs use `error_code`/`error_msg`, the speech API uses
/// `err_no`/`err_msg` with `0` meaning success.
#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct Envelope {
    error_code: Option<Value>,
    error_msg: Option<String>,
    err_no: Option<i64>,
    err_msg: Option<String>,
}

impl Envelope {
    fn error(&self) -> Option<(String, Option<String>)> {
        if let Some(code) = &self.error_code {
            let code = match code {
                Value::String(s) => s.clone(),
                v => v.to_string(),
            };
            return Some((code, self.error_msg.clone()));
        }
        match self.err_no {
            Some(0) | None => None,
            Some(code) => Some((code.to_string(), self.err_msg.clone())),
        }
    }
}

/// Decode a reply into `T`, mapping every failure shape to an [`Error`].
fn parse<T: for<'de> Deserialize<'de>>(status: StatusCode, body: &[u8]) -> Result<T> {
    let value: Option<Value> = serde_json::from_slice(body).ok();
    let envelope: Envelope = value
        .clone()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default();
    let reported = envelope.error();

    let err = match (value, reported) {
        (Some(value), None) if status.is_success() => {
            return serde_json::from_value(value).map_err(|err| {
                Error::vendor_error(BAIDU_VENDOR, "unexpected response shape").with_source(err)
            });
        }
        (value, reported) => {
            let (code, message) = match reported {
                Some((code, message)) => (Some(code), message.filter(|m| !m.is_empty())),
                None => (None, None),
            };

            let err = if !status.is_success() {
                Error::transport(message.unwrap_or_else(|| format!("request failed with {status}")))
                    .with_vendor(BAIDU_VENDOR)
            } else if value.is_none() {
                Error::vendor_error(BAIDU_VENDOR, "unexpected response shape")
            } else {
                Error::vendor_error(
                    BAIDU_VENDOR,
                    message.unwrap_or_else(|| "request failed".to_string()),
                )
            };
            let err = err.with_status(status);
            match code {
                Some(code) => err.with_code(code),
                None => err,
            }
        }
    };

    warn!("baidu returned error: {err}");
    Err(err)
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct OcrReply {
    words_result: Vec<Words>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct Words {
    words: String,
}

/// Text result from `general_basic` and `accurate_basic`.
pub(crate) fn text_result(status: StatusCode, body: &[u8]) -> Result<RecognitionResult> {
    let reply: OcrReply = parse(status, body)?;
    Ok(RecognitionResult::from_lines(
        reply.words_result.into_iter().map(|w| w.words),
    ))
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct ClassifyReply {
    result: Vec<Keyword>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct Keyword {
    keyword: String,
    score: f64,
}

/// Tag result from `advanced_general`, scores are already in `[0, 1]`.
pub(crate) fn tag_result(status: StatusCode, body: &[u8]) -> Result<RecognitionResult> {
    let reply: ClassifyReply = parse(status, body)?;
    Ok(RecognitionResult::Tags(
        reply
            .result
            .into_iter()
            .map(|k| Tag::new(k.keyword, k.score, ConfidenceScale::Unit))
            .collect(),
    ))
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct SpeechReply {
    result: Vec<String>,
}

/// Transcript from the speech API, the first candidate wins.
pub(crate) fn speech_result(status: StatusCode, body: &[u8]) -> Result<RecognitionResult> {
    let reply: SpeechReply = parse(status, body)?;
    Ok(RecognitionResult::from_lines(reply.result.into_iter().take(1)))
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct TranslateReply {
    result: TranslateResult,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct TranslateResult {
    trans_result: Vec<Translation>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct Translation {
    dst: String,
}

/// Translated lines from `texttrans`.
///
/// An empty `trans_result` stays an empty text, it is not the OCR no-text result.
pub(crate) fn translate_result(status: StatusCode, body: &[u8]) -> Result<RecognitionResult> {
    let reply: TranslateReply = parse(status, body)?;
    Ok(RecognitionResult::Text(
        reply.result.trans_result.into_iter().map(|t| t.dst).collect(),
    ))
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct LexerReply {
    items: Vec<LexicalItem>,
}

/// One token of a lexical analysis.
#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LexicalItem {
    /// The token text.
    pub item: String,
    /// Part of speech tag, empty for named entities.
    pub pos: String,
    /// Named entity tag, empty for ordinary words.
    pub ne: String,
    /// Basic words the token is made of.
    pub basic_words: Vec<String>,
    /// Offset of the token in the UTF-8 encoded text.
    pub byte_offset: usize,
    /// Length of the token in bytes.
    pub byte_length: usize,
}

/// Tokens from `nlp/v1/lexer`, in text order.
pub(crate) fn lexer_result(status: StatusCode, body: &[u8]) -> Result<Vec<LexicalItem>> {
    let reply: LexerReply = parse(status, body)?;
    Ok(reply.items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aisign_core::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_words_result() {
        let body = r#"{"log_id":2471272194,"words_result_num":2,"words_result":[{"words":"百度"},{"words":"智能云"}]}"#;
        assert_eq!(
            text_result(StatusCode::OK, body.as_bytes()).unwrap(),
            RecognitionResult::Text(vec!["百度".to_string(), "智能云".to_string()])
        );
    }

    #[test]
    fn test_empty_words_result() {
        let body = br#"{"log_id":1,"words_result_num":0,"words_result":[]}"#;
        assert_eq!(
            text_result(StatusCode::OK, body).unwrap(),
            RecognitionResult::NoText
        );
    }

    #[test]
    fn test_error_code_is_vendor_error() {
        let body = br#"{"error_code":110,"error_msg":"Access token invalid or no longer valid","log_id":1}"#;
        let err = text_result(StatusCode::OK, body).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Vendor);
        assert_eq!(err.code(), Some("110"));
        assert_eq!(err.message(), "Access token invalid or no longer valid");
    }

    #[test]
    fn test_speech_error() {
        let body = br#"{"err_no":3301,"err_msg":"speech quality error.","sn":"x"}"#;
        let err = speech_result(StatusCode::OK, body).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Vendor);
        assert_eq!(err.code(), Some("3301"));
    }

    #[test]
    fn test_speech_success() {
        let body = r#"{"corpus_no":"1","err_msg":"success.","err_no":0,"result":["北京科技馆。"],"sn":"x"}"#;
        assert_eq!(
            speech_result(StatusCode::OK, body.as_bytes())
                .unwrap()
                .text()
                .as_deref(),
            Some("北京科技馆。")
        );
    }

    #[test]
    fn test_tags_and_translation() {
        let tags = tag_result(
            StatusCode::OK,
            br#"{"log_id":1,"result_num":1,"result":[{"keyword":"cat","score":0.91,"root":"animal"}]}"#,
        )
        .unwrap();
        assert!((tags.tags().unwrap()[0].score - 0.91).abs() < 1e-9);

        let text = translate_result(
            StatusCode::OK,
            br#"{"result":{"from":"en","to":"zh","trans_result":[{"src":"hello","dst":"ni hao"}]},"log_id":1}"#,
        )
        .unwrap();
        assert_eq!(text.text().as_deref(), Some("ni hao"));
    }

    #[test]
    fn test_empty_translation_is_not_no_text() {
        let text = translate_result(
            StatusCode::OK,
            br#"{"result":{"from":"en","to":"zh","trans_result":[]},"log_id":1}"#,
        )
        .unwrap();
        assert_eq!(text, RecognitionResult::Text(vec![]));
        assert_eq!(text.text().as_deref(), Some(""));
    }

    #[test]
    fn test_lexer_items() {
        let body = r#"{"log_id":1,"text":"百度是一家公司","items":[{"byte_length":6,"byte_offset":0,"formal":"","item":"百度","ne":"ORG","pos":"","uri":"","loc_details":[],"basic_words":["百度"]},{"byte_length":3,"byte_offset":6,"formal":"","item":"是","ne":"","pos":"v","uri":"","loc_details":[],"basic_words":["是"]}]}"#;
        let items = lexer_result(StatusCode::OK, body.as_bytes()).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].item, "百度");
        assert_eq!(items[0].ne, "ORG");
        assert_eq!(items[1].pos, "v");
        assert_eq!(items[1].byte_offset, 6);
        assert_eq!(items[1].basic_words, vec!["是".to_string()]);
    }

    #[test]
    fn test_non_json_failure() {
        let err = text_result(StatusCode::INTERNAL_SERVER_ERROR, b"oops").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.http_status(), Some(500));

        let err = text_result(StatusCode::OK, b"oops").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Vendor);
        assert_eq!(err.code(), None);
    }
}

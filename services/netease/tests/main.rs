use aisign_core::{
    Context, ErrorKind, FileRead, HttpSend, ManualClock, RecognitionResult, Recognize, Result,
    Source,
};
use aisign_netease::{Config, NeteaseClient, StaticCredentialProvider};
use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

/// Replays one canned response and records every request.
#[derive(Debug, Clone)]
struct MockHttpSend {
    status: StatusCode,
    body: &'static str,
    requests: Arc<Mutex<Vec<(http::Uri, Bytes)>>>,
}

impl MockHttpSend {
    fn new(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            body,
            requests: Arc::default(),
        }
    }

    fn last_form(&self) -> Vec<(String, String)> {
        let requests = self.requests.lock().unwrap();
        let (_, body) = requests.last().expect("a request must be sent");
        form_urlencoded::parse(body)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (parts, body) = req.into_parts();
        self.requests.lock().unwrap().push((parts.uri, body));

        Ok(http::Response::builder()
            .status(self.status)
            .body(Bytes::from_static(self.body.as_bytes()))
            .unwrap())
    }
}

#[derive(Debug)]
struct MemoryFile;

#[async_trait]
impl FileRead for MemoryFile {
    async fn file_read(&self, _: &str) -> Result<Vec<u8>> {
        Ok(b"hi".to_vec())
    }
}

fn client(http: MockHttpSend) -> NeteaseClient {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = Context::new()
        .with_http_send(http)
        .with_file_read(MemoryFile)
        .with_clock(ManualClock::new(
            aisign_core::time::from_timestamp(1700000000).unwrap(),
        ));
    NeteaseClient::with_credential_provider(
        ctx,
        Config::default(),
        StaticCredentialProvider::new("app", "k"),
    )
}

fn value<'a>(form: &'a [(String, String)], key: &str) -> Option<&'a str> {
    form.iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[tokio::test]
async fn test_recognize_text_sends_signed_form() -> anyhow::Result<()> {
    let http = MockHttpSend::new(
        StatusCode::OK,
        r#"{"code":200,"msg":"ok","result":{"texts":[{"content":"hello"}]}}"#,
    );
    let client = client(http.clone());

    let result = client.recognize_text(&Source::from("/tmp/a.png")).await?;
    assert_eq!(result, RecognitionResult::Text(vec!["hello".to_string()]));

    let uri = http.requests.lock().unwrap()[0].0.clone();
    assert_eq!(uri.to_string(), "https://yidun.163.com/api/ocr/recognize");

    let form = http.last_form();
    let keys: Vec<_> = form.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["appId", "image", "nonce", "timestamp", "signature"]);
    assert_eq!(value(&form, "appId"), Some("app"));
    assert_eq!(value(&form, "image"), Some("aGk="));
    assert_eq!(value(&form, "timestamp"), Some("1700000000000"));

    // The signature must match the parameters as transmitted.
    let concat: String = form[..4].iter().map(|(k, v)| format!("{k}{v}")).collect();
    assert_eq!(
        value(&form, "signature"),
        Some(aisign_core::hash::hex_md5(format!("k{concat}k").as_bytes()).as_str())
    );
    Ok(())
}

#[tokio::test]
async fn test_tag_image_by_url() -> anyhow::Result<()> {
    let http = MockHttpSend::new(
        StatusCode::OK,
        r#"{"code":200,"result":{"tags":[{"name":"beach","confidence":0.66}]}}"#,
    );
    let client = client(http.clone());

    let result = client
        .tag_image(&Source::from("https://example.com/beach.jpg"))
        .await?;
    assert_eq!(result.tags().unwrap()[0].keyword, "beach");
    assert_eq!(
        value(&http.last_form(), "url"),
        Some("https://example.com/beach.jpg")
    );
    Ok(())
}

#[tokio::test]
async fn test_transcribe() -> anyhow::Result<()> {
    let http = MockHttpSend::new(
        StatusCode::OK,
        r#"{"code":200,"result":{"text":"good morning"}}"#,
    );
    let client = client(http.clone());

    let result = client.transcribe(&Source::from("/tmp/a.wav")).await?;
    assert_eq!(result.text().as_deref(), Some("good morning"));
    assert_eq!(value(&http.last_form(), "audio"), Some("aGk="));
    Ok(())
}

#[tokio::test]
async fn test_vendor_code_is_preserved() {
    let http = MockHttpSend::new(
        StatusCode::OK,
        r#"{"code":414,"msg":"signature invalid"}"#,
    );
    let client = client(http);

    let err = client
        .recognize_text(&Source::from("/tmp/a.png"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Vendor);
    assert_eq!(err.code(), Some("414"));
}

#[tokio::test]
async fn test_unsupported_operations_skip_network() {
    let http = MockHttpSend::new(StatusCode::OK, "{}");
    let client = client(http.clone());

    let err = client
        .transcribe(&Source::from("https://example.com/a.wav"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);

    let err = client.translate("hi", "en", "zh").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
    assert!(http.requests.lock().unwrap().is_empty());
}

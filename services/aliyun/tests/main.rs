use aisign_aliyun::{AliyunClient, Config, StaticCredentialProvider};
use aisign_core::{
    Context, ErrorKind, FileRead, HttpSend, ManualClock, RecognitionResult, Recognize, Result,
    Source,
};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::TimeZone;
use http::StatusCode;
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

/// A request as seen by the transport.
#[derive(Debug, Clone)]
struct Recorded {
    uri: http::Uri,
    headers: http::HeaderMap,
    body: Bytes,
}

/// Replays canned responses keyed by host and records every request.
#[derive(Debug, Clone, Default)]
struct MockHttpSend {
    routes: Arc<Vec<(&'static str, StatusCode, &'static str)>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockHttpSend {
    fn new(routes: Vec<(&'static str, StatusCode, &'static str)>) -> Self {
        Self {
            routes: Arc::new(routes),
            requests: Arc::default(),
        }
    }

    fn requests_to(&self, host: &str) -> Vec<Recorded> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.uri.host() == Some(host))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (parts, body) = req.into_parts();
        let host = parts.uri.host().unwrap_or_default().to_string();
        self.requests.lock().unwrap().push(Recorded {
            uri: parts.uri,
            headers: parts.headers,
            body,
        });

        let (_, status, body) = self
            .routes
            .iter()
            .find(|(h, _, _)| *h == host)
            .unwrap_or_else(|| panic!("no route for {host}"));
        Ok(http::Response::builder()
            .status(*status)
            .body(Bytes::from_static(body.as_bytes()))
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

fn client(http: MockHttpSend, config: Config) -> AliyunClient {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = Context::new()
        .with_http_send(http)
        .with_file_read(MemoryFile)
        .with_clock(ManualClock::new(
            chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        ));
    AliyunClient::with_credential_provider(
        ctx,
        config,
        StaticCredentialProvider::new("testid", "testsecret"),
    )
}

fn form(req: &Recorded) -> Vec<(String, String)> {
    form_urlencoded::parse(&req.body)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn field<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[tokio::test]
async fn test_recognize_text_by_url() -> anyhow::Result<()> {
    let http = MockHttpSend::new(vec![(
        "ocr.cn-shanghai.aliyuncs.com",
        StatusCode::OK,
        r#"{"RequestId":"r","Data":{"Blocks":[{"Text":"line one"},{"Text":"line two"}]}}"#,
    )]);
    let client = client(http.clone(), Config::default());

    let result = client
        .recognize_text(&Source::from("https://example.com/a.png"))
        .await?;
    assert_eq!(result.text().as_deref(), Some("line one\nline two"));

    let reqs = http.requests_to("ocr.cn-shanghai.aliyuncs.com");
    assert_eq!(reqs.len(), 1);
    let pairs = form(&reqs[0]);
    assert_eq!(field(&pairs, "Action"), Some("RecognizeGeneral"));
    assert_eq!(field(&pairs, "ImageURL"), Some("https://example.com/a.png"));
    assert_eq!(field(&pairs, "ImageContent"), None);
    assert_eq!(field(&pairs, "Timestamp"), Some("2024-01-01T00:00:00Z"));
    assert_eq!(pairs.last().map(|(k, _)| k.as_str()), Some("Signature"));

    let keys: Vec<&str> = pairs[..pairs.len() - 1]
        .iter()
        .map(|(k, _)| k.as_str())
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted, "transmitted order must be the signed order");
    Ok(())
}

#[tokio::test]
async fn test_tag_image_from_file() -> anyhow::Result<()> {
    let http = MockHttpSend::new(vec![(
        "imagerecog.cn-shanghai.aliyuncs.com",
        StatusCode::OK,
        r#"{"Data":{"Tags":[{"Value":"cat","Confidence":87.5},{"Value":"pet","Confidence":40}]}}"#,
    )]);
    let client = client(http.clone(), Config::default());

    let result = client.tag_image(&Source::from("/tmp/cat.png")).await?;
    let tags = result.tags().unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].keyword, "cat");
    assert!((tags[0].score - 0.875).abs() < 1e-9);

    let pairs = form(&http.requests_to("imagerecog.cn-shanghai.aliyuncs.com")[0]);
    assert_eq!(field(&pairs, "ImageContent"), Some("aGk="));
    assert_eq!(field(&pairs, "Version"), Some("2019-09-30"));
    Ok(())
}

#[tokio::test]
async fn test_tag_image_without_labels_is_empty() -> anyhow::Result<()> {
    let http = MockHttpSend::new(vec![(
        "imagerecog.cn-shanghai.aliyuncs.com",
        StatusCode::OK,
        r#"{"Data":{"Tags":[]}}"#,
    )]);
    let client = client(http, Config::default());

    let result = client.tag_image(&Source::from("/tmp/blank.png")).await?;
    assert_eq!(result, RecognitionResult::Tags(vec![]));
    Ok(())
}

#[tokio::test]
async fn test_transcribe_caches_nls_token() -> anyhow::Result<()> {
    let http = MockHttpSend::new(vec![
        (
            "nls-meta.cn-shanghai.aliyuncs.com",
            StatusCode::OK,
            r#"{"Token":{"Id":"nls-token-id","ExpireTime":1704153600}}"#,
        ),
        (
            "nls-gateway.cn-shanghai.aliyuncs.com",
            StatusCode::OK,
            r#"{"task_id":"t","result":"hello world","status":20000000,"message":"SUCCESS"}"#,
        ),
    ]);
    let client = client(
        http.clone(),
        Config {
            nls_app_key: Some("appkey".to_string()),
            ..Default::default()
        },
    );

    let source = Source::from("/tmp/voice.pcm");
    assert_eq!(
        client.transcribe(&source).await?.text().as_deref(),
        Some("hello world")
    );
    client.transcribe(&source).await?;

    let token_reqs = http.requests_to("nls-meta.cn-shanghai.aliyuncs.com");
    assert_eq!(token_reqs.len(), 1);
    assert_eq!(field(&form(&token_reqs[0]), "Action"), Some("CreateToken"));

    let asr = http.requests_to("nls-gateway.cn-shanghai.aliyuncs.com");
    assert_eq!(asr.len(), 2);
    assert_eq!(asr[0].headers["x-nls-token"], "nls-token-id");
    assert!(asr[0].headers["x-nls-token"].is_sensitive());
    let query = asr[0].uri.query().unwrap_or_default();
    assert!(query.contains("appkey=appkey"));
    assert!(query.contains("format=pcm"));
    assert_eq!(asr[0].body.as_ref(), b"hi");
    Ok(())
}

#[tokio::test]
async fn test_rejected_token_is_auth_error() {
    let http = MockHttpSend::new(vec![(
        "nls-meta.cn-shanghai.aliyuncs.com",
        StatusCode::BAD_REQUEST,
        r#"{"Code":"InvalidAccessKeyId.NotFound","Message":"Specified access key is not found."}"#,
    )]);
    let client = client(
        http,
        Config {
            nls_app_key: Some("appkey".to_string()),
            ..Default::default()
        },
    );

    let err = client
        .transcribe(&Source::from("/tmp/voice.wav"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Auth);
    assert_eq!(err.http_status(), Some(400));
}

#[tokio::test]
async fn test_transcribe_rejects_url_without_network() {
    let http = MockHttpSend::new(vec![]);
    let client = client(http.clone(), Config::default());

    let err = client
        .transcribe(&Source::from("https://example.com/a.wav"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
    assert!(http.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_translate_is_unsupported() {
    let http = MockHttpSend::new(vec![]);
    let client = client(http.clone(), Config::default());

    let err = client.translate("你好", "zh", "en").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
    assert!(http.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_vendor_error_is_preserved() {
    let http = MockHttpSend::new(vec![(
        "ocr.cn-shanghai.aliyuncs.com",
        StatusCode::OK,
        r#"{"Code":"InvalidImage.Content","Message":"image content is invalid"}"#,
    )]);
    let client = client(http, Config::default());

    let err = client
        .recognize_text(&Source::from("/tmp/a.png"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Vendor);
    assert_eq!(err.code(), Some("InvalidImage.Content"));
}

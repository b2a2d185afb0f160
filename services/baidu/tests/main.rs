use aisign_baidu::{BaiduClient, Config, StaticCredentialProvider};
use aisign_core::{
    Context, ErrorKind, FileRead, HttpSend, ManualClock, RecognitionResult, Recognize, Result,
    Source, Vendor,
};
use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const GRANT: &str = "/oauth/2.0/token";
const GRANTED: &str = r#"{"access_token":"24.token","expires_in":2592000,"scope":"public"}"#;

/// A request as seen by the transport.
#[derive(Debug, Clone)]
struct Recorded {
    uri: http::Uri,
    body: Bytes,
}

impl Recorded {
    fn query(&self) -> Vec<(String, String)> {
        form_urlencoded::parse(self.uri.query().unwrap_or_default().as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn query_value(&self, key: &str) -> Option<String> {
        self.query()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    fn form_value(&self, key: &str) -> Option<String> {
        form_urlencoded::parse(&self.body)
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}

/// Replays canned responses keyed by path and records every request.
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

    fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.uri.path() == path)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (parts, body) = req.into_parts();
        let path = parts.uri.path().to_string();
        self.requests.lock().unwrap().push(Recorded {
            uri: parts.uri,
            body,
        });

        let (_, status, body) = self
            .routes
            .iter()
            .find(|(p, _, _)| *p == path)
            .unwrap_or_else(|| panic!("no route for {path}"));
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

fn client(http: MockHttpSend, clock: ManualClock) -> BaiduClient {
    let _ = env_logger::builder().is_test(true).try_init();

    let ctx = Context::new()
        .with_http_send(http)
        .with_file_read(MemoryFile)
        .with_clock(clock);
    BaiduClient::with_credential_provider(
        ctx,
        Config::default(),
        StaticCredentialProvider::new("api key", "secret"),
    )
}

fn clock() -> ManualClock {
    ManualClock::new(aisign_core::time::from_timestamp(1700000000).unwrap())
}

#[tokio::test]
async fn test_token_is_granted_once_and_refreshed_after_expiry() -> anyhow::Result<()> {
    let http = MockHttpSend::new(vec![
        (GRANT, StatusCode::OK, GRANTED),
        (
            "/rest/2.0/ocr/v1/general_basic",
            StatusCode::OK,
            r#"{"log_id":1,"words_result":[{"words":"hello"}]}"#,
        ),
    ]);
    let clock = clock();
    let client = client(http.clone(), clock.clone());
    let source = Source::from("https://example.com/a.png");

    client.recognize_text(&source).await?;
    client.recognize_text(&source).await?;
    assert_eq!(http.requests_to(GRANT).len(), 1);

    // Still inside the window that ends five minutes before the vendor expiry.
    clock.advance(Duration::from_secs(2592000 - 301));
    client.recognize_text(&source).await?;
    assert_eq!(http.requests_to(GRANT).len(), 1);

    clock.advance(Duration::from_secs(2));
    client.recognize_text(&source).await?;
    assert_eq!(http.requests_to(GRANT).len(), 2);

    let grant = &http.requests_to(GRANT)[0];
    assert_eq!(
        grant.query(),
        vec![
            ("grant_type".to_string(), "client_credentials".to_string()),
            ("client_id".to_string(), "api key".to_string()),
            ("client_secret".to_string(), "secret".to_string()),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_concurrent_calls_share_one_grant() -> anyhow::Result<()> {
    let http = MockHttpSend::new(vec![
        (GRANT, StatusCode::OK, GRANTED),
        (
            "/rest/2.0/ocr/v1/general_basic",
            StatusCode::OK,
            r#"{"words_result":[]}"#,
        ),
    ]);
    let client = client(http.clone(), clock());
    let source = Source::from("https://example.com/a.png");

    let (a, b) = tokio::join!(client.recognize_text(&source), client.recognize_text(&source));
    assert_eq!(a?, RecognitionResult::NoText);
    assert_eq!(b?, RecognitionResult::NoText);
    assert_eq!(http.requests_to(GRANT).len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_rejected_grant_is_auth_error() {
    let http = MockHttpSend::new(vec![(
        GRANT,
        StatusCode::UNAUTHORIZED,
        r#"{"error":"invalid_client","error_description":"unknown client id"}"#,
    )]);
    let client = client(http.clone(), clock());

    let err = client
        .recognize_text(&Source::from("https://example.com/a.png"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Auth);
    assert_eq!(err.message(), "unknown client id");
    assert_eq!(err.code(), Some("invalid_client"));
    assert_eq!(err.vendor(), Some(Vendor::Baidu));
    assert_eq!(http.requests.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_recognize_text_accurate_from_file() -> anyhow::Result<()> {
    let http = MockHttpSend::new(vec![
        (GRANT, StatusCode::OK, GRANTED),
        (
            "/rest/2.0/ocr/v1/accurate_basic",
            StatusCode::OK,
            r#"{"words_result":[{"words":"a"},{"words":"b"}]}"#,
        ),
    ]);
    let client = client(http.clone(), clock());

    let result = client
        .recognize_text_accurate(&Source::from("/tmp/a.png"))
        .await?;
    assert_eq!(result.text().as_deref(), Some("a\nb"));

    let req = &http.requests_to("/rest/2.0/ocr/v1/accurate_basic")[0];
    assert_eq!(req.query_value("access_token").as_deref(), Some("24.token"));
    assert_eq!(req.form_value("image").as_deref(), Some("aGk="));
    assert_eq!(req.form_value("paragraph").as_deref(), Some("false"));
    Ok(())
}

#[tokio::test]
async fn test_tag_image() -> anyhow::Result<()> {
    let http = MockHttpSend::new(vec![
        (GRANT, StatusCode::OK, GRANTED),
        (
            "/rest/2.0/image-classify/v2/advanced_general",
            StatusCode::OK,
            r#"{"result_num":2,"result":[{"keyword":"cat","score":0.9},{"keyword":"pet","score":0.4}]}"#,
        ),
    ]);
    let client = client(http, clock());

    let result = client.tag_image(&Source::from("https://example.com/cat.png")).await?;
    let keywords: Vec<_> = result.tags().unwrap().iter().map(|t| t.keyword.as_str()).collect();
    assert_eq!(keywords, vec!["cat", "pet"]);
    Ok(())
}

#[tokio::test]
async fn test_transcribe_sends_token_in_body() -> anyhow::Result<()> {
    let http = MockHttpSend::new(vec![
        (GRANT, StatusCode::OK, GRANTED),
        (
            "/server_api",
            StatusCode::OK,
            r#"{"err_no":0,"err_msg":"success.","result":["hello"]}"#,
        ),
    ]);
    let client = client(http.clone(), clock());

    let result = client.transcribe(&Source::from("/tmp/a.pcm")).await?;
    assert_eq!(result.text().as_deref(), Some("hello"));

    let req = &http.requests_to("/server_api")[0];
    assert_eq!(req.uri.host(), Some("vop.baidu.com"));
    let body: Value = serde_json::from_slice(&req.body)?;
    assert_eq!(body["token"], "24.token");
    assert_eq!(body["format"], "pcm");
    assert_eq!(body["rate"], 16000);
    assert_eq!(body["dev_pid"], 1537);
    assert_eq!(body["cuid"], "siliji_app");
    assert_eq!(body["speech"], "aGk=");
    assert_eq!(body["len"], 2);
    Ok(())
}

#[tokio::test]
async fn test_transcribe_url_is_unsupported_without_network() {
    let http = MockHttpSend::new(vec![]);
    let client = client(http.clone(), clock());

    let err = client
        .transcribe(&Source::from("https://example.com/a.wav"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
    assert!(http.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_translate() -> anyhow::Result<()> {
    let http = MockHttpSend::new(vec![
        (GRANT, StatusCode::OK, GRANTED),
        (
            "/rpc/2.0/mt/texttrans/v1",
            StatusCode::OK,
            r#"{"result":{"from":"zh","to":"en","trans_result":[{"src":"你好","dst":"Hello"}]},"log_id":1}"#,
        ),
    ]);
    let client = client(http.clone(), clock());

    let result = client.translate("你好", "zh", "en").await?;
    assert_eq!(result.text().as_deref(), Some("Hello"));

    let req = &http.requests_to("/rpc/2.0/mt/texttrans/v1")[0];
    let body: Value = serde_json::from_slice(&req.body)?;
    assert_eq!(body, serde_json::json!({"q": "你好", "from": "zh", "to": "en"}));
    Ok(())
}

#[tokio::test]
async fn test_vendor_error_is_preserved() {
    let http = MockHttpSend::new(vec![
        (GRANT, StatusCode::OK, GRANTED),
        (
            "/rest/2.0/ocr/v1/general_basic",
            StatusCode::OK,
            r#"{"error_code":17,"error_msg":"Open api daily request limit reached"}"#,
        ),
    ]);
    let client = client(http, clock());

    let err = client
        .recognize_text(&Source::from("https://example.com/a.png"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Vendor);
    assert_eq!(err.code(), Some("17"));
    assert_eq!(err.message(), "Open api daily request limit reached");
}

#[tokio::test]
async fn test_lexer() -> anyhow::Result<()> {
    let http = MockHttpSend::new(vec![
        (GRANT, StatusCode::OK, GRANTED),
        (
            "/rpc/2.0/nlp/v1/lexer",
            StatusCode::OK,
            r#"{"log_id":1,"text":"百度是一家公司","items":[{"byte_length":6,"byte_offset":0,"item":"百度","ne":"ORG","pos":"","basic_words":["百度"]},{"byte_length":3,"byte_offset":6,"item":"是","ne":"","pos":"v","basic_words":["是"]}]}"#,
        ),
    ]);
    let client = client(http.clone(), clock());

    let items = client.lexer("百度是一家公司").await?;
    let words: Vec<_> = items.iter().map(|i| i.item.as_str()).collect();
    assert_eq!(words, vec!["百度", "是"]);
    assert_eq!(items[0].ne, "ORG");

    let req = &http.requests_to("/rpc/2.0/nlp/v1/lexer")[0];
    assert_eq!(req.query_value("access_token").as_deref(), Some("24.token"));
    let body: Value = serde_json::from_slice(&req.body)?;
    assert_eq!(body, serde_json::json!({"text": "百度是一家公司"}));
    Ok(())
}

#[tokio::test]
async fn test_lexer_error_code() {
    let http = MockHttpSend::new(vec![
        (GRANT, StatusCode::OK, GRANTED),
        (
            "/rpc/2.0/nlp/v1/lexer",
            StatusCode::OK,
            r#"{"error_code":282004,"error_msg":"invalid parameter(s)","log_id":1}"#,
        ),
    ]);
    let client = client(http, clock());

    let err = client.lexer("").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Vendor);
    assert_eq!(err.code(), Some("282004"));
    assert_eq!(err.message(), "invalid parameter(s)");
    assert_eq!(err.vendor(), Some(Vendor::Baidu));
}


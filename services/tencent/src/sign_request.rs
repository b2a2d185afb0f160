use crate::constants::*;
use crate::Credential;
use aisign_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use aisign_core::time::{format_date, DateTime};
use aisign_core::{Context, Error, Result, SignRequest, SigningRequest};
use async_trait::async_trait;
use http::header::{HeaderName, AUTHORIZATION, CONTENT_TYPE};
use log::debug;

/// RequestSigner that implements Tencent Cloud API 3.0 signature (TC3-HMAC-SHA256).
///
/// The service name is taken from the first label of the request host, so the
/// same signer works for `ocr`, `tiia` and `asr`. Only `content-type` and
/// `host` are signed.
#[derive(Debug, Default)]
pub struct RequestSigner {
    service: Option<String>,
}

impl RequestSigner {
    /// Create a new builder for the TC3 signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign with a fixed service name instead of deriving it from the host.
    pub fn with_service(mut self, service: &str) -> Self {
        self.service = Some(service.to_string());
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        ctx: &Context,
        req: &mut SigningRequest,
        cred: &Self::Credential,
    ) -> Result<()> {
        let now = ctx.now();

        if !req.headers.contains_key(CONTENT_TYPE) {
            req.header_insert(CONTENT_TYPE, JSON_CONTENT_TYPE, false)?;
        }
        let service = match &self.service {
            Some(service) => service.clone(),
            None => service_of(req.host())?,
        };

        let payload = req.body.to_bytes()?;
        let content_type = req.header_get_or_default(&CONTENT_TYPE)?.to_string();
        let creq = canonical_request(
            req.method.as_str(),
            &req.path,
            &req.query_string(),
            &content_type,
            req.host(),
            &payload,
        );
        debug!("calculated canonical request: {creq}");

        let scope = credential_scope(now, &service);
        let sts = string_to_sign(now, &scope, &creq);
        debug!("calculated string to sign: {sts}");

        let signature = signature(&cred.secret_key, &format_date(now), &service, &sts);
        let authorization = format!(
            "{ALGORITHM} Credential={}/{scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
            cred.secret_id
        );

        req.header_insert(AUTHORIZATION, &authorization, true)?;
        req.header_insert(
            HeaderName::from_static(X_TC_TIMESTAMP),
            &now.timestamp().to_string(),
            false,
        )?;
        if let Some(token) = &cred.security_token {
            req.header_insert(HeaderName::from_static(X_TC_TOKEN), token, true)?;
        }

        Ok(())
    }
}

/// Service name is the first DNS label: `ocr.tencentcloudapi.com` signs as `ocr`.
fn service_of(host: &str) -> Result<String> {
    match host.split('.').next() {
        Some(service) if !service.is_empty() && host.contains('.') => Ok(service.to_string()),
        _ => Err(Error::request_invalid(format!(
            "cannot derive tencent service name from host {host}"
        ))),
    }
}

/// Construct canonical request
///
/// ## Format
///
/// ```text
///   HTTPRequestMethod + '\n' +
///   CanonicalURI + '\n' +
///   CanonicalQueryString + '\n' +
///   CanonicalHeaders + '\n' +
///   SignedHeaders + '\n' +
///   HexEncode(Hash(RequestPayload))
/// ```
fn canonical_request(
    method: &str,
    path: &str,
    query: &str,
    content_type: &str,
    host: &str,
    payload: &[u8],
) -> String {
    format!(
        "{method}\n{path}\n{query}\ncontent-type:{content_type}\nhost:{host}\n\n{SIGNED_HEADERS}\n{}",
        hex_sha256(payload)
    )
}

fn credential_scope(now: DateTime, service: &str) -> String {
    format!("{}/{service}/tc3_request", format_date(now))
}

fn string_to_sign(now: DateTime, scope: &str, canonical_request: &str) -> String {
    format!(
        "{ALGORITHM}\n{}\n{scope}\n{}",
        now.timestamp(),
        hex_sha256(canonical_request.as_bytes())
    )
}

/// `SecretDate = HMAC("TC3" + key, date)`, then service, then `tc3_request`.
fn signature(secret_key: &str, date: &str, service: &str, string_to_sign: &str) -> String {
    let key = hmac_sha256(format!("TC3{secret_key}").as_bytes(), date.as_bytes());
    let key = hmac_sha256(&key, service.as_bytes());
    let key = hmac_sha256(&key, b"tc3_request");

    hex_hmac_sha256(&key, string_to_sign.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aisign_core::time::from_timestamp;
    use aisign_core::{Body, ManualClock};
    use http::Method;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    const PAYLOAD: &str = r#"{"ImageUrl":"https://example.com/a.png"}"#;
    const SIGNATURE: &str = "6c649847042a3e0132b619c77e617b094fecda813831003f19230cfe56e76b4c";

    fn golden_sts(date: &str, service: &str, payload: &str) -> String {
        let creq = canonical_request(
            "POST",
            "/",
            "",
            JSON_CONTENT_TYPE,
            "ocr.tencentcloudapi.com",
            payload.as_bytes(),
        );
        let now = from_timestamp(1700000000).unwrap();
        string_to_sign(now, &format!("{date}/{service}/tc3_request"), &creq)
    }

    #[test]
    fn test_string_to_sign() {
        assert_eq!(
            hex_sha256(PAYLOAD.as_bytes()),
            "c174a0e08e45af255fd8aadc1d99b7b441fd2a3096470454054877fc06e4d16b"
        );
        assert_eq!(
            golden_sts("2023-11-14", "ocr", PAYLOAD),
            "TC3-HMAC-SHA256\n1700000000\n2023-11-14/ocr/tc3_request\n\
             0b166e89a1f629e2433bf95924e7940211e7581e11e268674436bd6ea506bd68"
        );
    }

    #[test_case("S", "2023-11-14", "ocr", PAYLOAD, SIGNATURE; "golden")]
    #[test_case("S2", "2023-11-14", "ocr", PAYLOAD, "b1615a566b4f78a74f89be360a0f20d8595cb8e946f9cd6c1b73d8e205b214cf"; "other secret")]
    #[test_case("S", "2023-11-14", "tiia", PAYLOAD, "c5a70528e81bd836b19bddb6b85a4566d33659962568e48f02306d0d434de495"; "other service")]
    #[test_case("S", "2023-11-15", "ocr", PAYLOAD, "f88d254dc5a1981ba82f41997c0e1a10e606613fff7d48a3a4aec5ba1876227f"; "other date")]
    #[test_case("S", "2023-11-14", "ocr", "{}", "c92732368128f5c7f4786027da6c62c761f410a1ba89d926039c737dbc48cb7c"; "other payload")]
    fn test_signature(secret: &str, date: &str, service: &str, payload: &str, expected: &str) {
        let sts = golden_sts(date, service, payload);
        assert_eq!(signature(secret, date, service, &sts), expected);
    }

    #[test_case("ocr.tencentcloudapi.com", Some("ocr"); "ocr")]
    #[test_case("asr.ap-shanghai.tencentcloudapi.com", Some("asr"); "regional")]
    #[test_case("localhost", None; "no dot")]
    fn test_service_of(host: &str, expected: Option<&str>) {
        assert_eq!(service_of(host).ok().as_deref(), expected);
    }

    #[tokio::test]
    async fn test_sign_request() -> anyhow::Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let ctx = Context::new().with_clock(ManualClock::new(from_timestamp(1700000000)?));
        let mut req = SigningRequest::new(Method::POST, "https://ocr.tencentcloudapi.com/")?
            .with_body(Body::Json(serde_json::json!({
                "ImageUrl": "https://example.com/a.png"
            })));
        let cred = Credential {
            secret_id: "AKIDEXAMPLE".to_string(),
            secret_key: "S".to_string(),
            security_token: Some("session".to_string()),
        };

        RequestSigner::new()
            .sign_request(&ctx, &mut req, &cred)
            .await?;

        assert_eq!(
            req.headers[AUTHORIZATION],
            format!(
                "TC3-HMAC-SHA256 Credential=AKIDEXAMPLE/2023-11-14/ocr/tc3_request, \
                 SignedHeaders=content-type;host, Signature={SIGNATURE}"
            )
        );
        assert!(req.headers[AUTHORIZATION].is_sensitive());
        assert_eq!(req.headers[X_TC_TIMESTAMP], "1700000000");
        assert_eq!(req.headers[X_TC_TOKEN], "session");
        assert!(req.headers[X_TC_TOKEN].is_sensitive());
        assert_eq!(req.headers[CONTENT_TYPE], JSON_CONTENT_TYPE);
        Ok(())
    }

    #[tokio::test]
    async fn test_pinned_service_ignores_host() -> anyhow::Result<()> {
        let ctx = Context::new().with_clock(ManualClock::new(from_timestamp(1700000000)?));
        let mut req = SigningRequest::new(Method::POST, "http://localhost:9000/")?
            .with_body(Body::Json(serde_json::json!({})));
        let cred = Credential {
            secret_id: "AKIDEXAMPLE".to_string(),
            secret_key: "S".to_string(),
            security_token: None,
        };

        assert!(RequestSigner::new()
            .sign_request(&ctx, &mut req, &cred)
            .await
            .is_err());

        RequestSigner::new()
            .with_service("asr")
            .sign_request(&ctx, &mut req, &cred)
            .await?;
        let authorization = req.headers[AUTHORIZATION].to_str()?;
        assert!(authorization.contains("/2023-11-14/asr/tc3_request"));
        assert!(!req.headers.contains_key(X_TC_TOKEN));
        Ok(())
    }
}

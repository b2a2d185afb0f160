use crate::constants::*;
use crate::response::{error_from_body, ACS_VENDOR};
use crate::Credential;
use aisign_core::time::{from_timestamp, DateTime};
use aisign_core::utils::Redact;
use aisign_core::{
    Body, Context, Error, ProvideCredential, Result, SignRequest, Signer, SigningCredential,
    SigningRequest,
};
use async_trait::async_trait;
use http::header::HeaderName;
use log::{debug, warn};
use serde::Deserialize;
use std::fmt::{Debug, Formatter};

/// Tokens are dropped this long before the advertised expiry.
const EXPIRY_MARGIN_SECS: i64 = 300;

/// Access token of the NLS speech gateway.
#[derive(Clone)]
pub struct NlsToken {
    /// Token id sent as `X-NLS-Token`.
    pub id: String,
    /// Instant after which the token is no longer used.
    ///
    /// Already includes the safety margin.
    pub expires_at: DateTime,
}

impl Debug for NlsToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NlsToken")
            .field("id", &Redact::from(&self.id))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl SigningCredential for NlsToken {
    fn is_valid(&self, now: DateTime) -> bool {
        !self.id.is_empty() && now < self.expires_at
    }
}

/// Loads NLS tokens through the ACS signed `CreateToken` action.
#[derive(Debug)]
pub struct NlsTokenProvider {
    signer: Signer<Credential>,
    endpoint: String,
    region: String,
}

impl NlsTokenProvider {
    /// Create a provider that signs `CreateToken` with the given ACS signer.
    pub fn new(signer: Signer<Credential>, endpoint: &str, region: &str) -> Self {
        Self {
            signer,
            endpoint: endpoint.to_string(),
            region: region.to_string(),
        }
    }
}

#[async_trait]
impl ProvideCredential for NlsTokenProvider {
    type Credential = NlsToken;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let mut req = SigningRequest::new(http::Method::POST, &self.endpoint)?.with_body(
            Body::Form(vec![
                ("Action".to_string(), "CreateToken".to_string()),
                ("RegionId".to_string(), self.region.clone()),
                ("Version".to_string(), NLS_META_VERSION.to_string()),
            ]),
        );
        self.signer
            .sign(&mut req)
            .await
            .map_err(|e| e.with_vendor(ACS_VENDOR))?;

        let resp = ctx
            .http_send(req.into_http()?)
            .await
            .map_err(|e| e.with_vendor(ACS_VENDOR))?;
        let (status, body) = (resp.status(), resp.body());

        let parsed: Option<CreateTokenResponse> = serde_json::from_slice(body).ok();
        let token = match parsed.and_then(|v| v.token) {
            Some(token) if status.is_success() && !token.id.is_empty() => token,
            _ => {
                let err = error_from_body(status, body);
                warn!("aliyun CreateToken rejected: {err}");
                return Err(Error::auth(format!("CreateToken rejected: {}", err.message()))
                    .with_vendor(ACS_VENDOR)
                    .with_status(status)
                    .with_source(err));
            }
        };

        let expires_at =
            from_timestamp(token.expire_time)? - chrono::TimeDelta::seconds(EXPIRY_MARGIN_SECS);
        debug!("aliyun nls token loaded, usable until {expires_at}");

        Ok(Some(NlsToken {
            id: token.id,
            expires_at,
        }))
    }
}

/// Attaches the NLS token header to gateway requests.
#[derive(Debug, Default)]
pub struct NlsTokenSigner;

#[async_trait]
impl SignRequest for NlsTokenSigner {
    type Credential = NlsToken;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut SigningRequest,
        token: &Self::Credential,
    ) -> Result<()> {
        req.header_insert(HeaderName::from_static(X_NLS_TOKEN), &token.id, true)
    }
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct CreateTokenResponse {
    token: Option<TokenBody>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct TokenBody {
    id: String,
    expire_time: i64,
}

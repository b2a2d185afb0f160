use crate::constants::DEFAULT_TOKEN_TTL_SECS;
use crate::response::BAIDU_VENDOR;
use crate::{Credential, Token};
use aisign_core::{Context, Error, ProvideCredential, Result, SigningRequest};
use async_trait::async_trait;
use chrono::TimeDelta;
use http::Method;
use log::{debug, warn};
use serde::Deserialize;
use std::sync::Arc;

/// Tokens are dropped this long before the advertised expiry.
const EXPIRY_MARGIN_SECS: i64 = 300;

/// ClientCredentialsProvider exchanges the key pair for a bearer token.
///
/// The grant is `POST {endpoint}?grant_type=client_credentials&client_id=..&client_secret=..`.
/// Wrap it in a [`aisign_core::Signer`] to cache the token, every call of
/// `provide_credential` performs one grant.
#[derive(Debug)]
pub struct ClientCredentialsProvider {
    loader: Arc<dyn ProvideCredential<Credential = Credential>>,
    endpoint: String,
}

impl ClientCredentialsProvider {
    /// Create a provider that loads the key pair from `loader`.
    pub fn new(loader: impl ProvideCredential<Credential = Credential>, endpoint: &str) -> Self {
        Self {
            loader: Arc::new(loader),
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl ProvideCredential for ClientCredentialsProvider {
    type Credential = Token;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let Some(cred) = self.loader.provide_credential(ctx).await? else {
            return Err(
                Error::auth("baidu api key and secret key are not configured")
                    .with_vendor(BAIDU_VENDOR),
            );
        };

        let mut req = SigningRequest::new(Method::POST, &self.endpoint)?;
        req.query_push("grant_type", "client_credentials");
        req.query_push("client_id", cred.client_id);
        req.query_push("client_secret", cred.client_secret);

        let issued_at = ctx.now();
        let resp = ctx
            .http_send(req.into_http()?)
            .await
            .map_err(|e| e.with_vendor(BAIDU_VENDOR))?;
        let status = resp.status();

        let grant: GrantResponse = serde_json::from_slice(resp.body()).unwrap_or_default();
        let value = match grant.access_token {
            Some(value) if status.is_success() && !value.is_empty() => value,
            _ => {
                let description = grant
                    .error_description
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| format!("token grant failed with {status}"));
                warn!("baidu token grant rejected: {description}");

                let err = Error::auth(description)
                    .with_vendor(BAIDU_VENDOR)
                    .with_status(status);
                return Err(match grant.error {
                    Some(code) => err.with_code(code),
                    None => err,
                });
            }
        };

        let ttl = grant.expires_in.unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        let expires_at = TimeDelta::try_seconds(ttl.saturating_sub(EXPIRY_MARGIN_SECS))
            .and_then(|d| issued_at.checked_add_signed(d))
            .ok_or_else(|| {
                Error::auth(format!("token lifetime {ttl} is out of range")).with_vendor(BAIDU_VENDOR)
            })?;
        debug!("baidu access token granted, usable until {expires_at}");

        Ok(Some(Token {
            value,
            issued_at,
            expires_at,
        }))
    }
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct GrantResponse {
    access_token: Option<String>,
    expires_in: Option<i64>,
    error: Option<String>,
    error_description: Option<String>,
}

use crate::constants::*;
use crate::Credential;
use aisign_core::hash::base64_hmac_sha1;
use aisign_core::time::{format_iso8601, DateTime};
use aisign_core::utils::percent_encode;
use aisign_core::{Context, Result, SignRequest, SigningRequest};
use async_trait::async_trait;
use http::header::{HeaderName, ACCEPT};
use http::Method;
use log::debug;

/// Common parameters owned by the signer. They are replaced on every signing.
const SIGNED_PARAMS: &[&str] = &[
    "AccessKeyId",
    "Format",
    "Signature",
    "SignatureMethod",
    "SignatureNonce",
    "SignatureVersion",
    "Timestamp",
];

/// RequestSigner that implements the ACS RPC signature (HMAC-SHA1).
///
/// Business parameters (`Action`, `Version`, `RegionId` and the payload fields)
/// are taken from the form body, or from the query when the request has no
/// form body. The signer merges the common parameters into the same list,
/// sorts the whole set by key, signs it and appends `Signature`. The list is
/// then transmitted in exactly that order.
#[derive(Debug, Default)]
pub struct RequestSigner {
    nonce: Option<String>,
}

impl RequestSigner {
    /// Create a new builder for the ACS signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the signature nonce.
    ///
    /// Only useful for reproducing a known signature, a pinned nonce makes
    /// every request replayable.
    #[cfg(test)]
    pub fn with_nonce(mut self, nonce: &str) -> Self {
        self.nonce = Some(nonce.to_string());
        self
    }

    fn nonce(&self) -> String {
        self.nonce
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
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
        let nonce = self.nonce();
        let method = req.method.clone();

        let params = match req.body.form_mut() {
            Some(pairs) => pairs,
            None => &mut req.query,
        };
        let version = apply_common_params(params, cred, &nonce, now);

        let string_to_sign = string_to_sign(&method, params);
        debug!("calculated string to sign: {string_to_sign}");

        let signature = base64_hmac_sha1(
            format!("{}&", cred.access_key_secret).as_bytes(),
            string_to_sign.as_bytes(),
        );
        params.push(("Signature".to_string(), signature));

        req.header_insert(ACCEPT, "application/json", false)?;
        req.header_insert(HeaderName::from_static(X_ACS_SIGNATURE_NONCE), &nonce, false)?;
        req.header_insert(
            HeaderName::from_static(X_ACS_SIGNATURE_METHOD),
            SIGNATURE_METHOD,
            false,
        )?;
        req.header_insert(
            HeaderName::from_static(X_ACS_SIGNATURE_VERSION),
            SIGNATURE_VERSION,
            false,
        )?;
        if let Some(version) = version {
            req.header_insert(HeaderName::from_static(X_ACS_VERSION), &version, false)?;
        }

        Ok(())
    }
}

/// Replace the signer owned parameters and sort the set by key.
///
/// Returns the API version found among the business parameters.
fn apply_common_params(
    params: &mut Vec<(String, String)>,
    cred: &Credential,
    nonce: &str,
    now: DateTime,
) -> Option<String> {
    params.retain(|(k, _)| !SIGNED_PARAMS.contains(&k.as_str()));
    params.extend([
        ("AccessKeyId".to_string(), cred.access_key_id.clone()),
        ("Format".to_string(), "JSON".to_string()),
        ("SignatureMethod".to_string(), SIGNATURE_METHOD.to_string()),
        ("SignatureNonce".to_string(), nonce.to_string()),
        ("SignatureVersion".to_string(), SIGNATURE_VERSION.to_string()),
        ("Timestamp".to_string(), format_iso8601(now)),
    ]);
    params.sort_by(|a, b| a.0.cmp(&b.0));

    params
        .iter()
        .find(|(k, _)| k == "Version")
        .map(|(_, v)| v.clone())
}

/// Build the canonicalized query string from already sorted parameters.
fn canonicalized_query(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
///   HTTPMethod + "&"
///   + percent_encode("/") + "&"
///   + percent_encode(CanonicalizedQueryString)
/// ```
fn string_to_sign(method: &Method, params: &[(String, String)]) -> String {
    format!(
        "{}&{}&{}",
        method.as_str(),
        percent_encode("/"),
        percent_encode(&canonicalized_query(params))
    )
}

use crate::Credential;
use aisign_core::hash::hex_md5;
use aisign_core::{Context, Result, SignRequest, SigningRequest};
use async_trait::async_trait;
use log::debug;

/// Parameters owned by the signer. They are replaced on every signing.
const SIGNED_PARAMS: &[&str] = &["appId", "nonce", "signature", "timestamp"];

/// RequestSigner that implements the NetEase MD5 concatenation signature.
///
/// `appId`, a millisecond `timestamp` and a random `nonce` join the business
/// parameters, the whole set is sorted by key and concatenated as
/// `key1value1key2value2...`, and `signature = hex(md5(secret + concat + secret))`
/// is appended. Parameters are taken from the form body, or from the query
/// when the request has no form body.
#[derive(Debug, Default)]
pub struct RequestSigner {
    nonce: Option<String>,
}

impl RequestSigner {
    /// Create a new builder for the MD5 signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the nonce.
    #[cfg(test)]
    pub fn with_nonce(mut self, nonce: &str) -> Self {
        self.nonce = Some(nonce.to_string());
        self
    }

    fn nonce(&self) -> String {
        self.nonce
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string())
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
        let timestamp = ctx.now().timestamp_millis().to_string();
        let nonce = self.nonce();

        let params = match req.body.form_mut() {
            Some(pairs) => pairs,
            None => &mut req.query,
        };
        params.retain(|(k, _)| !SIGNED_PARAMS.contains(&k.as_str()));
        params.extend([
            ("appId".to_string(), cred.app_id.clone()),
            ("timestamp".to_string(), timestamp),
            ("nonce".to_string(), nonce),
        ]);
        params.sort_by(|a, b| a.0.cmp(&b.0));

        let signature = signature(&cred.secret_key, params);
        debug!("calculated netease signature over {} params", params.len());
        params.push(("signature".to_string(), signature));

        Ok(())
    }
}

/// `hex(md5(secret + k1 + v1 + k2 + v2 + ... + secret))` over already sorted pairs.
fn signature(secret: &str, sorted: &[(String, String)]) -> String {
    let mut s = String::with_capacity(secret.len() * 2 + sorted.len() * 16);
    s.push_str(secret);
    for (k, v) in sorted {
        s.push_str(k);
        s.push_str(v);
    }
    s.push_str(secret);

    hex_md5(s.as_bytes())
}

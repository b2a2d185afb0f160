use crate::Token;
use aisign_core::{Context, Result, SignRequest, SigningRequest};
use async_trait::async_trait;

/// RequestSigner attaches the cached bearer token as the `access_token` query parameter.
#[derive(Debug, Default)]
pub struct RequestSigner;

impl RequestSigner {
    /// Create a new token signer.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Token;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut SigningRequest,
        token: &Self::Credential,
    ) -> Result<()> {
        req.query.retain(|(k, _)| k != "access_token");
        req.query_push("access_token", token.value.clone());
        Ok(())
    }
}

use crate::{constants::*, Credential};
use aisign_core::{Context, ProvideCredential, Result};
use async_trait::async_trait;

/// EnvCredentialProvider loads the key pair from `BAIDU_API_KEY` and `BAIDU_SECRET_KEY`.
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        match (ctx.env_var(BAIDU_API_KEY), ctx.env_var(BAIDU_SECRET_KEY)) {
            (Some(id), Some(secret)) => Ok(Some(Credential::new(&id, &secret))),
            _ => Ok(None),
        }
    }
}

use crate::{constants::*, Credential};
use aisign_core::{Context, ProvideCredential, Result};
use async_trait::async_trait;

/// EnvCredentialProvider loads Tencent Cloud credentials from environment variables.
///
/// - `TENCENTCLOUD_SECRET_ID` and `TENCENTCLOUD_SECRET_KEY` are required
/// - `TENCENTCLOUD_TOKEN` or `TENCENTCLOUD_SECURITY_TOKEN` is optional
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
        let envs = ctx.env_vars();

        let (Some(secret_id), Some(secret_key)) = (
            envs.get(TENCENTCLOUD_SECRET_ID),
            envs.get(TENCENTCLOUD_SECRET_KEY),
        ) else {
            return Ok(None);
        };

        let security_token = envs
            .get(TENCENTCLOUD_TOKEN)
            .or_else(|| envs.get(TENCENTCLOUD_SECURITY_TOKEN))
            .cloned();

        Ok(Some(Credential {
            secret_id: secret_id.clone(),
            secret_key: secret_key.clone(),
            security_token,
        }))
    }
}

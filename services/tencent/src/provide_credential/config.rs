use crate::{Config, Credential};
use aisign_core::{Context, ProvideCredential, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// ConfigCredentialProvider loads credential from static config.
#[derive(Debug)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new `ConfigCredentialProvider` instance.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        let (Some(secret_id), Some(secret_key)) = (&self.config.secret_id, &self.config.secret_key)
        else {
            return Ok(None);
        };

        Ok(Some(Credential {
            secret_id: secret_id.clone(),
            secret_key: secret_key.clone(),
            security_token: self.config.security_token.clone(),
        }))
    }
}

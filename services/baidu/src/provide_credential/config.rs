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

    async fn provide_credential(&self, _ctx: &Context) -> Result<Option<Self::Credential>> {
        match (&self.config.api_key, &self.config.secret_key) {
            (Some(ak), Some(sk)) => Ok(Some(Credential::new(ak, sk))),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_config_loader_without_credentials() {
        let loader = ConfigCredentialProvider::new(Arc::new(Config::default()));
        let credential = loader.provide_credential(&Context::new()).await.unwrap();

        assert!(credential.is_none());
    }
}

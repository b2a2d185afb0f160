use crate::provide_credential::{ConfigCredentialProvider, EnvCredentialProvider};
use crate::{Config, Credential};
use aisign_core::{Context, ProvideCredential, ProvideCredentialChain, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// DefaultCredentialProvider is a loader that will try to load credential via default chains.
///
/// Resolution order:
///
/// 1. Config
/// 2. Environment variables
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new(Arc::new(Config::default()))
    }
}

impl DefaultCredentialProvider {
    /// Create a new `DefaultCredentialProvider` instance.
    pub fn new(config: Arc<Config>) -> Self {
        let chain = ProvideCredentialChain::new()
            .push(ConfigCredentialProvider::new(config))
            .push(EnvCredentialProvider::new());

        Self { chain }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain<Credential>) -> Self {
        Self { chain }
    }

    /// Add a credential provider to the front of the default chain.
    ///
    /// ```no_run
    /// use aisign_aliyun::{DefaultCredentialProvider, StaticCredentialProvider};
    ///
    /// let provider = DefaultCredentialProvider::default()
    ///     .push_front(StaticCredentialProvider::new("access_key", "secret_key"));
    /// ```
    pub fn push_front(mut self, provider: impl ProvideCredential<Credential = Credential>) -> Self {
        self.chain = self.chain.push_front(provider);
        self
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use aisign_core::StaticEnv;
    use std::collections::HashMap;

    fn env_ctx() -> Context {
        Context::new().with_env(StaticEnv {
            envs: HashMap::from_iter([
                (
                    ALIBABA_CLOUD_ACCESS_KEY_ID.to_string(),
                    "env_access_key_id".to_string(),
                ),
                (
                    ALIBABA_CLOUD_ACCESS_KEY_SECRET.to_string(),
                    "env_secret".to_string(),
                ),
            ]),
        })
    }

    #[tokio::test]
    async fn test_default_loader_without_env() {
        let _ = env_logger::builder().is_test(true).try_init();

        let loader = DefaultCredentialProvider::default();
        let credential = loader.provide_credential(&Context::new()).await.unwrap();

        assert!(credential.is_none());
    }

    #[tokio::test]
    async fn test_default_loader_with_env() {
        let _ = env_logger::builder().is_test(true).try_init();

        let loader = DefaultCredentialProvider::default();
        let credential = loader
            .provide_credential(&env_ctx())
            .await
            .unwrap()
            .unwrap();

        assert_eq!("env_access_key_id", credential.access_key_id);
        assert_eq!("env_secret", credential.access_key_secret);
    }

    #[tokio::test]
    async fn test_config_wins_over_env() {
        let _ = env_logger::builder().is_test(true).try_init();

        let loader = DefaultCredentialProvider::new(Arc::new(Config {
            access_key_id: Some("config_id".to_string()),
            access_key_secret: Some("config_secret".to_string()),
            ..Default::default()
        }));
        let credential = loader
            .provide_credential(&env_ctx())
            .await
            .unwrap()
            .unwrap();

        assert_eq!("config_id", credential.access_key_id);
    }
}

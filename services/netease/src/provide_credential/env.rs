use crate::{constants::*, Credential};
use aisign_core::{Context, ProvideCredential, Result};
use async_trait::async_trait;

/// EnvCredentialProvider loads `NETEASE_APP_ID` and `NETEASE_SECRET_KEY`.
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
        let (Some(app_id), Some(secret_key)) =
            (ctx.env_var(NETEASE_APP_ID), ctx.env_var(NETEASE_SECRET_KEY))
        else {
            return Ok(None);
        };

        Ok(Some(Credential::new(&app_id, &secret_key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aisign_core::StaticEnv;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_env_credential_provider() -> anyhow::Result<()> {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (NETEASE_APP_ID.to_string(), "app".to_string()),
                (NETEASE_SECRET_KEY.to_string(), "secret".to_string()),
            ]),
        });

        let cred = EnvCredentialProvider::new()
            .provide_credential(&ctx)
            .await?
            .expect("credential must be loaded");
        assert_eq!(cred.app_id, "app");
        assert_eq!(cred.secret_key, "secret");
        Ok(())
    }
}

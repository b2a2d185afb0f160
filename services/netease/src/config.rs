use crate::constants::*;
use aisign_core::utils::Redact;
use aisign_core::Context;
use std::fmt::{Debug, Formatter};

/// Config for NetEase services.
#[derive(Clone, Default)]
pub struct Config {
    /// Application id, sent as `appId`.
    pub app_id: Option<String>,
    /// Secret key that wraps the MD5 input.
    pub secret_key: Option<String>,
    /// Override the api base url.
    pub endpoint: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("app_id", &self.app_id)
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl Config {
    /// Load config from env, fields already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(NETEASE_APP_ID) {
            self.app_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(NETEASE_SECRET_KEY) {
            self.secret_key.get_or_insert(v);
        }

        self
    }

    pub(crate) fn url(&self, path: &str) -> String {
        let base = self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
        format!("{}{path}", base.trim_end_matches('/'))
    }
}

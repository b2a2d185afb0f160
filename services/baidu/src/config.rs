use crate::constants::*;
use aisign_core::utils::Redact;
use aisign_core::Context;
use std::fmt::{Debug, Formatter};

/// Config for Baidu AI Cloud.
#[derive(Clone, Default)]
pub struct Config {
    /// `api_key` of the application, sent as `client_id` in the token grant.
    pub api_key: Option<String>,
    /// `secret_key` of the application, sent as `client_secret`.
    pub secret_key: Option<String>,
    /// Device id reported to the speech API.
    pub speech_cuid: Option<String>,
    /// Override the OAuth2 token endpoint.
    pub token_endpoint: Option<String>,
    /// Override the `aip.baidubce.com` base url.
    pub aip_endpoint: Option<String>,
    /// Override the speech API url.
    pub vop_endpoint: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &Redact::from(&self.api_key))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("speech_cuid", &self.speech_cuid)
            .field("token_endpoint", &self.token_endpoint)
            .field("aip_endpoint", &self.aip_endpoint)
            .field("vop_endpoint", &self.vop_endpoint)
            .finish()
    }
}

impl Config {
    /// Load config from env, fields already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(BAIDU_API_KEY) {
            self.api_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(BAIDU_SECRET_KEY) {
            self.secret_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(BAIDU_SPEECH_CUID) {
            self.speech_cuid.get_or_insert(v);
        }

        self
    }

    pub(crate) fn speech_cuid(&self) -> &str {
        self.speech_cuid.as_deref().unwrap_or(DEFAULT_SPEECH_CUID)
    }

    pub(crate) fn token_endpoint(&self) -> &str {
        self.token_endpoint.as_deref().unwrap_or(TOKEN_ENDPOINT)
    }

    pub(crate) fn aip_url(&self, path: &str) -> String {
        let base = self.aip_endpoint.as_deref().unwrap_or(AIP_ENDPOINT);
        format!("{}{path}", base.trim_end_matches('/'))
    }

    pub(crate) fn vop_endpoint(&self) -> &str {
        self.vop_endpoint.as_deref().unwrap_or(VOP_ENDPOINT)
    }
}

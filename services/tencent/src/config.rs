use crate::constants::*;
use crate::task::PollPolicy;
use aisign_core::utils::Redact;
use aisign_core::Context;
use std::fmt::{Debug, Formatter};

/// Config for Tencent Cloud AI services.
#[derive(Clone, Default)]
pub struct Config {
    /// Region for Tencent Cloud services, default to `ap-guangzhou`.
    pub region: Option<String>,
    /// Secret ID (Access Key ID)
    pub secret_id: Option<String>,
    /// Secret Key (Secret Access Key)
    pub secret_key: Option<String>,
    /// Security token for temporary credentials
    pub security_token: Option<String>,
    /// Override the OCR endpoint.
    pub ocr_endpoint: Option<String>,
    /// Override the image analysis endpoint.
    pub tiia_endpoint: Option<String>,
    /// Override the speech recognition endpoint.
    pub asr_endpoint: Option<String>,
    /// How recognition tasks are polled.
    pub poll: PollPolicy,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("region", &self.region)
            .field("secret_id", &Redact::from(&self.secret_id))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("security_token", &Redact::from(&self.security_token))
            .field("ocr_endpoint", &self.ocr_endpoint)
            .field("tiia_endpoint", &self.tiia_endpoint)
            .field("asr_endpoint", &self.asr_endpoint)
            .field("poll", &self.poll)
            .finish()
    }
}

impl Config {
    /// Load config from env.
    ///
    /// Fields that are already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(TENCENTCLOUD_REGION) {
            self.region.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(TENCENTCLOUD_SECRET_ID) {
            self.secret_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(TENCENTCLOUD_SECRET_KEY) {
            self.secret_key.get_or_insert(v);
        }
        if let Some(v) = ctx
            .env_var(TENCENTCLOUD_TOKEN)
            .or_else(|| ctx.env_var(TENCENTCLOUD_SECURITY_TOKEN))
        {
            self.security_token.get_or_insert(v);
        }

        self
    }

    /// Region sent as `X-TC-Region`.
    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }

    pub(crate) fn ocr_endpoint(&self) -> &str {
        self.ocr_endpoint.as_deref().unwrap_or(OCR_ENDPOINT)
    }

    pub(crate) fn tiia_endpoint(&self) -> &str {
        self.tiia_endpoint.as_deref().unwrap_or(TIIA_ENDPOINT)
    }

    pub(crate) fn asr_endpoint(&self) -> &str {
        self.asr_endpoint.as_deref().unwrap_or(ASR_ENDPOINT)
    }
}

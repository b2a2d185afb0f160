use crate::constants::*;
use aisign_core::utils::Redact;
use aisign_core::Context;
use std::fmt::{Debug, Formatter};

/// Config carries all the configuration for Aliyun AI services.
#[derive(Clone, Default)]
pub struct Config {
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ALIBABA_CLOUD_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// `access_key_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ALIBABA_CLOUD_ACCESS_KEY_SECRET`]
    pub access_key_secret: Option<String>,
    /// Appkey of the NLS project, required by speech recognition.
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ALIBABA_CLOUD_NLS_APP_KEY`]
    pub nls_app_key: Option<String>,
    /// `region_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`ALIBABA_CLOUD_REGION_ID`]
    /// - default to `cn-shanghai`
    pub region_id: Option<String>,
    /// Override the OCR endpoint.
    pub ocr_endpoint: Option<String>,
    /// Override the image recognition endpoint.
    pub imagerecog_endpoint: Option<String>,
    /// Override the NLS meta endpoint that issues tokens.
    pub nls_meta_endpoint: Option<String>,
    /// Override the NLS gateway url.
    pub nls_gateway_endpoint: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("access_key_secret", &Redact::from(&self.access_key_secret))
            .field("nls_app_key", &self.nls_app_key)
            .field("region_id", &self.region_id)
            .field("ocr_endpoint", &self.ocr_endpoint)
            .field("imagerecog_endpoint", &self.imagerecog_endpoint)
            .field("nls_meta_endpoint", &self.nls_meta_endpoint)
            .field("nls_gateway_endpoint", &self.nls_gateway_endpoint)
            .finish()
    }
}

impl Config {
    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(ALIBABA_CLOUD_ACCESS_KEY_ID) {
            self.access_key_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(ALIBABA_CLOUD_ACCESS_KEY_SECRET) {
            self.access_key_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(ALIBABA_CLOUD_NLS_APP_KEY) {
            self.nls_app_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(ALIBABA_CLOUD_REGION_ID) {
            self.region_id.get_or_insert(v);
        }

        self
    }

    /// Region used by every product.
    pub fn region(&self) -> &str {
        self.region_id.as_deref().unwrap_or(DEFAULT_REGION_ID)
    }

    pub(crate) fn ocr_endpoint(&self) -> String {
        self.ocr_endpoint
            .clone()
            .unwrap_or_else(|| format!("https://ocr.{}.aliyuncs.com/", self.region()))
    }

    pub(crate) fn imagerecog_endpoint(&self) -> String {
        self.imagerecog_endpoint
            .clone()
            .unwrap_or_else(|| format!("https://imagerecog.{}.aliyuncs.com/", self.region()))
    }

    pub(crate) fn nls_meta_endpoint(&self) -> String {
        self.nls_meta_endpoint
            .clone()
            .unwrap_or_else(|| format!("https://nls-meta.{}.aliyuncs.com/", self.region()))
    }

    pub(crate) fn nls_gateway_endpoint(&self) -> String {
        self.nls_gateway_endpoint.clone().unwrap_or_else(|| {
            format!(
                "https://nls-gateway.{}.aliyuncs.com/stream/v1/asr",
                self.region()
            )
        })
    }
}

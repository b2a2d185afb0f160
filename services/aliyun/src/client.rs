use crate::constants::*;
use crate::nls_token::{NlsToken, NlsTokenProvider, NlsTokenSigner};
use crate::response::{self, ACS_VENDOR};
use crate::{Config, Credential, DefaultCredentialProvider, RequestSigner};
use aisign_core::{
    Body, Capability, Context, Error, Payload, ProvideCredential, RecognitionResult, Recognize,
    Result, Signer, SigningRequest, Source, Vendor,
};
use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use log::debug;
use serde_json::Value;
use std::sync::Arc;

/// Client for Aliyun OCR, image tagging and NLS speech recognition.
///
/// Owns its own credential cache and NLS token cache. Clones share both.
#[derive(Debug, Clone)]
pub struct AliyunClient {
    ctx: Context,
    config: Arc<Config>,
    signer: Signer<Credential>,
    nls: Signer<NlsToken>,
}

impl AliyunClient {
    /// Create a client with credentials resolved from config, then env.
    pub fn new(ctx: Context, config: Config) -> Self {
        let config = Arc::new(config.from_env(&ctx));
        let loader = DefaultCredentialProvider::new(config.clone());
        Self::with_provider(ctx, config, loader)
    }

    /// Create a client with a custom credential provider.
    pub fn with_credential_provider(
        ctx: Context,
        config: Config,
        loader: impl ProvideCredential<Credential = Credential>,
    ) -> Self {
        let config = Arc::new(config.from_env(&ctx));
        Self::with_provider(ctx, config, loader)
    }

    fn with_provider(
        ctx: Context,
        config: Arc<Config>,
        loader: impl ProvideCredential<Credential = Credential>,
    ) -> Self {
        let signer = Signer::new(ctx.clone(), loader, RequestSigner::new());
        let nls = Signer::new(
            ctx.clone(),
            NlsTokenProvider::new(signer.clone(), &config.nls_meta_endpoint(), config.region()),
            NlsTokenSigner,
        );

        Self {
            ctx,
            config,
            signer,
            nls,
        }
    }

    /// Send one ACS RPC call and return its `Data`.
    async fn call(&self, endpoint: &str, mut params: Vec<(String, String)>) -> Result<Value> {
        params.push(("RegionId".to_string(), self.config.region().to_string()));

        let mut req = SigningRequest::new(Method::POST, endpoint)?.with_body(Body::Form(params));
        self.signer.sign(&mut req).await.map_err(tag)?;

        let resp = self.ctx.http_send(req.into_http()?).await.map_err(tag)?;
        response::parse_data(resp.status(), resp.body())
    }

    async fn image_params(
        &self,
        action: &str,
        version: &str,
        source: &Source,
    ) -> Result<Vec<(String, String)>> {
        let image = match source.load(&self.ctx).await? {
            Payload::Url(url) => ("ImageURL".to_string(), url),
            Payload::Base64(content) => ("ImageContent".to_string(), content),
        };

        Ok(vec![
            ("Action".to_string(), action.to_string()),
            ("Version".to_string(), version.to_string()),
            image,
        ])
    }
}

fn tag(err: Error) -> Error {
    err.with_vendor(ACS_VENDOR)
}

#[async_trait]
impl Recognize for AliyunClient {
    fn vendor(&self) -> Vendor {
        ACS_VENDOR
    }

    fn capabilities(&self) -> &'static [Capability] {
        &[
            Capability::RecognizeText,
            Capability::TagImage,
            Capability::Transcribe,
        ]
    }

    async fn authenticate(&self) -> Result<()> {
        self.signer.credential().await.map_err(tag)?;
        Ok(())
    }

    async fn recognize_text(&self, source: &Source) -> Result<RecognitionResult> {
        let params = self
            .image_params("RecognizeGeneral", OCR_VERSION, source)
            .await?;
        let data = self.call(&self.config.ocr_endpoint(), params).await?;

        response::text_result(data)
    }

    async fn tag_image(&self, source: &Source) -> Result<RecognitionResult> {
        let params = self
            .image_params("TaggingImage", IMAGERECOG_VERSION, source)
            .await?;
        let data = self.call(&self.config.imagerecog_endpoint(), params).await?;

        response::tag_result(data)
    }

    async fn transcribe(&self, source: &Source) -> Result<RecognitionResult> {
        if source.is_url() {
            return Err(
                Error::unsupported("nls recognition only accepts local audio")
                    .with_vendor(ACS_VENDOR),
            );
        }
        let app_key = self.config.nls_app_key.as_deref().ok_or_else(|| {
            Error::config_invalid(format!(
                "{ALIBABA_CLOUD_NLS_APP_KEY} is required for speech recognition"
            ))
            .with_vendor(ACS_VENDOR)
        })?;
        let audio = source.read_bytes(&self.ctx).await?;
        let format = source.extension().unwrap_or_else(|| "wav".to_string());
        debug!("aliyun nls transcribing {} bytes of {format}", audio.len());

        let mut req = SigningRequest::new(Method::POST, &self.config.nls_gateway_endpoint())?
            .with_body(Body::Binary(Bytes::from(audio)));
        req.query_push("appkey", app_key);
        req.query_push("format", format);
        req.query_push("sample_rate", NLS_SAMPLE_RATE);
        req.query_push("enable_punctuation_prediction", "true");
        req.query_push("enable_inverse_text_normalization", "true");
        self.nls.sign(&mut req).await.map_err(tag)?;

        let resp = self.ctx.http_send(req.into_http()?).await.map_err(tag)?;
        response::nls_result(resp.status(), resp.body())
    }
}

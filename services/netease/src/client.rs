use crate::constants::*;
use crate::response::{self, NETEASE_VENDOR};
use crate::{Config, Credential, DefaultCredentialProvider, RequestSigner};
use aisign_core::hash::base64_encode;
use aisign_core::{
    Body, Capability, Context, Error, Payload, ProvideCredential, RecognitionResult, Recognize,
    Result, Signer, SigningRequest, Source, Vendor,
};
use async_trait::async_trait;
use http::{Method, StatusCode};
use log::debug;
use std::sync::Arc;

/// Client for NetEase OCR, image recognition and speech recognition.
#[derive(Debug, Clone)]
pub struct NeteaseClient {
    ctx: Context,
    config: Arc<Config>,
    signer: Signer<Credential>,
}

impl NeteaseClient {
    /// Create a client with credentials resolved from config, then env.
    pub fn new(ctx: Context, config: Config) -> Self {
        let config = Arc::new(config.from_env(&ctx));
        let loader = DefaultCredentialProvider::new(config.clone());
        let signer = Signer::new(ctx.clone(), loader, RequestSigner::new());

        Self {
            ctx,
            config,
            signer,
        }
    }

    /// Create a client with a custom credential provider.
    pub fn with_credential_provider(
        ctx: Context,
        config: Config,
        loader: impl ProvideCredential<Credential = Credential>,
    ) -> Self {
        let config = Arc::new(config.from_env(&ctx));
        let signer = Signer::new(ctx.clone(), loader, RequestSigner::new());

        Self {
            ctx,
            config,
            signer,
        }
    }

    async fn post_form(
        &self,
        path: &str,
        form: Vec<(String, String)>,
    ) -> Result<(StatusCode, Vec<u8>)> {
        let mut req = SigningRequest::new(Method::POST, &self.config.url(path))?
            .with_body(Body::Form(form));
        self.signer.sign(&mut req).await.map_err(tag)?;

        let resp = self.ctx.http_send(req.into_http()?).await.map_err(tag)?;
        Ok((resp.status(), resp.into_body().to_vec()))
    }

    async fn image_form(&self, source: &Source) -> Result<Vec<(String, String)>> {
        Ok(match source.load(&self.ctx).await? {
            Payload::Url(url) => vec![("url".to_string(), url)],
            Payload::Base64(content) => vec![("image".to_string(), content)],
        })
    }
}

fn tag(err: Error) -> Error {
    err.with_vendor(NETEASE_VENDOR)
}

#[async_trait]
impl Recognize for NeteaseClient {
    fn vendor(&self) -> Vendor {
        NETEASE_VENDOR
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
        let form = self.image_form(source).await?;
        let (status, body) = self.post_form(OCR_PATH, form).await?;

        response::text_result(status, &body)
    }

    async fn tag_image(&self, source: &Source) -> Result<RecognitionResult> {
        let form = self.image_form(source).await?;
        let (status, body) = self.post_form(IMAGE_PATH, form).await?;

        response::tag_result(status, &body)
    }

    async fn transcribe(&self, source: &Source) -> Result<RecognitionResult> {
        if source.is_url() {
            return Err(
                Error::unsupported("netease speech recognition only accepts local audio")
                    .with_vendor(NETEASE_VENDOR),
            );
        }
        let audio = source.read_bytes(&self.ctx).await?;
        debug!("netease transcribing {} bytes", audio.len());

        let form = vec![("audio".to_string(), base64_encode(&audio))];
        let (status, body) = self.post_form(ASR_PATH, form).await?;

        response::asr_result(status, &body)
    }
}

use crate::constants::*;
use crate::response::{self, BAIDU_VENDOR};
use crate::{
    ClientCredentialsProvider, Config, Credential, DefaultCredentialProvider, LexicalItem,
    RequestSigner, Token,
};
use aisign_core::hash::base64_encode;
use aisign_core::{
    Body, Capability, Context, Error, Payload, ProvideCredential, RecognitionResult, Recognize,
    Result, Signer, SigningRequest, Source, Vendor,
};
use async_trait::async_trait;
use http::{Method, StatusCode};
use log::debug;
use serde_json::json;
use std::sync::Arc;

/// Client for Baidu AI Cloud OCR, image classify, speech and translation.
///
/// Every call carries a bearer token that is granted once and cached until
/// five minutes before it expires. Clones share the cache.
#[derive(Debug, Clone)]
pub struct BaiduClient {
    ctx: Context,
    config: Arc<Config>,
    signer: Signer<Token>,
}

impl BaiduClient {
    /// Create a client with the key pair resolved from config, then env.
    pub fn new(ctx: Context, config: Config) -> Self {
        let config = Arc::new(config.from_env(&ctx));
        let loader = DefaultCredentialProvider::new(config.clone());
        Self::with_provider(ctx, config, loader)
    }

    /// Create a client with a custom key pair provider.
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
        let grant = ClientCredentialsProvider::new(loader, config.token_endpoint());
        let signer = Signer::new(ctx.clone(), grant, RequestSigner::new());

        Self {
            ctx,
            config,
            signer,
        }
    }

    /// Recognize text with the high accuracy OCR model.
    pub async fn recognize_text_accurate(&self, source: &Source) -> Result<RecognitionResult> {
        let mut form = self.image_form(source).await?;
        form.extend(
            ["detect_direction", "paragraph", "probability"]
                .map(|k| (k.to_string(), "false".to_string())),
        );

        let (status, body) = self
            .send(&self.config.aip_url(OCR_ACCURATE_PATH), Body::Form(form))
            .await?;
        response::text_result(status, &body)
    }

    /// Split Chinese text into words with part of speech and named entity tags.
    pub async fn lexer(&self, text: &str) -> Result<Vec<LexicalItem>> {
        let (status, body) = self
            .send(
                &self.config.aip_url(LEXER_PATH),
                Body::Json(json!({ "text": text })),
            )
            .await?;

        response::lexer_result(status, &body)
    }

    /// Sign with the cached token and send.
    async fn send(&self, url: &str, body: Body) -> Result<(StatusCode, bytes::Bytes)> {
        let mut req = SigningRequest::new(Method::POST, url)?.with_body(body);
        self.signer.sign(&mut req).await.map_err(tag)?;

        let resp = self.ctx.http_send(req.into_http()?).await.map_err(tag)?;
        let status = resp.status();
        Ok((status, resp.into_body()))
    }

    async fn image_form(&self, source: &Source) -> Result<Vec<(String, String)>> {
        Ok(match source.load(&self.ctx).await? {
            Payload::Url(url) => vec![("url".to_string(), url)],
            Payload::Base64(content) => vec![("image".to_string(), content)],
        })
    }
}

fn tag(err: Error) -> Error {
    err.with_vendor(BAIDU_VENDOR)
}

/// Speech format from the file extension, `wav` for anything unknown.
fn speech_format(source: &Source) -> String {
    match source.extension() {
        Some(ext) if SPEECH_FORMATS.contains(&ext.as_str()) => ext,
        _ => "wav".to_string(),
    }
}

#[async_trait]
impl Recognize for BaiduClient {
    fn vendor(&self) -> Vendor {
        BAIDU_VENDOR
    }

    fn capabilities(&self) -> &'static [Capability] {
        &[
            Capability::RecognizeText,
            Capability::TagImage,
            Capability::Transcribe,
            Capability::Translate,
        ]
    }

    async fn authenticate(&self) -> Result<()> {
        self.signer.credential().await.map_err(tag)?;
        Ok(())
    }

    async fn recognize_text(&self, source: &Source) -> Result<RecognitionResult> {
        let form = self.image_form(source).await?;
        let (status, body) = self
            .send(&self.config.aip_url(OCR_GENERAL_PATH), Body::Form(form))
            .await?;

        response::text_result(status, &body)
    }

    async fn tag_image(&self, source: &Source) -> Result<RecognitionResult> {
        let form = self.image_form(source).await?;
        let (status, body) = self
            .send(&self.config.aip_url(IMAGE_CLASSIFY_PATH), Body::Form(form))
            .await?;

        response::tag_result(status, &body)
    }

    async fn transcribe(&self, source: &Source) -> Result<RecognitionResult> {
        if source.is_url() {
            return Err(
                Error::unsupported("baidu speech recognition only accepts local audio")
                    .with_vendor(BAIDU_VENDOR),
            );
        }
        let audio = source.read_bytes(&self.ctx).await?;
        let format = speech_format(source);
        let token = self.signer.credential().await.map_err(tag)?;
        debug!("baidu transcribing {} bytes of {format}", audio.len());

        let payload = json!({
            "format": format,
            "rate": SPEECH_RATE,
            "channel": 1,
            "cuid": self.config.speech_cuid(),
            "token": token.value,
            "dev_pid": SPEECH_DEV_PID,
            "speech": base64_encode(&audio),
            "len": audio.len(),
        });
        let (status, body) = self
            .send(self.config.vop_endpoint(), Body::Json(payload))
            .await?;

        response::speech_result(status, &body)
    }

    async fn translate(&self, text: &str, from: &str, to: &str) -> Result<RecognitionResult> {
        let payload = json!({ "q": text, "from": from, "to": to });
        let (status, body) = self
            .send(&self.config.aip_url(TEXT_TRANS_PATH), Body::Json(payload))
            .await?;

        response::translate_result(status, &body)
    }
}

use crate::constants::*;
use crate::response::{self, TC_VENDOR};
use crate::task::TaskState;
use crate::{Config, Credential, DefaultCredentialProvider, RequestSigner};
use aisign_core::{
    Body, Capability, Context, Error, Payload, ProvideCredential, RecognitionResult, Recognize,
    Result, Signer, SigningRequest, Source, Vendor,
};
use async_trait::async_trait;
use http::header::HeaderName;
use http::Method;
use log::debug;
use serde_json::{json, Value};
use std::sync::Arc;

/// Client for Tencent Cloud OCR, image analysis and speech recognition.
///
/// Speech recognition is asynchronous on Tencent Cloud: `transcribe` creates a
/// task and polls it following [`Config::poll`].
#[derive(Debug, Clone)]
pub struct TencentClient {
    ctx: Context,
    config: Arc<Config>,
    signer: Signer<Credential>,
}

impl TencentClient {
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
        Self {
            ctx,
            config,
            signer,
        }
    }

    /// Send one API 3.0 call and return its `Response`.
    async fn call(
        &self,
        endpoint: &str,
        action: &str,
        version: &str,
        payload: Value,
    ) -> Result<Value> {
        let mut req = SigningRequest::new(Method::POST, endpoint)?.with_body(Body::Json(payload));
        req.header_insert(HeaderName::from_static(X_TC_ACTION), action, false)?;
        req.header_insert(HeaderName::from_static(X_TC_VERSION), version, false)?;
        req.header_insert(
            HeaderName::from_static(X_TC_REGION),
            self.config.region(),
            false,
        )?;
        self.signer.sign(&mut req).await.map_err(tag)?;

        let resp = self.ctx.http_send(req.into_http()?).await.map_err(tag)?;
        response::parse_response(resp.status(), resp.body())
    }

    async fn image_payload(&self, source: &Source) -> Result<Value> {
        Ok(match source.load(&self.ctx).await? {
            Payload::Url(url) => json!({ "ImageUrl": url }),
            Payload::Base64(content) => json!({ "ImageBase64": content }),
        })
    }

    /// Drive a created task to a terminal state.
    ///
    /// Any failed status query ends the poll with that error.
    async fn poll_task(&self, task_id: u64) -> Result<RecognitionResult> {
        let policy = self.config.poll;
        let mut state = TaskState::submitted(task_id);

        while !state.is_terminal() {
            tokio::time::sleep(policy.interval).await;

            let resp = self
                .call(
                    self.config.asr_endpoint(),
                    "DescribeTaskStatus",
                    ASR_VERSION,
                    json!({ "TaskId": task_id }),
                )
                .await?;
            let status = response::task_status(resp)?;
            debug!("tencent asr task {task_id} reported {status:?}");

            state = state.advance(status, &policy);
        }

        state.into_result()
    }
}

fn tag(err: Error) -> Error {
    err.with_vendor(TC_VENDOR)
}

#[async_trait]
impl Recognize for TencentClient {
    fn vendor(&self) -> Vendor {
        TC_VENDOR
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
        let payload = self.image_payload(source).await?;
        let resp = self
            .call(
                self.config.ocr_endpoint(),
                "GeneralBasicOCR",
                OCR_VERSION,
                payload,
            )
            .await?;

        response::text_result(resp)
    }

    async fn tag_image(&self, source: &Source) -> Result<RecognitionResult> {
        let payload = self.image_payload(source).await?;
        let resp = self
            .call(self.config.tiia_endpoint(), "DetectLabel", TIIA_VERSION, payload)
            .await?;

        response::tag_result(resp)
    }

    async fn transcribe(&self, source: &Source) -> Result<RecognitionResult> {
        let mut payload = json!({
            "EngineModelType": ASR_ENGINE_MODEL,
            "ChannelNum": 1,
            "ResTextFormat": 0,
        });
        let audio = match source {
            Source::Url(url) => json!({ "SourceType": 0, "Url": url }),
            Source::File(_) => {
                let audio = source.read_bytes(&self.ctx).await?;
                json!({
                    "SourceType": 1,
                    "Data": aisign_core::hash::base64_encode(&audio),
                    "DataLen": audio.len(),
                })
            }
        };
        if let (Some(payload), Value::Object(audio)) = (payload.as_object_mut(), audio) {
            payload.extend(audio);
        }

        let resp = self
            .call(self.config.asr_endpoint(), "CreateRecTask", ASR_VERSION, payload)
            .await?;
        let task_id = response::task_id(resp)?;
        debug!("tencent asr task {task_id} created");

        self.poll_task(task_id).await
    }
}

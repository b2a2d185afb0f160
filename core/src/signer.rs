use crate::{Context, Error, ProvideCredential, Result, SignRequest, SigningCredential, SigningRequest};
use async_lock::Mutex;
use log::debug;
use std::sync::Arc;

/// Signer is the main struct used to sign the request.
///
/// It owns the cached credential of one client. Reading the cache and
/// refreshing it happen under one lock, so concurrent callers never trigger
/// two loads for the same expiry.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    loader: Arc<dyn ProvideCredential<Credential = K>>,
    builder: Arc<dyn SignRequest<Credential = K>>,
    credential: Arc<Mutex<Option<K>>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        loader: impl ProvideCredential<Credential = K>,
        builder: impl SignRequest<Credential = K>,
    ) -> Self {
        Self {
            ctx,

            loader: Arc::new(loader),
            builder: Arc::new(builder),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// Context used by this signer.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Get a valid credential, loading a new one if the cached one expired.
    pub async fn credential(&self) -> Result<K> {
        let mut cached = self.credential.lock().await;
        let now = self.ctx.now();

        if let Some(cred) = cached.as_ref() {
            if cred.is_valid(now) {
                return Ok(cred.clone());
            }
            debug!("cached credential expired at {now}, reloading");
        }

        let Some(cred) = self.loader.provide_credential(&self.ctx).await? else {
            return Err(Error::auth("no valid credential loaded from any provider"));
        };
        if !cred.is_valid(now) {
            return Err(Error::auth("loaded credential is not valid"));
        }

        *cached = Some(cred.clone());
        Ok(cred)
    }

    /// Signing request.
    pub async fn sign(&self, req: &mut SigningRequest) -> Result<()> {
        let cred = self.credential().await?;

        self.builder.sign_request(&self.ctx, req, &cred).await
    }
}

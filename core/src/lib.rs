//! Core components for signing AI vendor API requests.
//!
//! This crate provides the foundational types and traits for the aisign ecosystem.
//! It defines the abstractions shared by every vendor crate: how credentials are
//! loaded and cached, how a request is canonicalized and signed, and how a
//! vendor reply is turned into one uniform result model.
//!
//! ## Overview
//!
//! The crate is built around several key concepts:
//!
//! - **Context**: A container that holds implementations for file reading, HTTP sending,
//!   environment access and the clock
//! - **Traits**: Abstract interfaces for credential loading (`ProvideCredential`) and request
//!   signing (`SignRequest`)
//! - **Signer**: The orchestrator that caches the credential (or bearer token) and signs requests
//! - **Recognize**: The capability set every vendor client implements
//!
//! ## Example
//!
//! ```no_run
//! use aisign_core::{Context, Signer, ProvideCredential, SignRequest, SigningCredential, SigningRequest};
//! use aisign_core::time::DateTime;
//! use aisign_core::Result;
//! use async_trait::async_trait;
//!
//! // Define your credential type
//! #[derive(Clone, Debug)]
//! struct MyCredential {
//!     key: String,
//!     secret: String,
//! }
//!
//! impl SigningCredential for MyCredential {
//!     fn is_valid(&self, _now: DateTime) -> bool {
//!         !self.key.is_empty() && !self.secret.is_empty()
//!     }
//! }
//!
//! // Implement credential loader
//! #[derive(Debug)]
//! struct MyLoader;
//!
//! #[async_trait]
//! impl ProvideCredential for MyLoader {
//!     type Credential = MyCredential;
//!
//!     async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
//!         Ok(Some(MyCredential {
//!             key: "my-access-key".to_string(),
//!             secret: "my-secret-key".to_string(),
//!         }))
//!     }
//! }
//!
//! // Implement request builder
//! #[derive(Debug)]
//! struct MyBuilder;
//!
//! #[async_trait]
//! impl SignRequest for MyBuilder {
//!     type Credential = MyCredential;
//!
//!     async fn sign_request(
//!         &self,
//!         _ctx: &Context,
//!         req: &mut SigningRequest,
//!         cred: &Self::Credential,
//!     ) -> Result<()> {
//!         req.query_push("key", cred.key.clone());
//!         Ok(())
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::default();
//! let signer = Signer::new(ctx, MyLoader, MyBuilder);
//!
//! let mut req = SigningRequest::new(http::Method::GET, "https://example.com/")?;
//! signer.sign(&mut req).await?;
//! let req = req.into_http()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Traits
//!
//! - [`FileRead`]: For asynchronous file reading
//! - [`HttpSend`]: For sending HTTP requests
//! - [`Env`]: For environment variable access
//! - [`Clock`]: For reading the current instant
//! - [`ProvideCredential`]: For loading credentials from various sources
//! - [`SignRequest`]: For building vendor-specific signatures
//! - [`SigningCredential`]: For validating credentials
//! - [`Recognize`]: For the vendor client operations
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: General utilities including data redaction and percent encoding

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{
    Clock, Context, Env, FileRead, HttpSend, ManualClock, NoopEnv, NoopFileRead, NoopHttpSend,
    OsEnv, StaticEnv, SystemClock,
};

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{ProvideCredential, ProvideCredentialChain, SignRequest, SigningCredential};
mod request;
pub use request::{Body, SigningRequest};
mod signer;
pub use signer::Signer;

mod source;
pub use source::{Payload, Source};
mod result;
pub use result::{ConfidenceScale, RecognitionResult, Tag, NO_TEXT_RECOGNIZED};
mod recognize;
pub use recognize::{Capability, Recognize, Vendor};

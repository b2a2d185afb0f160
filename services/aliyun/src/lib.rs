//! Aliyun signing and recognition for aisign.
//!
//! Alibaba Cloud RPC products (OCR, image recognition, NLS meta) authenticate
//! with the ACS signature: every parameter, business and common, is sorted,
//! RFC 3986 encoded and signed with HMAC-SHA1 keyed by `secret + "&"`. The
//! NLS speech gateway instead takes a short lived token issued by the
//! `CreateToken` action, which this crate caches with a five minute margin.
//!
//! ## Quick Start
//!
//! ```no_run
//! use aisign_aliyun::{AliyunClient, Config};
//! use aisign_core::{Context, OsEnv, Recognize, Source};
//!
//! # async fn example() -> aisign_core::Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let client = AliyunClient::new(ctx, Config::default());
//!
//! let result = client
//!     .recognize_text(&Source::from("https://example.com/receipt.png"))
//!     .await?;
//! println!("{result}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Credential Sources
//!
//! ```bash
//! export ALIBABA_CLOUD_ACCESS_KEY_ID=your-access-key-id
//! export ALIBABA_CLOUD_ACCESS_KEY_SECRET=your-access-key-secret
//! export ALIBABA_CLOUD_NLS_APP_KEY=your-nls-appkey  # Optional, for speech
//! ```

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::RequestSigner;

mod provide_credential;
pub use provide_credential::*;

mod nls_token;
pub use nls_token::{NlsToken, NlsTokenProvider, NlsTokenSigner};

mod response;

mod client;
pub use client::AliyunClient;

//! NetEase signing and recognition for aisign.
//!
//! NetEase APIs sign a form request with an MD5 digest: the business
//! parameters plus `appId`, a millisecond `timestamp` and a random `nonce`
//! are sorted by key, concatenated as `key + value` without separators, and
//! wrapped with the secret key on both sides before hashing.
//!
//! ```no_run
//! use aisign_core::{Context, OsEnv, Recognize, Source};
//! use aisign_netease::{Config, NeteaseClient};
//!
//! # async fn example() -> aisign_core::Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let client = NeteaseClient::new(ctx, Config::default());
//!
//! let result = client.recognize_text(&Source::from("https://example.com/a.png")).await?;
//! println!("{result}");
//! # Ok(())
//! # }
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

mod response;

mod client;
pub use client::NeteaseClient;

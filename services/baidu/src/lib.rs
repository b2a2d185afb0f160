//! Baidu AI Cloud signing and recognition for aisign.
//!
//! Baidu authenticates with an OAuth2 client credentials grant: the API key
//! and secret key are exchanged for a bearer token at
//! `aip.baidubce.com/oauth/2.0/token`, and every business call carries that
//! token as the `access_token` query parameter. The token lives in the
//! client's [`aisign_core::Signer`], so it is granted once, reused while
//! valid and refreshed under a lock after it expires.
//!
//! ## Quick Start
//!
//! ```no_run
//! use aisign_baidu::{BaiduClient, Config};
//! use aisign_core::{Context, OsEnv, Recognize};
//!
//! # async fn example() -> aisign_core::Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let client = BaiduClient::new(ctx, Config::default());
//!
//! let result = client.translate("你好", "zh", "en").await?;
//! println!("{result}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Credential Sources
//!
//! ```bash
//! export BAIDU_API_KEY=your-api-key
//! export BAIDU_SECRET_KEY=your-secret-key
//! export BAIDU_SPEECH_CUID=your-device-id  # Optional
//! ```

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::{Credential, Token};

mod sign_request;
pub use sign_request::RequestSigner;

mod provide_credential;
pub use provide_credential::*;

mod response;
pub use response::LexicalItem;

mod client;
pub use client::BaiduClient;

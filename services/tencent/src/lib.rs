//! Tencent Cloud signing and recognition for aisign.
//!
//! Tencent Cloud API 3.0 products authenticate with the TC3-HMAC-SHA256
//! signature. The signing key is derived by chaining HMAC-SHA256 over the
//! date, the service name and `tc3_request`, and the request is described by
//! a canonical request covering the `content-type` and `host` headers and
//! the SHA-256 of the JSON body.
//!
//! Speech recognition is an asynchronous task that the client polls, see
//! [`TaskState`] and [`PollPolicy`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use aisign_core::{Context, OsEnv, Recognize, Source};
//! use aisign_tencent::{Config, TencentClient};
//!
//! # async fn example() -> aisign_core::Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let client = TencentClient::new(ctx, Config::default());
//!
//! let result = client.tag_image(&Source::from("/tmp/cat.jpg")).await?;
//! println!("{result}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Credential Sources
//!
//! ```bash
//! export TENCENTCLOUD_SECRET_ID=your-secret-id
//! export TENCENTCLOUD_SECRET_KEY=your-secret-key
//! export TENCENTCLOUD_TOKEN=your-session-token  # Optional
//! export TENCENTCLOUD_REGION=ap-shanghai  # Optional, default ap-guangzhou
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

mod task;
pub use task::{PollPolicy, TaskState, TaskStatus};

mod response;

mod client;
pub use client::TencentClient;

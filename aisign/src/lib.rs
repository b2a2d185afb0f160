//! Signing AI vendor API requests without effort.
//!
//! `aisign` bundles the vendor crates behind feature flags and adds a
//! factory that builds a [`Recognize`] client for any [`Vendor`]:
//!
//! | Vendor | Feature | Signature |
//! |---|---|---|
//! | Aliyun | `aliyun` | ACS HMAC-SHA1 over the sorted query |
//! | Tencent | `tencent` | TC3-HMAC-SHA256 canonical request |
//! | Baidu | `baidu` | OAuth2 client credentials token |
//! | NetEase | `netease` | MD5 over the concatenated parameters |
//!
//! ```no_run
//! use aisign::{Recognize, Source, Vendor};
//!
//! # async fn example() -> aisign::Result<()> {
//! let vendor: Vendor = "tencent".parse()?;
//! let client = aisign::client(vendor, aisign::default_context())?;
//!
//! let result = client.recognize_text(&Source::from("/tmp/receipt.png")).await?;
//! println!("{result}");
//! # Ok(())
//! # }
//! ```
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use aisign_core::*;

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::{default_context, default_context_with_client};

#[cfg(feature = "aliyun")]
pub mod aliyun {
    pub use aisign_aliyun::*;
}

#[cfg(feature = "baidu")]
pub mod baidu {
    pub use aisign_baidu::*;
}

#[cfg(feature = "netease")]
pub mod netease {
    pub use aisign_netease::*;
}

#[cfg(feature = "tencent")]
pub mod tencent {
    pub use aisign_tencent::*;
}

/// Build a client for `vendor` with credentials from that vendor's default chain
/// (config, then environment variables).
pub fn client(vendor: Vendor, ctx: Context) -> Result<Box<dyn Recognize>> {
    match vendor {
        #[cfg(feature = "aliyun")]
        Vendor::Aliyun => Ok(Box::new(aliyun::AliyunClient::new(
            ctx,
            aliyun::Config::default(),
        ))),
        #[cfg(feature = "tencent")]
        Vendor::Tencent => Ok(Box::new(tencent::TencentClient::new(
            ctx,
            tencent::Config::default(),
        ))),
        #[cfg(feature = "baidu")]
        Vendor::Baidu => Ok(Box::new(baidu::BaiduClient::new(
            ctx,
            baidu::Config::default(),
        ))),
        #[cfg(feature = "netease")]
        Vendor::Netease => Ok(Box::new(netease::NeteaseClient::new(
            ctx,
            netease::Config::default(),
        ))),
        #[allow(unreachable_patterns)]
        vendor => Err(not_compiled(vendor)),
    }
}

/// Build a client for `vendor` that signs with a fixed key pair.
///
/// `id` and `secret` are the vendor's access key id and secret, secret id and
/// secret key, API key and secret key, or app id and secret key.
pub fn client_with_credential(
    vendor: Vendor,
    ctx: Context,
    id: &str,
    secret: &str,
) -> Result<Box<dyn Recognize>> {
    match vendor {
        #[cfg(feature = "aliyun")]
        Vendor::Aliyun => Ok(Box::new(aliyun::AliyunClient::with_credential_provider(
            ctx,
            aliyun::Config::default(),
            aliyun::StaticCredentialProvider::new(id, secret),
        ))),
        #[cfg(feature = "tencent")]
        Vendor::Tencent => Ok(Box::new(tencent::TencentClient::with_credential_provider(
            ctx,
            tencent::Config::default(),
            tencent::StaticCredentialProvider::new(id, secret),
        ))),
        #[cfg(feature = "baidu")]
        Vendor::Baidu => Ok(Box::new(baidu::BaiduClient::with_credential_provider(
            ctx,
            baidu::Config::default(),
            baidu::StaticCredentialProvider::new(id, secret),
        ))),
        #[cfg(feature = "netease")]
        Vendor::Netease => Ok(Box::new(netease::NeteaseClient::with_credential_provider(
            ctx,
            netease::Config::default(),
            netease::StaticCredentialProvider::new(id, secret),
        ))),
        #[allow(unreachable_patterns)]
        vendor => {
            let _ = (ctx, id, secret);
            Err(not_compiled(vendor))
        }
    }
}

fn not_compiled(vendor: Vendor) -> Error {
    Error::unsupported(format!("aisign is built without the `{vendor}` feature")).with_vendor(vendor)
}

#[cfg(all(
    test,
    feature = "aliyun",
    feature = "tencent",
    feature = "baidu",
    feature = "netease"
))]
mod tests {
    use super::*;

    #[test]
    fn test_client_matches_vendor() {
        for vendor in Vendor::ALL {
            let client = client(vendor, Context::new()).unwrap();
            assert_eq!(client.vendor(), vendor);
        }
    }

    #[test]
    fn test_only_baidu_translates() {
        for vendor in Vendor::ALL {
            let client = client(vendor, Context::new()).unwrap();
            assert_eq!(
                client.capabilities().contains(&Capability::Translate),
                vendor == Vendor::Baidu
            );
        }
    }

    #[tokio::test]
    async fn test_static_credentials_authenticate_offline() {
        for vendor in [Vendor::Aliyun, Vendor::Tencent, Vendor::Netease] {
            let client = client_with_credential(vendor, Context::new(), "id", "secret").unwrap();
            client.authenticate().await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_missing_credentials_is_auth_error() {
        let client = client(Vendor::Netease, Context::new()).unwrap();
        let err = client.authenticate().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Auth);
        assert_eq!(err.vendor(), Some(Vendor::Netease));
    }
}

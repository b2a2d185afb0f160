use crate::{Error, RecognitionResult, Result, Source};
use std::fmt;
use std::str::FromStr;

/// Vendors supported by aisign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    /// Alibaba Cloud, ACS signature.
    Aliyun,
    /// Tencent Cloud, TC3 signature.
    Tencent,
    /// Baidu AI Cloud, OAuth2 client credentials.
    Baidu,
    /// NetEase Youdao style MD5 signature.
    Netease,
}

impl Vendor {
    /// All vendors.
    pub const ALL: [Vendor; 4] = [Vendor::Aliyun, Vendor::Tencent, Vendor::Baidu, Vendor::Netease];

    /// Lowercase name of this vendor.
    pub fn as_str(&self) -> &'static str {
        match self {
            Vendor::Aliyun => "aliyun",
            Vendor::Tencent => "tencent",
            Vendor::Baidu => "baidu",
            Vendor::Netease => "netease",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vendor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Vendor::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::config_invalid(format!("unknown vendor: {s}")))
    }
}

/// Operations a vendor client may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Optical character recognition.
    RecognizeText,
    /// Image labelling.
    TagImage,
    /// Speech to text.
    Transcribe,
    /// Text translation.
    Translate,
}

/// Recognize is the capability set every vendor client implements.
///
/// Operations a vendor does not offer keep the default body, which fails
/// with [`crate::ErrorKind::Unsupported`] before touching the network.
#[async_trait::async_trait]
pub trait Recognize: fmt::Debug + Send + Sync {
    /// Vendor behind this client.
    fn vendor(&self) -> Vendor;

    /// Operations this client offers.
    fn capabilities(&self) -> &'static [Capability];

    /// Check that the client can authenticate.
    ///
    /// Loads (and caches) the credential or token without sending a business request.
    async fn authenticate(&self) -> Result<()>;

    /// Recognize text in an image.
    async fn recognize_text(&self, source: &Source) -> Result<RecognitionResult> {
        let _ = source;
        Err(unsupported(self.vendor(), Capability::RecognizeText))
    }

    /// Label an image.
    async fn tag_image(&self, source: &Source) -> Result<RecognitionResult> {
        let _ = source;
        Err(unsupported(self.vendor(), Capability::TagImage))
    }

    /// Transcribe an audio file.
    async fn transcribe(&self, source: &Source) -> Result<RecognitionResult> {
        let _ = source;
        Err(unsupported(self.vendor(), Capability::Transcribe))
    }

    /// Translate text between two languages.
    async fn translate(&self, text: &str, from: &str, to: &str) -> Result<RecognitionResult> {
        let _ = (text, from, to);
        Err(unsupported(self.vendor(), Capability::Translate))
    }
}

fn unsupported(vendor: Vendor, capability: Capability) -> Error {
    Error::unsupported(format!("{capability:?} is not offered")).with_vendor(vendor)
}

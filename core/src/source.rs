use crate::hash::base64_encode;
use crate::{Context, Error, Result};
use std::path::{Path, PathBuf};

/// Input of a recognition call.
///
/// Remote urls are handed to the vendor as a reference, never downloaded.
/// Everything else is treated as a local path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// An `http://` or `https://` url.
    Url(String),
    /// A local file.
    File(PathBuf),
}

impl Source {
    /// Classify an input string.
    pub fn parse(input: &str) -> Self {
        let lower = input.trim_start().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Source::Url(input.trim().to_string())
        } else {
            Source::File(PathBuf::from(input))
        }
    }

    /// Whether this source is a remote url.
    pub fn is_url(&self) -> bool {
        matches!(self, Source::Url(_))
    }

    /// Lowercased file extension, if this is a file with one.
    pub fn extension(&self) -> Option<String> {
        match self {
            Source::File(path) => path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.to_ascii_lowercase()),
            Source::Url(_) => None,
        }
    }

    /// Read the raw bytes of a file source.
    ///
    /// Url sources are rejected, callers that cannot pass a url through use this.
    pub async fn read_bytes(&self, ctx: &Context) -> Result<Vec<u8>> {
        match self {
            Source::File(path) => read_file(ctx, path).await,
            Source::Url(url) => Err(Error::unsupported(format!(
                "remote url {url} is not accepted here, pass a local file"
            ))),
        }
    }

    /// Turn the source into the payload sent to the vendor.
    pub async fn load(&self, ctx: &Context) -> Result<Payload> {
        match self {
            Source::Url(url) => Ok(Payload::Url(url.clone())),
            Source::File(path) => {
                let content = read_file(ctx, path).await?;
                Ok(Payload::Base64(base64_encode(&content)))
            }
        }
    }
}

async fn read_file(ctx: &Context, path: &Path) -> Result<Vec<u8>> {
    let path = path
        .to_str()
        .ok_or_else(|| Error::request_invalid(format!("path {path:?} is not valid utf-8")))?;

    ctx.file_read(path).await
}

impl From<&str> for Source {
    fn from(input: &str) -> Self {
        Source::parse(input)
    }
}

impl From<String> for Source {
    fn from(input: String) -> Self {
        Source::parse(&input)
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::File(path)
    }
}

/// Payload derived from a [`Source`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Reference field value.
    Url(String),
    /// Inline base64 content.
    Base64(String),
}

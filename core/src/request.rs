use std::str::FromStr;

use bytes::Bytes;
use http::header::{HeaderName, CONTENT_TYPE};
use http::uri::{Authority, PathAndQuery, Scheme};
use http::{HeaderMap, HeaderValue, Method, Uri};

use crate::utils::percent_encode;
use crate::{Error, Result};

/// Body of a signing request.
///
/// Bodies stay structured until [`SigningRequest::into_http`] so signers can
/// canonicalize exactly what will be transmitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    /// No body.
    #[default]
    Empty,
    /// `application/x-www-form-urlencoded` pairs, transmitted in stored order.
    Form(Vec<(String, String)>),
    /// JSON document.
    Json(serde_json::Value),
    /// Opaque bytes, for example raw audio.
    Binary(Bytes),
}

impl Body {
    /// Serialize the body into the exact bytes that go on the wire.
    pub fn to_bytes(&self) -> Result<Bytes> {
        match self {
            Body::Empty => Ok(Bytes::new()),
            Body::Form(pairs) => Ok(Bytes::from(encode_pairs(pairs))),
            Body::Json(value) => Ok(Bytes::from(serde_json::to_vec(value)?)),
            Body::Binary(bs) => Ok(bs.clone()),
        }
    }

    /// Get the form pairs if this is a form body.
    pub fn form_mut(&mut self) -> Option<&mut Vec<(String, String)>> {
        match self {
            Body::Form(pairs) => Some(pairs),
            _ => None,
        }
    }
}

/// Signing context for request.
///
/// Built once per call and consumed by [`SigningRequest::into_http`], so the
/// timestamp and nonce written by a signer are never reused.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path.
    pub path: String,
    /// HTTP query parameters, raw and in transmission order.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
    /// HTTP body.
    pub body: Body,
}

impl SigningRequest {
    /// Build a signing request from method and url.
    ///
    /// Query pairs already present in the url are decoded and kept in order.
    pub fn new(method: Method, url: &str) -> Result<Self> {
        let uri = Uri::from_str(url)?.into_parts();
        let paq = uri
            .path_and_query
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(SigningRequest {
            method,
            scheme: uri.scheme.unwrap_or(Scheme::HTTPS),
            authority: uri
                .authority
                .ok_or_else(|| Error::request_invalid("request without authority is invalid for signing"))?,
            path: paq.path().to_string(),
            query: paq
                .query()
                .map(|v| {
                    form_urlencoded::parse(v.as_bytes())
                        .map(|(k, v)| (k.into_owned(), v.into_owned()))
                        .collect()
                })
                .unwrap_or_default(),
            headers: HeaderMap::new(),
            body: Body::Empty,
        })
    }

    /// Replace the body.
    pub fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    /// Host of this request, without the port when the port is the default one.
    pub fn host(&self) -> &str {
        self.authority.as_str()
    }

    /// Push a new query pair into query list.
    #[inline]
    pub fn query_push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.push((key.into(), value.into()));
    }

    /// Insert a header, marking it sensitive when it carries a secret.
    pub fn header_insert(&mut self, name: HeaderName, value: &str, sensitive: bool) -> Result<()> {
        let mut value = HeaderValue::from_str(value)?;
        value.set_sensitive(sensitive);
        self.headers.insert(name, value);
        Ok(())
    }

    /// Get header value by name.
    ///
    /// Returns empty string if header not found.
    #[inline]
    pub fn header_get_or_default(&self, key: &HeaderName) -> Result<&str> {
        match self.headers.get(key) {
            Some(v) => v
                .to_str()
                .map_err(|e| Error::request_invalid("header value is not valid utf-8").with_source(e)),
            None => Ok(""),
        }
    }

    /// Render query pairs with the same encoding used on the wire.
    pub fn query_string(&self) -> String {
        encode_pairs(&self.query)
    }

    /// Convert into a ready to send `http::Request`.
    ///
    /// Query and form pairs are written in stored order with the RFC 3986
    /// encoder, which is the encoding every signer canonicalizes against.
    pub fn into_http(self) -> Result<http::Request<Bytes>> {
        let paq = if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query_string())
        };

        let uri = Uri::builder()
            .scheme(self.scheme)
            .authority(self.authority)
            .path_and_query(PathAndQuery::from_str(&paq)?)
            .build()?;

        let body = self.body.to_bytes()?;
        let mut headers = self.headers;
        if !headers.contains_key(CONTENT_TYPE) {
            let content_type = match &self.body {
                Body::Form(_) => Some("application/x-www-form-urlencoded"),
                Body::Json(_) => Some("application/json"),
                Body::Binary(_) => Some("application/octet-stream"),
                Body::Empty => None,
            };
            if let Some(ct) = content_type {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(ct));
            }
        }

        let mut req = http::Request::builder()
            .method(self.method)
            .uri(uri)
            .body(body)?;
        *req.headers_mut() = headers;

        Ok(req)
    }
}

/// Join pairs as `k1=v1&k2=v2` with RFC 3986 encoding of keys and values.
fn encode_pairs(pairs: &[(String, String)]) -> String {
    let mut s = String::with_capacity(16);

    for (idx, (k, v)) in pairs.iter().enumerate() {
        if idx != 0 {
            s.push('&');
        }

        s.push_str(&percent_encode(k));
        s.push('=');
        s.push_str(&percent_encode(v));
    }

    s
}

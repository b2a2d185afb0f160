use aisign_core::time::DateTime;
use aisign_core::utils::Redact;
use aisign_core::SigningCredential;
use std::fmt::{Debug, Formatter};

/// Application key pair used for the client credentials grant.
#[derive(Default, Clone)]
pub struct Credential {
    /// API key, sent as `client_id`.
    pub client_id: String,
    /// Secret key, sent as `client_secret`.
    pub client_secret: String,
}

impl Credential {
    /// Create a credential from a key pair.
    pub fn new(client_id: &str, client_secret: &str) -> Self {
        Self {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("client_id", &Redact::from(&self.client_id))
            .field("client_secret", &Redact::from(&self.client_secret))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self, _: DateTime) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

/// Bearer token issued by the OAuth2 endpoint.
#[derive(Clone)]
pub struct Token {
    /// The `access_token` value.
    pub value: String,
    /// When the grant was made.
    pub issued_at: DateTime,
    /// Instant after which the token is no longer used.
    ///
    /// Already includes the safety margin.
    pub expires_at: DateTime,
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("value", &Redact::from(&self.value))
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl SigningCredential for Token {
    fn is_valid(&self, now: DateTime) -> bool {
        !self.value.is_empty() && now < self.expires_at
    }
}

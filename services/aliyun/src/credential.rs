use aisign_core::time::DateTime;
use aisign_core::utils::Redact;
use aisign_core::SigningCredential;
use std::fmt::{Debug, Formatter};

/// Credential that holds the access_key_id and access_key_secret.
#[derive(Default, Clone)]
pub struct Credential {
    /// Access key id for aliyun services.
    pub access_key_id: String,
    /// Access key secret for aliyun services.
    pub access_key_secret: String,
}

impl Credential {
    /// Create a credential from a key pair.
    pub fn new(access_key_id: &str, access_key_secret: &str) -> Self {
        Self {
            access_key_id: access_key_id.to_string(),
            access_key_secret: access_key_secret.to_string(),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("access_key_secret", &Redact::from(&self.access_key_secret))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self, _: DateTime) -> bool {
        !self.access_key_id.is_empty() && !self.access_key_secret.is_empty()
    }
}

use aisign_core::time::DateTime;
use aisign_core::utils::Redact;
use aisign_core::SigningCredential;
use std::fmt::{Debug, Formatter};

/// Credential that holds the app id and secret key.
#[derive(Default, Clone)]
pub struct Credential {
    /// Application id.
    pub app_id: String,
    /// Secret key.
    pub secret_key: String,
}

impl Credential {
    /// Create a credential from app id and secret key.
    pub fn new(app_id: &str, secret_key: &str) -> Self {
        Self {
            app_id: app_id.to_string(),
            secret_key: secret_key.to_string(),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("app_id", &self.app_id)
            .field("secret_key", &Redact::from(&self.secret_key))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self, _: DateTime) -> bool {
        !self.app_id.is_empty() && !self.secret_key.is_empty()
    }
}

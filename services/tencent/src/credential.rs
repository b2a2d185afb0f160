use aisign_core::time::DateTime;
use aisign_core::utils::Redact;
use aisign_core::SigningCredential;
use std::fmt::{Debug, Formatter};

/// Credential for Tencent Cloud API 3.0.
#[derive(Default, Clone)]
pub struct Credential {
    /// Secret ID
    pub secret_id: String,
    /// Secret Key
    pub secret_key: String,
    /// Security token for temporary credentials
    pub security_token: Option<String>,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("secret_id", &Redact::from(&self.secret_id))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("security_token", &Redact::from(&self.security_token))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self, _: DateTime) -> bool {
        !self.secret_id.is_empty() && !self.secret_key.is_empty()
    }
}

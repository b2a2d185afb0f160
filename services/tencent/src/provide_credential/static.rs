// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::Credential;
use aisign_core::{Context, ProvideCredential, Result};
use async_trait::async_trait;

/// StaticCredentialProvider provides static Tencent Cloud credentials.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credential: Credential,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider with secret id and secret key.
    pub fn new(secret_id: &str, secret_key: &str) -> Self {
        Self {
            credential: Credential {
                secret_id: secret_id.to_string(),
                secret_key: secret_key.to_string(),
                security_token: None,
            },
        }
    }

    /// Attach a session token for temporary credentials.
    pub fn with_security_token(mut self, token: &str) -> Self {
        self.credential.security_token = Some(token.to_string());
        self
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(self.credential.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_with_security_token() {
        let cred = StaticCredentialProvider::new("id", "key")
            .with_security_token("token")
            .provide_credential(&Context::new())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(cred.secret_id, "id");
        assert_eq!(cred.security_token.as_deref(), Some("token"));
    }
}

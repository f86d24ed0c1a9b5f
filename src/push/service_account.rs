use serde::Deserialize;
use std::{fmt, path::Path};

use crate::{constants::GOOGLE_TOKEN_URL, utils::ConfigError};

/// The subset of a google service account key file needed to talk to FCM
#[derive(Clone, Deserialize)]
pub struct ServiceAccount {
    pub project_id: String,
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    GOOGLE_TOKEN_URL.to_owned()
}

impl fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("private_key", &"****")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl ServiceAccount {
    /// Read and parse the credential file, any failure is a configuration error
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let credentials_error = |reason: String| ConfigError::Credentials {
            path: path.display().to_string(),
            reason,
        };
        let content = std::fs::read_to_string(path).map_err(|e| credentials_error(e.to_string()))?;
        let account: Self =
            serde_json::from_str(&content).map_err(|e| credentials_error(e.to_string()))?;
        if account.project_id.is_empty() {
            return Err(credentials_error("project_id is empty".into()));
        }
        Ok(account)
    }
}

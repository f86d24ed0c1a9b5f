use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use super::ServiceAccount;
use crate::{constants::*, utils::get_epoch_ts};

#[derive(Debug, Serialize, Deserialize)]
struct GoogleTokenClaims {
    iss: String,
    iat: u64,
    exp: u64,
    aud: String,
    scope: String,
}

impl GoogleTokenClaims {
    fn new(account: &ServiceAccount) -> Self {
        let ts = get_epoch_ts();
        Self {
            iss: account.client_email.clone(),
            iat: ts,
            exp: ts + GOOGLE_JWT_VALIDITY_SECS,
            aud: account.token_uri.clone(),
            scope: FIREBASE_MESSAGE_SCOPE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GoogleTokenResponse {
    access_token: String,
    expires_in: u64,
}

/// OAuth2 access token for the service account, fetched lazily and reused until close to expiry
pub struct GoogleAuthToken {
    account: ServiceAccount,
    access_token: Option<String>,
    valid_till: Option<u64>,
    signing_key: Option<EncodingKey>,
}

impl GoogleAuthToken {
    pub fn new(account: ServiceAccount) -> Self {
        Self {
            account,
            access_token: None,
            valid_till: None,
            signing_key: None,
        }
    }

    pub async fn get_access_token(&mut self, client: &reqwest::Client) -> anyhow::Result<&str> {
        if self.is_new_token_required() {
            self.new_access_token(client).await?;
        }
        self.access_token
            .as_deref()
            .ok_or(anyhow::anyhow!("access_token not found"))
    }

    fn get_signing_key(&mut self) -> anyhow::Result<&EncodingKey> {
        if self.signing_key.is_none() {
            let key = EncodingKey::from_rsa_pem(self.account.private_key.as_bytes())?;
            self.signing_key = Some(key);
        }
        let signing_key = self
            .signing_key
            .as_ref()
            .ok_or(anyhow::anyhow!("signing_key not found"))?;
        Ok(signing_key)
    }

    fn is_new_token_required(&self) -> bool {
        match (&self.access_token, self.valid_till) {
            (Some(_), Some(valid_till)) => get_epoch_ts() >= valid_till,
            _ => true,
        }
    }

    async fn new_access_token(&mut self, client: &reqwest::Client) -> anyhow::Result<()> {
        let signed_jwt = self.new_jwt()?;
        let params = [
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", signed_jwt.as_str()),
        ];
        tracing::debug!("requesting new access token from {}", self.account.token_uri);
        let response = client
            .post(&self.account.token_uri)
            .form(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<GoogleTokenResponse>()
            .await?;
        let ts = get_epoch_ts();
        let valid_till = (ts + response.expires_in).saturating_sub(ACCESS_TOKEN_EXPIRY_MARGIN_SECS);
        self.access_token = Some(response.access_token);
        self.valid_till = Some(valid_till);

        Ok(())
    }

    fn new_jwt(&mut self) -> anyhow::Result<String> {
        let claims = GoogleTokenClaims::new(&self.account);
        let key = self.get_signing_key()?;
        let header = Header::new(Algorithm::RS256);
        let jwt = encode(&header, &claims, key)?;
        Ok(jwt)
    }
}

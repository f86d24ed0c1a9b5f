use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::Path};
use tokio::sync::Mutex;

use super::{google_auth_token::GoogleAuthToken, MessagingClient, ServiceAccount};
use crate::{
    constants::FCM_BASE_URL,
    models::AppNotification,
    utils::{ConfigError, DeliveryError},
};

#[derive(Debug, Serialize)]
struct PushMessageNotification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct PushMessage<'a> {
    token: &'a str,
    notification: PushMessageNotification<'a>,
    data: &'a HashMap<String, String>,
}

#[derive(Debug, Serialize)]
struct PushPayload<'a> {
    message: PushMessage<'a>,
}

impl<'a> PushPayload<'a> {
    fn new(notification: &'a AppNotification) -> Self {
        let message = PushMessage {
            token: &notification.token,
            notification: PushMessageNotification {
                title: &notification.title,
                body: &notification.body,
            },
            data: &notification.data,
        };
        Self { message }
    }
}

#[derive(Debug, Deserialize)]
struct PushResponse {
    name: String,
}

/// Firebase Cloud Messaging client using the HTTP v1 API
pub struct FcmClient {
    client: reqwest::Client,
    send_url: String,
    google_auth_token: Mutex<GoogleAuthToken>,
}

impl FcmClient {
    pub fn new(account: ServiceAccount) -> Self {
        Self::with_base_url(account, FCM_BASE_URL)
    }

    /// Same as `new` but sending to another FCM compatible host
    pub fn with_base_url(account: ServiceAccount, base_url: &str) -> Self {
        let send_url = format!(
            "{}/v1/projects/{}/messages:send",
            base_url.trim_end_matches('/'),
            account.project_id
        );
        Self {
            client: reqwest::Client::new(),
            send_url,
            google_auth_token: Mutex::new(GoogleAuthToken::new(account)),
        }
    }

    pub fn from_credentials_file(path: &Path) -> Result<Self, ConfigError> {
        let account = ServiceAccount::from_file(path)?;
        tracing::debug!("loaded service account for project {}", account.project_id);
        Ok(Self::new(account))
    }

    pub fn send_url(&self) -> &str {
        &self.send_url
    }

    async fn access_token(&self) -> Result<String, DeliveryError> {
        let mut google_auth_token = self.google_auth_token.lock().await;
        let token = google_auth_token
            .get_access_token(&self.client)
            .await
            .map_err(|e| DeliveryError::Auth(format!("{e:#}")))?;
        Ok(token.to_owned())
    }
}

#[async_trait]
impl MessagingClient for FcmClient {
    async fn send(&self, notification: &AppNotification) -> Result<String, DeliveryError> {
        let access_token = self.access_token().await?;
        let payload = PushPayload::new(notification);
        let res = self
            .client
            .post(&self.send_url)
            .bearer_auth(access_token)
            .json(&payload)
            .send()
            .await?;
        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            return Err(DeliveryError::Rejected { status, body });
        }
        let response: PushResponse = serde_json::from_str(&body)?;
        Ok(response.name)
    }
}

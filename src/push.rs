use async_trait::async_trait;

use crate::{models::AppNotification, utils::DeliveryError};

#[cfg(test)]
use mockall::automock;

pub mod google_auth_token;
pub mod push_message;
pub mod service_account;

pub use push_message::FcmClient;
pub use service_account::ServiceAccount;

/// Anything able to deliver a push notification to a device.
/// Returns the delivery id assigned by the provider.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessagingClient: Send + Sync {
    async fn send(&self, notification: &AppNotification) -> Result<String, DeliveryError>;
}

/// Client used for dry runs, it only logs what would have been sent
#[derive(Debug, Default)]
pub struct DryRunClient;

#[async_trait]
impl MessagingClient for DryRunClient {
    async fn send(&self, notification: &AppNotification) -> Result<String, DeliveryError> {
        tracing::info!(
            token = %notification.token,
            title = %notification.title,
            body = %notification.body,
            "dry run, notification not sent"
        );
        Ok(format!("dry-run:{}", notification.token))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[tokio::test]
    async fn test_dry_run_client() {
        let notification = AppNotification {
            title: "title".into(),
            body: "body".into(),
            token: "device-1".into(),
            data: HashMap::new(),
        };
        let id = DryRunClient.send(&notification).await.unwrap();
        assert_eq!(id, "dry-run:device-1");
    }
}

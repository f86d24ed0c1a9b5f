use chrono::{DateTime, Utc};

use super::expiring_loans::{build_notification, group_expiring_loans};
use crate::{
    localization::NotificationTexts,
    models::Loan,
    push::MessagingClient,
    utils::DeliveryError,
};

/// Delivery id on success
pub type DeliveryResult = Result<String, DeliveryError>;

#[derive(Debug, Default)]
pub struct NotifyOutcome {
    pub invalid_dates: usize,
    pub missing_tokens: usize,
    pub qualifying: usize,
    /// one entry per device token
    pub deliveries: Vec<(String, DeliveryResult)>,
}

impl NotifyOutcome {
    pub fn sent(&self) -> usize {
        self.deliveries.iter().filter(|(_, r)| r.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.deliveries.len() - self.sent()
    }
}

/// Send one reminder per device for every loan due within the window.
/// A failed delivery is logged and does not stop the remaining ones.
pub async fn notify_expiring(
    client: &dyn MessagingClient,
    loans: &[Loan],
    now: DateTime<Utc>,
    texts: &NotificationTexts,
) -> NotifyOutcome {
    let expiring = group_expiring_loans(loans, now);
    let mut outcome = NotifyOutcome {
        invalid_dates: expiring.invalid_dates,
        missing_tokens: expiring.missing_tokens,
        qualifying: expiring.qualifying(),
        deliveries: Vec::with_capacity(expiring.groups.len()),
    };
    for (token, loans) in &expiring.groups {
        let notification = build_notification(token, loans, texts);
        let result = client.send(&notification).await;
        match &result {
            Ok(id) => tracing::info!("notification sent to {}: {}", token, id),
            Err(err) => tracing::warn!("failed to send notification to {}: {}", token, err),
        }
        outcome.deliveries.push((token.clone(), result));
    }
    outcome
}

use chrono::{DateTime, Utc};

use crate::{
    config::Config,
    localization::NotificationTexts,
    push::{DryRunClient, FcmClient, MessagingClient},
    utils::{ConfigError, FetchError},
};

pub mod expiring_loans;
pub mod fetch_loans;
pub mod notifier;

pub use fetch_loans::LoanFetcher;
pub use notifier::{notify_expiring, DeliveryResult, NotifyOutcome};

/// Summary of a single job run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub fetched: usize,
    pub invalid_dates: usize,
    pub missing_tokens: usize,
    pub qualifying: usize,
    pub notifications: usize,
    pub sent: usize,
    pub failed: usize,
}

/// Pick the messaging client for this run. Dry runs never touch the credential file.
pub fn build_messaging_client(config: &Config) -> Result<Box<dyn MessagingClient>, ConfigError> {
    if config.dry_run {
        tracing::info!("dry run enabled, notifications will only be logged");
        return Ok(Box::new(DryRunClient));
    }
    let client = FcmClient::from_credentials_file(&config.credentials_path)?;
    Ok(Box::new(client))
}

/// Fetch the loans then remind every borrower device with loans about to expire.
/// Only a failed fetch aborts the run.
pub async fn loan_expiration_job(
    fetcher: &LoanFetcher,
    client: &dyn MessagingClient,
    texts: &NotificationTexts,
    now: DateTime<Utc>,
) -> Result<JobReport, FetchError> {
    tracing::debug!("running loan expiration job at {}", now);
    let loans = fetcher.fetch_loans().await?;
    let outcome = notify_expiring(client, &loans, now, texts).await;
    let report = JobReport {
        fetched: loans.len(),
        invalid_dates: outcome.invalid_dates,
        missing_tokens: outcome.missing_tokens,
        qualifying: outcome.qualifying,
        notifications: outcome.deliveries.len(),
        sent: outcome.sent(),
        failed: outcome.failed(),
    };
    tracing::info!(
        fetched = report.fetched,
        invalid_dates = report.invalid_dates,
        missing_tokens = report.missing_tokens,
        qualifying = report.qualifying,
        sent = report.sent,
        failed = report.failed,
        "loan expiration job finished"
    );
    Ok(report)
}

use anyhow::Context;
use chrono::Utc;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use jobs::{build_messaging_client, loan_expiration_job, JobReport, LoanFetcher};

pub mod config;
pub mod constants;
pub mod jobs;
pub mod localization;
pub mod models;
pub mod push;
pub mod utils;

/// Entry point of the job: one fetch, then one notification per device.
/// Fatal errors are returned with their context chain and reported once by the caller.
pub async fn run() -> anyhow::Result<JobReport> {
    // import .env file
    dotenv().ok();
    initialize_logging();
    let config = Config::load().context("invalid configuration")?;
    run_with_config(&config).await
}

pub async fn run_with_config(config: &Config) -> anyhow::Result<JobReport> {
    tracing::info!("starting loan expiration job with {:?}", config);
    let client = build_messaging_client(config).context("unable to configure messaging")?;
    let fetcher = LoanFetcher::from_config(config);
    let texts = config.locale.texts();
    let report = loan_expiration_job(&fetcher, client.as_ref(), &texts, Utc::now())
        .await
        .context("unable to fetch loans")?;
    Ok(report)
}

fn initialize_logging() {
    // create default env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or(constants::DEFAULT_LOG_FILTER.into());

    // logs go to stderr, the job has no other output
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

use reqwest::StatusCode;

use crate::{
    config::Config,
    constants::API_KEY_HEADER,
    models::{Loan, LoansResponse},
    utils::FetchError,
};

/// Retrieves the loan list from the loans API
pub struct LoanFetcher {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl LoanFetcher {
    pub fn new(api_url: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.to_owned(),
            api_key: api_key.to_owned(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_url, &config.api_key)
    }

    /// Single GET authenticated with the `x-api-key` header.
    /// Anything but a 200 with the expected envelope is an error.
    pub async fn fetch_loans(&self) -> Result<Vec<Loan>, FetchError> {
        tracing::debug!("fetching loans from {}", self.api_url);
        let res = self
            .client
            .get(&self.api_url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;
        let status = res.status();
        if status != StatusCode::OK {
            return Err(FetchError::HttpStatus(status));
        }
        let body = res.bytes().await?;
        let response: LoansResponse = serde_json::from_slice(&body)?;
        tracing::info!(
            success = response.success,
            count = response.count,
            received = response.data.len(),
            "loans fetched: {}",
            response.message
        );
        Ok(response.data)
    }
}

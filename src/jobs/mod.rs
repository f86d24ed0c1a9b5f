pub mod loan_expiration;

pub use loan_expiration::{build_messaging_client, loan_expiration_job, JobReport, LoanFetcher};

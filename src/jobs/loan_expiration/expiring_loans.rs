use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};

use crate::{
    constants::*,
    localization::NotificationTexts,
    models::{AppNotification, Loan},
    utils::{days_until, format_due_date, parse_return_date},
};

/// A loan whose return date falls inside the reminder window
#[derive(Debug, Clone, PartialEq)]
pub struct ExpiringLoan {
    pub loan: Loan,
    pub return_date: DateTime<Utc>,
    pub days_left: f64,
}

/// Expiring loans grouped by the device they must be reported to
#[derive(Debug, Default)]
pub struct ExpiringLoans {
    pub groups: BTreeMap<String, Vec<ExpiringLoan>>,
    pub invalid_dates: usize,
    pub missing_tokens: usize,
}

impl ExpiringLoans {
    pub fn qualifying(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Both ends inclusive, overdue loans are not part of the window
pub fn is_within_window(days_left: f64) -> bool {
    (0.0..=EXPIRATION_WINDOW_DAYS).contains(&days_left)
}

pub fn group_expiring_loans(loans: &[Loan], now: DateTime<Utc>) -> ExpiringLoans {
    let mut expiring = ExpiringLoans::default();
    for loan in loans {
        let return_date = match parse_return_date(&loan.return_date) {
            Ok(date) => date,
            Err(err) => {
                tracing::warn!("skipping loan {}: {}", loan.id, err);
                expiring.invalid_dates += 1;
                continue;
            }
        };
        let days_left = days_until(return_date, now);
        if !is_within_window(days_left) {
            tracing::debug!("loan {} outside window ({:.2} days left)", loan.id, days_left);
            continue;
        }
        // tokens are opaque, whitespace only matters for the blank check
        if loan.device_token.trim().is_empty() {
            tracing::warn!("skipping loan {}: no device token", loan.id);
            expiring.missing_tokens += 1;
            continue;
        }
        tracing::debug!("loan {} expiring in {:.2} days", loan.id, days_left);
        expiring
            .groups
            .entry(loan.device_token.clone())
            .or_default()
            .push(ExpiringLoan {
                loan: loan.clone(),
                return_date,
                days_left,
            });
    }
    expiring
}

/// One line per loan, e.g. `- Maria (Due: 05/01/2024)`
pub fn build_body(loans: &[ExpiringLoan], texts: &NotificationTexts) -> String {
    let mut body = String::new();
    if let Some(header) = texts.header {
        body.push_str(header);
        body.push('\n');
    }
    for expiring in loans {
        body.push_str(&format!(
            "- {} ({}: {})\n",
            expiring.loan.applicant,
            texts.due_label,
            format_due_date(expiring.return_date)
        ));
    }
    body
}

pub fn build_notification(
    token: &str,
    loans: &[ExpiringLoan],
    texts: &NotificationTexts,
) -> AppNotification {
    let data = HashMap::from([(
        NOTIFICATION_ROUTE_KEY.to_string(),
        NOTIFICATION_ROUTE.to_string(),
    )]);
    AppNotification {
        title: texts.title.to_string(),
        body: build_body(loans, texts),
        token: token.to_string(),
        data,
    }
}

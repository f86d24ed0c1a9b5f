use std::collections::HashMap;

/// Push notification addressed to a single device
#[derive(Debug, Clone, PartialEq)]
pub struct AppNotification {
    pub title: String,
    pub body: String,
    pub token: String,
    pub data: HashMap<String, String>,
}

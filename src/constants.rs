pub const API_KEY_HEADER: &str = "x-api-key";
pub const RETURN_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%6fZ";
pub const DUE_DATE_DISPLAY_FORMAT: &str = "%d/%m/%Y";
pub const EXPIRATION_WINDOW_DAYS: f64 = 7.0;
pub const NOTIFICATION_ROUTE_KEY: &str = "route";
pub const NOTIFICATION_ROUTE: &str = "/ptd/loans";

pub const DEFAULT_CREDENTIALS_PATH: &str = "./hubapp.json";
pub const DEFAULT_LOG_FILTER: &str = "loan_expiration_notifier=info";

pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const FIREBASE_MESSAGE_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";
pub const FCM_BASE_URL: &str = "https://fcm.googleapis.com";
pub const GOOGLE_JWT_VALIDITY_SECS: u64 = 3600;
// refresh the access token this long before google says it expires
pub const ACCESS_TOKEN_EXPIRY_MARGIN_SECS: u64 = 15 * 60;

pub const ENV_API_URL: &str = "API_URL";
pub const ENV_API_KEY: &str = "API_KEY";
pub const ENV_CREDENTIALS_PATH: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const ENV_LOCALE: &str = "NOTIFICATION_LOCALE";
pub const ENV_DRY_RUN: &str = "DRY_RUN";

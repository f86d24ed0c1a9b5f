pub mod error_handler;
pub mod misc;

pub use error_handler::{ConfigError, DateParseError, DeliveryError, FetchError};
pub use misc::*;

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::utils::null_as_default;

/// Loan record as served by the loans API.
/// The API declares most fields nullable, a `null` or missing value decodes to the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Loan {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub return_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub reason: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_active: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub item: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub applicant: String,
    #[serde(deserialize_with = "null_as_default")]
    pub dependent: String,
    #[serde(deserialize_with = "null_as_default")]
    pub responsible: String,
    #[serde(deserialize_with = "null_as_default")]
    pub device_token: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
}

/// Envelope wrapping the loan list. Only `data` is used, the rest is informational.
#[derive(Debug, Default, Serialize)]
pub struct LoansResponse {
    pub success: bool,
    pub count: i64,
    pub data: Vec<Loan>,
    pub message: String,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawLoansResponse {
    #[serde(deserialize_with = "null_as_default")]
    success: bool,
    #[serde(deserialize_with = "null_as_default")]
    count: i64,
    #[serde(deserialize_with = "null_as_default")]
    data: Vec<Loan>,
    #[serde(deserialize_with = "null_as_default")]
    message: String,
}

// Derived struct visitors also accept positional arrays, so `[]` would decode
// as an empty envelope. Only a JSON object is a valid response.
impl<'de> Deserialize<'de> for LoansResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        let raw = RawLoansResponse::deserialize(Value::Object(fields)).map_err(D::Error::custom)?;
        Ok(Self {
            success: raw.success,
            count: raw.count,
            data: raw.data,
            message: raw.message,
        })
    }
}

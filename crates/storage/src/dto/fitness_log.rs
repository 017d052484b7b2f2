use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Caller-supplied user identifier. The wire format accepts either a JSON
/// string or a JSON integer; both are stored under the same text key, so
/// `1` and `"1"` address the same user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum UserId {
    Text(String),
    Number(i64),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Request payload for creating a log entry. All four fields are required;
/// `reps` and `weight` accept zero, only absence is rejected.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateLogRequest {
    #[validate(custom(function = "validate_user_id"))]
    pub user_id: Option<UserId>,

    #[validate(length(min = 1, message = "action must be a non-empty string"))]
    pub action: Option<String>,

    pub reps: Option<i32>,

    pub weight: Option<Decimal>,
}

/// Request payload for listing a user's entries within a named period
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct PeriodQueryRequest {
    #[validate(custom(function = "validate_user_id"))]
    pub user_id: Option<UserId>,

    /// One of `today`, `week`, `month`, `quarter`.
    pub period: Option<String>,
}

/// Request payload for retracting a user's most recent entry
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct DeleteLastRequest {
    #[validate(custom(function = "validate_user_id"))]
    pub user_id: Option<UserId>,
}

/// Acknowledgment returned by the retraction endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteLastResponse {
    pub success: bool,
    pub message: String,
}

// Validation helper. The empty string and numeric zero are rejected;
// the string "0" is a valid key.
fn validate_user_id(user_id: &UserId) -> Result<(), validator::ValidationError> {
    match user_id {
        UserId::Text(s) if s.is_empty() => {
            let mut err = validator::ValidationError::new("empty");
            err.message = Some("user_id must not be empty".into());
            Err(err)
        }
        UserId::Number(0) => {
            let mut err = validator::ValidationError::new("zero");
            err.message = Some("user_id must not be zero".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

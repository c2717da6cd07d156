use chrono::{DateTime, Utc};
use group_service_domain::FieldError;
use serde::{Deserialize, Serialize};

/// Outcome marker carried by every envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Response envelope shared by every group endpoint.
///
/// `data` is always present and is `null` on errors and on updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    pub data: Option<T>,
    pub messages: Vec<FieldError>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            data: Some(data),
            messages: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self {
            status: ResponseStatus::Success,
            data: None,
            messages: Vec::new(),
        }
    }

    pub fn error(messages: Vec<FieldError>) -> Self {
        Self {
            status: ResponseStatus::Error,
            data: None,
            messages,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupGetQuery {
    #[serde(rename = "shortName")]
    pub short_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

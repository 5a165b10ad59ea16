//! API response envelopes
//!
//! Every endpoint answers with the same `{ success, data | error }`
//! envelope; paginated endpoints add page metadata next to the items.

use serde::{Deserialize, Serialize};

use super::pagination::PageMeta;

/// Error payload carried inside a failed envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Stable numeric error code
    pub code: u16,

    /// Human-readable message
    pub message: String,

    /// Optional per-field details for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

/// Standard response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(code: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody {
                code,
                message: message.into(),
                details: None,
            }),
        }
    }

    pub fn failure_with_details(
        code: u16,
        message: impl Into<String>,
        details: Vec<String>,
    ) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody {
                code,
                message: message.into(),
                details: Some(details),
            }),
        }
    }
}

/// Envelope for paginated list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedApiResponse<T> {
    pub success: bool,
    pub items: Vec<T>,

    #[serde(flatten)]
    pub meta: PageMeta,
}

impl<T> PaginatedApiResponse<T> {
    pub fn new(items: Vec<T>, meta: PageMeta) -> Self {
        Self {
            success: true,
            items,
            meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_omits_error() {
        let json = serde_json::to_value(ApiResponse::success(42)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 42);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn failure_envelope_omits_data() {
        let json = serde_json::to_value(ApiResponse::<()>::failure(4001, "not found")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], 4001);
        assert!(json.get("data").is_none());
    }

    #[test]
    fn paginated_envelope_flattens_meta() {
        use crate::types::Pagination;

        let meta = PageMeta::new(&Pagination::new(1, 10), 3);
        let json = serde_json::to_value(PaginatedApiResponse::new(vec![1, 2, 3], meta)).unwrap();
        assert_eq!(json["items"].as_array().unwrap().len(), 3);
        assert_eq!(json["totalCount"], 3);
        assert_eq!(json["hasNext"], false);
    }
}

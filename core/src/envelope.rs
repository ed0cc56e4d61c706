//! Wire envelopes wrapping every catalog response.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, ErrorInfo};

/// Success wrapper: `{"code": 200, "status": "OK", "data": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub code: i32,
    pub status: String,
    pub data: T,
}

/// Failure wrapper returned with non-2xx statuses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub code: i32,
    pub status: String,
    #[serde(default)]
    pub error: String,
    pub error_code: i32,
    #[serde(default)]
    pub error_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_details: Option<BTreeMap<String, Vec<String>>>,
}

impl From<ErrorEnvelope> for ErrorInfo {
    fn from(envelope: ErrorEnvelope) -> Self {
        ErrorInfo {
            http_code: envelope.code,
            http_status: envelope.status,
            error_code: ErrorCode::from(envelope.error_code),
            error_name: envelope.error,
            message: envelope.error_message,
            error_details: envelope.error_details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_maps_every_field() {
        let raw = r#"{
            "code": 400,
            "status": "BadRequest",
            "error": "InvalidParams",
            "errorCode": 1000,
            "errorMessage": "Invalid input parameters",
            "errorDetails": {"Item.Id": ["The Id field is required."]}
        }"#;
        let envelope: ErrorEnvelope = serde_json::from_str(raw).unwrap();
        let info = ErrorInfo::from(envelope);
        assert_eq!(info.http_code, 400);
        assert_eq!(info.http_status, "BadRequest");
        assert_eq!(info.error_code, ErrorCode::InvalidParams);
        assert_eq!(info.error_name, "InvalidParams");
        assert_eq!(info.message, "Invalid input parameters");
        let details = info.error_details.unwrap();
        assert_eq!(details["Item.Id"], vec!["The Id field is required."]);
    }

    #[test]
    fn error_envelope_without_details() {
        let raw = r#"{"code":401,"status":"Unauthorized","error":"NotAuthenticated","errorCode":1074,"errorMessage":"no token"}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(raw).unwrap();
        assert!(envelope.error_details.is_none());
    }

    #[test]
    fn success_envelope_requires_data() {
        let result: Result<Envelope<serde_json::Value>, _> =
            serde_json::from_str(r#"{"code":200,"status":"OK"}"#);
        assert!(result.is_err());
    }
}

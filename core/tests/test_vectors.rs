//! Verify response parsing against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector describes a simulated response and the expected outcome.
//! Successful outcomes are compared as typed values, failures field by field
//! through the uniform `ErrorInfo` shape.

use std::collections::BTreeMap;

use economy_core::{parse_response, ApiError, GetItemResponse, HttpResponse};

fn simulated_response(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

#[test]
fn dispatch_test_vectors() {
    let raw = include_str!("../../test-vectors/dispatch.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let result = parse_response::<GetItemResponse>(simulated_response(case));
        let expected = &case["expected"];

        if let Some(ok) = expected.get("ok") {
            let expected: GetItemResponse = serde_json::from_value(ok.clone()).unwrap();
            assert_eq!(result.as_ref().ok(), Some(&expected), "{name}: parsed result");
            continue;
        }

        let want = &expected["error"];
        let err = result.expect_err(name);
        match want["kind"].as_str().unwrap() {
            "Api" => assert!(matches!(err, ApiError::Api(_)), "{name}: kind"),
            "Unknown" => assert!(matches!(err, ApiError::Unknown { .. }), "{name}: kind"),
            other => panic!("{name}: unexpected kind {other}"),
        }

        let info = err.info();
        assert_eq!(i64::from(info.http_code), want["httpCode"].as_i64().unwrap(), "{name}: httpCode");
        assert_eq!(
            i64::from(info.error_code.code()),
            want["errorCode"].as_i64().unwrap(),
            "{name}: errorCode"
        );
        if let Some(message) = want.get("message") {
            assert_eq!(info.message, message.as_str().unwrap(), "{name}: message");
        }
        if let Some(details) = want.get("errorDetails") {
            let details: BTreeMap<String, Vec<String>> =
                serde_json::from_value(details.clone()).unwrap();
            assert_eq!(info.error_details, Some(details), "{name}: errorDetails");
        } else {
            assert!(info.error_details.is_none(), "{name}: errorDetails");
        }
    }
}

//! Verify form encoding and response parsing against JSON test vectors stored
//! in `test-vectors/`.
//!
//! Decoded bodies are compared as parsed JSON, not raw strings, so key order
//! in the vectors does not matter.

use std::io::Cursor;

use util_core::{encode_form, ClientConfig, FormData, Headers, HttpClient, HttpError, HttpResponse};

// ---------------------------------------------------------------------------
// Form encoding
// ---------------------------------------------------------------------------

#[test]
fn form_test_vectors() {
    let raw = include_str!("../../test-vectors/form.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input: FormData = serde_json::from_value(case["input"].clone()).unwrap();

        let encoded = encode_form(&input).unwrap();
        assert_eq!(encoded, case["expected"].as_str().unwrap(), "{name}: encoded body");
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let client = HttpClient::new(ClientConfig::default());
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let status = case["status"].as_u64().unwrap() as u16;
        let body = case["body"].as_str().unwrap().to_string();

        let mut headers = Headers::new();
        headers.insert("content-type".to_string(), vec!["application/json".to_string()]);
        let response = HttpResponse::new(status, headers.clone(), Cursor::new(body));
        let result = client.parse_json(response);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "UnexpectedStatus" => {
                    assert_eq!(err.status(), Some(status), "{name}: expected UnexpectedStatus")
                }
                "Decode" => assert!(matches!(err, HttpError::Decode(_)), "{name}: expected Decode"),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            let parsed = result.unwrap();
            assert_eq!(
                serde_json::Value::Object(parsed.body),
                case["expected_body"],
                "{name}: parsed body"
            );
            assert_eq!(parsed.headers, headers, "{name}: headers");
            assert_eq!(parsed.status, 200, "{name}: status");
        }
    }
}

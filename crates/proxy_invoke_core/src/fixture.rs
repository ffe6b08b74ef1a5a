//! The fixed `GET /health` event used for local smoke runs.

use crate::contract::{
    ProxyRequest, ProxyRequestContext, RequestIdentity, StringMap, JSON_CONTENT_TYPE,
};

pub const HEALTH_PATH: &str = "/health";
pub const PLACEHOLDER_ACCOUNT_ID: &str = "123456789012";
pub const PLACEHOLDER_RESOURCE_ID: &str = "abc123";
pub const PLACEHOLDER_STAGE: &str = "prod";
pub const PLACEHOLDER_REQUEST_ID: &str = "test-request-id";
pub const PLACEHOLDER_SOURCE_IP: &str = "127.0.0.1";
pub const PLACEHOLDER_API_ID: &str = "test-api-id";

/// Wire form of [`health_check_request`], byte for byte.
pub const HEALTH_CHECK_REQUEST_JSON: &str = r#"{
  "resource": "/health",
  "path": "/health",
  "httpMethod": "GET",
  "headers": {
    "Accept": "application/json",
    "Content-Type": "application/json"
  },
  "queryStringParameters": null,
  "pathParameters": null,
  "stageVariables": null,
  "requestContext": {
    "accountId": "123456789012",
    "resourceId": "abc123",
    "stage": "prod",
    "requestId": "test-request-id",
    "identity": {
      "sourceIp": "127.0.0.1"
    },
    "resourcePath": "/health",
    "httpMethod": "GET",
    "apiId": "test-api-id"
  },
  "body": null,
  "isBase64Encoded": false
}
"#;

pub fn health_check_request() -> ProxyRequest {
    ProxyRequest {
        resource: HEALTH_PATH.to_string(),
        path: HEALTH_PATH.to_string(),
        http_method: "GET".to_string(),
        headers: Some(StringMap::from([
            ("Accept".to_string(), JSON_CONTENT_TYPE.to_string()),
            ("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string()),
        ])),
        query_string_parameters: None,
        path_parameters: None,
        stage_variables: None,
        request_context: ProxyRequestContext {
            account_id: PLACEHOLDER_ACCOUNT_ID.to_string(),
            resource_id: PLACEHOLDER_RESOURCE_ID.to_string(),
            stage: PLACEHOLDER_STAGE.to_string(),
            request_id: PLACEHOLDER_REQUEST_ID.to_string(),
            identity: RequestIdentity {
                source_ip: PLACEHOLDER_SOURCE_IP.to_string(),
            },
            resource_path: HEALTH_PATH.to_string(),
            http_method: "GET".to_string(),
            api_id: PLACEHOLDER_API_ID.to_string(),
        },
        body: None,
        is_base64_encoded: false,
    }
}

/// Pretty-printed request text as handed to a handler: two-space indent,
/// trailing newline.
pub fn request_payload(request: &ProxyRequest) -> Result<String, serde_json::Error> {
    let mut text = serde_json::to_string_pretty(request)?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_fixture_matches_pinned_literal() {
        let payload = request_payload(&health_check_request()).expect("fixture should serialize");
        assert_eq!(payload, HEALTH_CHECK_REQUEST_JSON);
    }

    #[test]
    fn pinned_literal_parses_back_to_fixture() {
        let parsed: ProxyRequest =
            serde_json::from_str(HEALTH_CHECK_REQUEST_JSON).expect("literal should parse");
        assert_eq!(parsed, health_check_request());
    }

    #[test]
    fn fixture_is_stable_across_calls() {
        assert_eq!(health_check_request(), health_check_request());
        assert_eq!(
            request_payload(&health_check_request()).expect("fixture should serialize"),
            request_payload(&health_check_request()).expect("fixture should serialize"),
        );
    }
}

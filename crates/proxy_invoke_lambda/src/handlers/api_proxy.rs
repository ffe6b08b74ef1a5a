use std::io::{self, Read, Write};

use proxy_invoke_core::contract::{ProxyRequest, ProxyResponse};
use proxy_invoke_core::fixture::HEALTH_PATH;
use serde_json::{json, Value};

use crate::adapters::context::InvocationContext;
use crate::adapters::stream_handler::StreamHandler;
use crate::error::InvocationError;

const HEALTH_METHODS: &str = "GET, HEAD";
const HOSTLESS_REQUEST_ID: &str = "local";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiHandlerConfig {
    /// Prefix stripped from incoming paths, e.g. a stage name left in the
    /// path by a custom domain mapping.
    pub base_path: Option<String>,
}

impl ApiHandlerConfig {
    pub fn with_base_path(base_path: &str) -> Self {
        let trimmed = base_path.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Self::default();
        }

        let normalized = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };
        Self {
            base_path: Some(normalized),
        }
    }
}

/// Proxy handler serving the service's health endpoint.
#[derive(Debug, Clone, Default)]
pub struct ApiProxyHandler {
    config: ApiHandlerConfig,
}

impl ApiProxyHandler {
    pub fn new(config: ApiHandlerConfig) -> Self {
        Self { config }
    }

    pub fn route(&self, request: &ProxyRequest) -> ProxyResponse {
        let path = self.resolve_path(request.effective_path());
        let method = request.http_method.to_ascii_uppercase();

        if path != HEALTH_PATH {
            return error_response(
                404,
                json!({
                    "error": "not_found",
                    "message": format!("No route for {method} {path}"),
                }),
            );
        }

        match method.as_str() {
            "GET" => ProxyResponse::json(200, json!({"status": "ok"}).to_string()),
            "HEAD" => ProxyResponse::json(200, ""),
            _ => error_response(
                405,
                json!({
                    "error": "method_not_allowed",
                    "message": format!("{method} is not supported on {path}"),
                }),
            )
            .with_header("Allow", HEALTH_METHODS),
        }
    }

    fn resolve_path(&self, raw_path: &str) -> String {
        let mut path = raw_path;
        if let Some(base_path) = &self.config.base_path {
            if let Some(rest) = path.strip_prefix(base_path.as_str()) {
                if rest.is_empty() || rest.starts_with('/') {
                    path = rest;
                }
            }
        }

        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        }
    }
}

impl StreamHandler for ApiProxyHandler {
    fn handle_request(
        &self,
        input: &mut dyn Read,
        output: &mut dyn Write,
        context: Option<&dyn InvocationContext>,
    ) -> Result<(), InvocationError> {
        let mut raw_event = Vec::new();
        input.read_to_end(&mut raw_event)?;

        let request_id = context
            .map(|value| value.request_id())
            .unwrap_or(HOSTLESS_REQUEST_ID);
        let remaining_ms = context.map(|value| value.remaining_time().as_millis());

        let response = match serde_json::from_slice::<ProxyRequest>(&raw_event) {
            Ok(request) => {
                let response = self.route(&request);
                log_handler_info(
                    "request_routed",
                    json!({
                        "request_id": request_id,
                        "method": request.http_method.as_str(),
                        "path": request.effective_path(),
                        "status_code": response.status_code,
                        "remaining_ms": remaining_ms,
                    }),
                );
                response
            }
            Err(error) => {
                log_handler_error(
                    "malformed_event",
                    json!({
                        "request_id": request_id,
                        "bytes": raw_event.len(),
                        "error": error.to_string(),
                    }),
                );
                error_response(
                    400,
                    json!({
                        "error": "validation_error",
                        "message": format!("Malformed request: {error}"),
                    }),
                )
            }
        };

        serde_json::to_writer(&mut *output, &response).map_err(io::Error::from)?;
        output.flush()?;
        Ok(())
    }
}

fn error_response(status_code: u16, payload: Value) -> ProxyResponse {
    ProxyResponse::json(status_code, payload.to_string())
}

fn log_handler_info(event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "component": "api_proxy_handler",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

fn log_handler_error(event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "component": "api_proxy_handler",
            "level": "error",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::time::Duration;

    use proxy_invoke_core::fixture::{health_check_request, HEALTH_CHECK_REQUEST_JSON};

    use super::*;
    use crate::adapters::context::LocalContext;

    fn request(method: &str, path: &str) -> ProxyRequest {
        ProxyRequest {
            http_method: method.to_string(),
            path: path.to_string(),
            ..health_check_request()
        }
    }

    fn run(handler: &ApiProxyHandler, input: &[u8]) -> ProxyResponse {
        let mut output = Vec::new();
        handler
            .handle_request(&mut Cursor::new(input), &mut output, None)
            .expect("handler should succeed");
        serde_json::from_slice(&output).expect("output should be a proxy response")
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn health_check_fixture_returns_ok_without_context() {
        let response = run(&ApiProxyHandler::default(), HEALTH_CHECK_REQUEST_JSON.as_bytes());

        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "{\"status\":\"ok\"}");
        assert_eq!(
            response.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn health_check_accepts_host_context() {
        let context = LocalContext::with_timeout(Duration::from_secs(3));
        let mut output = Vec::new();
        ApiProxyHandler::default()
            .handle_request(
                &mut Cursor::new(HEALTH_CHECK_REQUEST_JSON.as_bytes()),
                &mut output,
                Some(&context),
            )
            .expect("handler should succeed");

        let response: ProxyResponse =
            serde_json::from_slice(&output).expect("output should be a proxy response");
        assert_eq!(response.status_code, 200);
    }

    #[test]
    fn unknown_path_is_not_found() {
        let response = ApiProxyHandler::default().route(&request("GET", "/missing"));

        assert_eq!(response.status_code, 404);
        assert!(response.body.contains("No route for GET /missing"));
    }

    #[test]
    fn unsupported_method_lists_allowed_methods() {
        let response = ApiProxyHandler::default().route(&request("DELETE", "/health"));

        assert_eq!(response.status_code, 405);
        assert_eq!(
            response.headers.get("Allow").map(String::as_str),
            Some(HEALTH_METHODS)
        );
    }

    #[test]
    fn head_returns_empty_body() {
        let response = ApiProxyHandler::default().route(&request("head", "/health/"));

        assert_eq!(response.status_code, 200);
        assert!(response.body.is_empty());
    }

    #[test]
    fn base_path_is_stripped_before_routing() {
        let handler = ApiProxyHandler::new(ApiHandlerConfig::with_base_path("prod/"));

        assert_eq!(handler.route(&request("GET", "/prod/health")).status_code, 200);
        assert_eq!(handler.route(&request("GET", "/production/health")).status_code, 404);
    }

    #[test]
    fn blank_base_path_is_ignored() {
        assert_eq!(ApiHandlerConfig::with_base_path("  / "), ApiHandlerConfig::default());
    }

    #[test]
    fn falls_back_to_resource_when_path_missing() {
        let event = json!({"resource": "/health", "httpMethod": "GET"}).to_string();
        let response = run(&ApiProxyHandler::default(), event.as_bytes());

        assert_eq!(response.status_code, 200);
    }

    #[test]
    fn malformed_event_is_rejected_with_validation_error() {
        let response = run(&ApiProxyHandler::default(), b"{not json");

        assert_eq!(response.status_code, 400);
        assert!(response.body.contains("validation_error"));
    }

    #[test]
    fn sink_failures_propagate() {
        let error = ApiProxyHandler::default()
            .handle_request(
                &mut Cursor::new(HEALTH_CHECK_REQUEST_JSON.as_bytes()),
                &mut BrokenSink,
                None,
            )
            .expect_err("broken sink should fail");

        assert!(error.to_string().contains("sink closed"));
    }
}

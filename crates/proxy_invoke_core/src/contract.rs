use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Header and parameter maps are ordered so serialized events are stable
/// across runs.
pub type StringMap = BTreeMap<String, String>;

/// API Gateway REST proxy event, limited to the fields a local invocation
/// needs. Unknown fields are ignored on input and absent maps serialize as
/// explicit `null`, matching what the gateway sends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProxyRequest {
    pub resource: String,
    pub path: String,
    pub http_method: String,
    pub headers: Option<StringMap>,
    pub query_string_parameters: Option<StringMap>,
    pub path_parameters: Option<StringMap>,
    pub stage_variables: Option<StringMap>,
    pub request_context: ProxyRequestContext,
    pub body: Option<String>,
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProxyRequestContext {
    pub account_id: String,
    pub resource_id: String,
    pub stage: String,
    pub request_id: String,
    pub identity: RequestIdentity,
    pub resource_path: String,
    pub http_method: String,
    pub api_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestIdentity {
    pub source_ip: String,
}

impl ProxyRequest {
    /// The request path, falling back to the resource template when the
    /// gateway left `path` empty.
    pub fn effective_path(&self) -> &str {
        if self.path.is_empty() {
            &self.resource
        } else {
            &self.path
        }
    }
}

/// Gateway-shaped response written by a proxy handler.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    #[serde(default)]
    pub headers: StringMap,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl ProxyResponse {
    pub fn json(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            headers: BTreeMap::from([("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string())]),
            body: body.into(),
            is_base64_encoded: false,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

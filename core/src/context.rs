//! Per-call request context.
//!
//! A `RequestContext` is an immutable snapshot of everything an outgoing
//! request needs for authorization: base URL, default headers (partner
//! credentials, user agent) and the bearer token active when the snapshot
//! was taken. Later changes to the client do not affect a context that has
//! already been handed out.

use serde::Serialize;

use crate::config::Configuration;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    base_url: String,
    headers: Vec<(String, String)>,
    bearer_token: Option<String>,
}

impl RequestContext {
    pub fn new(config: &Configuration, bearer_token: Option<&str>) -> Self {
        // A configured default header replaces the built-in one of the same name.
        let builtin = [("accept", "application/json"), ("user-agent", config.user_agent())];
        let mut headers: Vec<(String, String)> = builtin
            .into_iter()
            .filter(|(name, _)| config.default_header(name).is_none())
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        headers.extend(config.default_headers().iter().cloned());
        Self {
            base_url: config.base_url().to_string(),
            headers,
            bearer_token: bearer_token.filter(|t| !t.is_empty()).map(str::to_string),
        }
    }

    /// Context without a bearer token.
    pub fn anonymous(config: &Configuration) -> Self {
        Self::new(config, None)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer_token.is_some()
    }

    /// Body-less request for `path` (relative to the base URL).
    pub fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        let mut headers = self.headers.clone();
        if let Some(token) = &self.bearer_token {
            set_header(&mut headers, "authorization", format!("Bearer {token}"));
        }
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers,
            body: None,
        }
    }

    /// Request with `body` serialized as JSON.
    pub fn json_request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut request = self.request(method, path);
        set_header(&mut request.headers, "content-type", "application/json".to_string());
        request.body = Some(body);
        Ok(request)
    }
}

fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: String) {
    headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
    headers.push((name.to_string(), value));
}

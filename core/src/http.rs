//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. Endpoint builders produce
//! `HttpRequest` values and parsers consume `HttpResponse` values without
//! touching the network; a [`Transport`](crate::transport::Transport) performs
//! the round-trip in between.
//!
//! All fields use owned types (`String`, `Vec`) so values can be recorded,
//! replayed from test vectors, or handed to any HTTP stack.

use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built from a [`RequestContext`](crate::context::RequestContext), so it
/// already carries the default headers and bearer token that were active
/// when it was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup. Returns the last value set for `name`.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Append percent-encoded query parameters to the URL.
    pub fn with_query(mut self, params: &[(&str, String)]) -> Self {
        for (i, (key, value)) in params.iter().enumerate() {
            let separator = if i == 0 && !self.url.contains('?') { '?' } else { '&' };
            self.url.push(separator);
            self.url.push_str(&urlencoding::encode(key));
            self.url.push('=');
            self.url.push_str(&urlencoding::encode(value));
        }
        self
    }
}

/// An HTTP response described as plain data.
///
/// The body is read to completion by the transport, so no connection handle
/// outlives the call that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .rev()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

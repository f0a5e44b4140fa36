//! High-level client for partner integrations.
//!
//! # Design
//! `LifePlusClient` owns a [`Configuration`], the current bearer token and a
//! [`Transport`]. Every call derives a fresh [`RequestContext`] from the first
//! two, so the token and partner headers in effect are exactly those present
//! when the call is made.
//!
//! Session state only changes through `&mut self` methods (or the consuming
//! `with_*` builders). Concurrent mutation therefore needs an explicit lock;
//! alternatively, clone the client and give each logical session its own.
//!
//! A logged-in client can be re-pointed at another transport, or given a
//! different deadline, with [`LifePlusClient::with_timeout`] and
//! [`LifePlusClient::using_transport`]. Both return a new client carrying the
//! same configuration and token; the original is left untouched.
//!
//! Only `login` and `register` adopt a token, and only when the server
//! returned a non-empty one. `logout` clears the token only after the server
//! confirmed it; a failed logout leaves the local session as it was.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::Configuration;
use crate::context::RequestContext;
use crate::error::{ApiError, LifePlusError, Operation};
use crate::http::{HttpRequest, HttpResponse};
use crate::resources::check_status;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Credentials, Session, User, UserRegistration};

#[derive(Debug, Clone)]
pub struct LifePlusClient<T = UreqTransport> {
    config: Configuration,
    access_token: Option<String>,
    transport: T,
}

impl LifePlusClient<UreqTransport> {
    /// Client for `base_url` with no credentials, using a blocking ureq
    /// transport.
    pub fn new(base_url: &str) -> Self {
        Self::from_config(Configuration::new(base_url))
    }

    /// Uses `config.timeout()` for the transport deadline, if set.
    pub fn from_config(config: Configuration) -> Self {
        let transport = match config.timeout() {
            Some(timeout) => UreqTransport::with_timeout(timeout),
            None => UreqTransport::new(),
        };
        Self::with_transport(config, transport)
    }

    /// Copy of this client, session included, whose calls give up after
    /// `timeout`.
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let mut client = Self::from_config(self.config.clone().with_timeout(timeout));
        client.access_token = self.access_token.clone();
        client
    }
}

impl<T: Transport> LifePlusClient<T> {
    pub fn with_transport(config: Configuration, transport: T) -> Self {
        Self {
            config,
            access_token: None,
            transport,
        }
    }

    /// Move the configuration and token onto another transport.
    pub fn using_transport<U: Transport>(self, transport: U) -> LifePlusClient<U> {
        LifePlusClient {
            config: self.config,
            access_token: self.access_token,
            transport,
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Credentials that the next call will carry.
    pub fn context(&self) -> RequestContext {
        RequestContext::new(&self.config, self.access_token.as_deref())
    }

    /// The current bearer token, or `""` when none is set.
    pub fn access_token(&self) -> &str {
        self.access_token.as_deref().unwrap_or("")
    }

    /// Replace the bearer token. The token is not validated locally; an
    /// empty string clears it.
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        let token = token.into();
        if token.is_empty() {
            self.clear_access_token();
        } else {
            self.access_token = Some(token);
            info!("access token set");
        }
    }

    pub fn clear_access_token(&mut self) {
        if self.access_token.take().is_some() {
            info!("access token cleared");
        }
    }

    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.set_access_token(token);
        self
    }

    /// Send `X-Partner-ID` and `X-API-Key` with every future request, next to
    /// any bearer token. Calling again overwrites both values.
    pub fn set_partner_credentials(&mut self, partner_id: &str, api_key: &str) {
        self.config.set_partner_credentials(partner_id, api_key);
        debug!(partner_id, "partner credentials set");
    }

    #[must_use]
    pub fn with_partner_credentials(mut self, partner_id: &str, api_key: &str) -> Self {
        self.set_partner_credentials(partner_id, api_key);
        self
    }

    /// Authenticate with mobile number and password and adopt the returned
    /// token.
    pub fn login(&mut self, mobile: &str, password: &str) -> Result<Session, LifePlusError> {
        let credentials = Credentials {
            mobile: mobile.to_string(),
            password: password.to_string(),
        };
        let session = self
            .auth()
            .create_session(&credentials)
            .map_err(LifePlusError::during(Operation::Login))?;
        self.adopt(&session);
        Ok(session)
    }

    /// Create an account and adopt the returned token.
    pub fn register(&mut self, registration: &UserRegistration) -> Result<Session, LifePlusError> {
        let session = self
            .auth()
            .register_user(registration)
            .map_err(LifePlusError::during(Operation::Register))?;
        self.adopt(&session);
        Ok(session)
    }

    /// Profile of the user the current token belongs to.
    pub fn get_profile(&self) -> Result<User, LifePlusError> {
        self.auth()
            .get_profile()
            .map_err(LifePlusError::during(Operation::GetProfile))
    }

    /// Invalidate the session server-side, then forget the local token.
    pub fn logout(&mut self) -> Result<(), LifePlusError> {
        if let Err(err) = self.auth().delete_session() {
            warn!(error = %err, "logout failed, keeping local session");
            return Err(LifePlusError::new(Operation::Logout, err));
        }
        self.clear_access_token();
        Ok(())
    }

    /// Liveness probe: succeeds when the reference-data listing answers 2xx.
    /// The payload is not decoded.
    pub fn ping(&self) -> Result<(), LifePlusError> {
        let lookup = self.lookup();
        let request = lookup.build_countries();
        lookup
            .send(request)
            .and_then(|response| check_status(&response))
            .map_err(LifePlusError::during(Operation::Ping))
    }

    pub(crate) fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, url = %request.url, "received response");
        Ok(response)
    }

    fn adopt(&mut self, session: &Session) {
        if session.token.is_empty() {
            debug!("session carried no token, keeping current credentials");
            return;
        }
        self.set_access_token(session.token.as_str());
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::config::{API_KEY_HEADER, PARTNER_ID_HEADER};
    use crate::http::HttpMethod;

    fn ok(status: u16, body: &str) -> Result<HttpResponse, ApiError> {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    fn config() -> Configuration {
        Configuration::new("https://example.test/api")
    }

    #[test]
    fn new_client_has_no_token() {
        let client = LifePlusClient::new("https://example.test/api/");
        assert_eq!(client.access_token(), "");
        assert_eq!(client.config().base_url(), "https://example.test/api");
        assert!(!client.context().is_authenticated());
    }

    #[test]
    fn set_token_roundtrips_exactly() {
        let mut client = LifePlusClient::new("https://example.test/api");
        client.set_access_token("  eyJ.opaque.token  ");
        assert_eq!(client.access_token(), "  eyJ.opaque.token  ");
        client.set_access_token("second");
        assert_eq!(client.access_token(), "second");
        assert_eq!(client.context().bearer_token(), Some("second"));
    }

    #[test]
    fn login_adopts_non_empty_token() {
        let transport = |req: &HttpRequest| {
            assert_eq!(req.method, HttpMethod::Post);
            assert_eq!(req.url, "https://example.test/api/auth/session");
            ok(200, r#"{"token":"abc123"}"#)
        };
        let mut client = LifePlusClient::with_transport(config(), transport);
        let session = client.login("017...", "x").unwrap();
        assert_eq!(session.token, "abc123");
        assert_eq!(client.access_token(), "abc123");
    }

    #[test]
    fn login_with_empty_token_keeps_previous() {
        let transport = |_: &HttpRequest| ok(200, r#"{"token":""}"#);
        let mut client = LifePlusClient::with_transport(config(), transport).with_access_token("old");
        client.login("017", "x").unwrap();
        assert_eq!(client.access_token(), "old");
    }

    #[test]
    fn failed_login_keeps_previous_token() {
        let transport = |_: &HttpRequest| ok(401, r#"{"message":"invalid credentials"}"#);
        let mut client = LifePlusClient::with_transport(config(), transport).with_access_token("old");
        let err = client.login("017", "wrong").unwrap_err();
        assert_eq!(err.operation, Operation::Login);
        assert!(err.to_string().starts_with("login failed: "));
        assert_eq!(err.source.server_message().as_deref(), Some("invalid credentials"));
        assert_eq!(client.access_token(), "old");
    }

    #[test]
    fn register_adopts_token() {
        let transport = |req: &HttpRequest| {
            assert_eq!(req.url, "https://example.test/api/auth/register");
            ok(201, r#"{"token":"fresh","user":{"id":1,"name":"Rahim"}}"#)
        };
        let mut client = LifePlusClient::with_transport(config(), transport);
        let registration = UserRegistration {
            name: "Rahim".to_string(),
            mobile: "01700000001".to_string(),
            password: "pw".to_string(),
            email: None,
        };
        let session = client.register(&registration).unwrap();
        assert_eq!(session.user.and_then(|u| u.name).as_deref(), Some("Rahim"));
        assert_eq!(client.access_token(), "fresh");
    }

    #[test]
    fn logout_success_clears_token() {
        let transport = |req: &HttpRequest| {
            assert_eq!(req.method, HttpMethod::Delete);
            assert_eq!(req.header("authorization"), Some("Bearer abc123"));
            ok(204, "")
        };
        let mut client = LifePlusClient::with_transport(config(), transport).with_access_token("abc123");
        client.logout().unwrap();
        assert_eq!(client.access_token(), "");
        assert!(!client.context().is_authenticated());
    }

    #[test]
    fn logout_transport_failure_keeps_token() {
        let transport =
            |_: &HttpRequest| -> Result<HttpResponse, ApiError> { Err(ApiError::Transport("connection reset".to_string())) };
        let mut client = LifePlusClient::with_transport(config(), transport).with_access_token("abc123");
        let err = client.logout().unwrap_err();
        assert_eq!(err.to_string(), "logout failed: transport error: connection reset");
        assert_eq!(client.access_token(), "abc123");
    }

    #[test]
    fn partner_credentials_last_write_wins() {
        let seen = RefCell::new(Vec::new());
        let transport = |req: &HttpRequest| {
            seen.borrow_mut().push(req.clone());
            ok(200, "[]")
        };
        let mut client = LifePlusClient::with_transport(config(), transport).with_partner_credentials("p1", "k1");
        client.set_partner_credentials("p2", "k2");
        client.ping().unwrap();

        let requests = seen.into_inner();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].header(PARTNER_ID_HEADER), Some("p2"));
        assert_eq!(requests[0].header(API_KEY_HEADER), Some("k2"));
        let partner_headers = requests[0]
            .headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(PARTNER_ID_HEADER))
            .count();
        assert_eq!(partner_headers, 1);
    }

    #[test]
    fn ping_ignores_payload() {
        let transport = |req: &HttpRequest| {
            assert_eq!(req.url, "https://example.test/api/lookup/countries");
            ok(200, "definitely not json")
        };
        let client = LifePlusClient::with_transport(config(), transport);
        assert!(client.ping().is_ok());
    }

    #[test]
    fn ping_reports_server_failure() {
        let transport = |_: &HttpRequest| ok(503, "maintenance");
        let client = LifePlusClient::with_transport(config(), transport);
        let err = client.ping().unwrap_err();
        assert_eq!(err.operation, Operation::Ping);
        assert!(matches!(err.source, ApiError::HttpError { status: 503, .. }));
    }

    #[test]
    fn derived_client_keeps_session_on_new_transport() {
        let seen = RefCell::new(Vec::new());
        let original = LifePlusClient::new("https://example.test/api")
            .with_access_token("abc123")
            .with_partner_credentials("p1", "k1");

        let derived = original.clone().using_transport(|req: &HttpRequest| {
            seen.borrow_mut().push(req.clone());
            ok(200, r#"{"id":7}"#)
        });
        derived.get_profile().unwrap();

        let requests = seen.into_inner();
        assert_eq!(requests[0].url, "https://example.test/api/auth/profile");
        assert_eq!(requests[0].header("authorization"), Some("Bearer abc123"));
        assert_eq!(requests[0].header(PARTNER_ID_HEADER), Some("p1"));
        assert_eq!(original.access_token(), "abc123");
    }

    #[test]
    fn with_timeout_copies_session_and_leaves_original_alone() {
        let mut original = LifePlusClient::new("https://example.test/api").with_access_token("abc123");
        let tight = original.with_timeout(Duration::from_millis(250));

        assert_eq!(tight.access_token(), "abc123");
        assert_eq!(tight.config().timeout(), Some(Duration::from_millis(250)));
        assert_eq!(tight.context().bearer_token(), Some("abc123"));
        assert_eq!(original.config().timeout(), None);

        original.clear_access_token();
        assert_eq!(tight.access_token(), "abc123");
    }

    #[test]
    fn profile_error_is_prefixed() {
        let transport = |_: &HttpRequest| ok(401, "token expired");
        let client = LifePlusClient::with_transport(config(), transport);
        let err = client.get_profile().unwrap_err();
        assert_eq!(err.to_string(), "failed to get profile: unauthorized: token expired");
    }
}

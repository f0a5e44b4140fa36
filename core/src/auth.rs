//! Authentication endpoints.
//!
//! Each endpoint is split into a `build_*` function that produces an
//! `HttpRequest` from a [`RequestContext`] and a `parse_*` function that
//! consumes the `HttpResponse`. [`AuthApi`] chains the two through the
//! client's transport. None of these touch the client's stored token; that
//! is the job of [`LifePlusClient::login`](crate::LifePlusClient::login) and
//! friends.

use crate::context::RequestContext;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::resources::{parse_empty, parse_json, AuthApi};
use crate::transport::Transport;
use crate::types::{Credentials, Session, User, UserRegistration};

pub const SESSION_PATH: &str = "/auth/session";
pub const REGISTER_PATH: &str = "/auth/register";
pub const PROFILE_PATH: &str = "/auth/profile";

pub fn build_create_session(ctx: &RequestContext, credentials: &Credentials) -> Result<HttpRequest, ApiError> {
    ctx.json_request(HttpMethod::Post, SESSION_PATH, credentials)
}

pub fn parse_create_session(response: HttpResponse) -> Result<Session, ApiError> {
    parse_json(response)
}

pub fn build_register_user(ctx: &RequestContext, registration: &UserRegistration) -> Result<HttpRequest, ApiError> {
    ctx.json_request(HttpMethod::Post, REGISTER_PATH, registration)
}

pub fn parse_register_user(response: HttpResponse) -> Result<Session, ApiError> {
    parse_json(response)
}

pub fn build_get_profile(ctx: &RequestContext) -> HttpRequest {
    ctx.request(HttpMethod::Get, PROFILE_PATH)
}

pub fn parse_get_profile(response: HttpResponse) -> Result<User, ApiError> {
    parse_json(response)
}

pub fn build_delete_session(ctx: &RequestContext) -> HttpRequest {
    ctx.request(HttpMethod::Delete, SESSION_PATH)
}

/// Any 2xx counts as success; the body, if any, is ignored.
pub fn parse_delete_session(response: HttpResponse) -> Result<(), ApiError> {
    parse_empty(response)
}

impl<T: Transport> AuthApi<'_, T> {
    pub fn create_session(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        let request = build_create_session(&self.context(), credentials)?;
        parse_create_session(self.send(request)?)
    }

    pub fn register_user(&self, registration: &UserRegistration) -> Result<Session, ApiError> {
        let request = build_register_user(&self.context(), registration)?;
        parse_register_user(self.send(request)?)
    }

    pub fn get_profile(&self) -> Result<User, ApiError> {
        let request = build_get_profile(&self.context());
        parse_get_profile(self.send(request)?)
    }

    pub fn delete_session(&self) -> Result<(), ApiError> {
        let request = build_delete_session(&self.context());
        parse_delete_session(self.send(request)?)
    }
}

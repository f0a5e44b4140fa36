//! Domain DTOs for the partner API.
//!
//! # Design
//! Response fields the server may omit are `Option<T>`; render them with the
//! helpers in [`crate::optional`]. The mock-server crate defines its own copies
//! of these shapes and the integration tests catch drift between the two.

use serde::{Deserialize, Serialize};

/// Login payload for `POST /auth/session`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub mobile: String,
    pub password: String,
}

/// Sign-up payload for `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRegistration {
    pub name: String,
    pub mobile: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Result of a login or registration. An empty `token` means the server did
/// not issue one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Session {
    #[serde(default)]
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Country {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Specialty {
    pub id: Option<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Option<i64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub price: Option<f32>,
    pub in_stock: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub specialty_name: Option<String>,
    pub consultation_fee: Option<f32>,
    pub experience_years: Option<i32>,
}

/// The partner identified by the `X-Partner-ID` / `X-API-Key` headers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Partner {
    pub partner_id: Option<String>,
    pub name: Option<String>,
}

/// Query for `GET /products`. Unset fields are left to server defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListProducts {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search_key: Option<String>,
}

impl ListProducts {
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    #[must_use]
    pub fn search_key(mut self, search_key: impl Into<String>) -> Self {
        self.search_key = Some(search_key.into());
        self
    }

    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            query.push(("per_page", per_page.to_string()));
        }
        if let Some(search_key) = &self.search_key {
            query.push(("search_key", search_key.clone()));
        }
        query
    }
}

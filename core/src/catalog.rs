//! Typed read endpoints for catalogue, reference and partner data.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::resources::{DoctorsApi, LookupApi, PartnersApi, ProductsApi};
use crate::transport::Transport;
use crate::types::{Category, Country, Doctor, ListProducts, Partner, Product, Specialty};

impl<T: Transport> ProductsApi<'_, T> {
    /// `GET /products`, filtered and paged by `query`.
    pub fn list_products(&self, query: &ListProducts) -> Result<Vec<Product>, ApiError> {
        self.get("", &query.query())
    }

    pub fn lifestyle_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get("/lifestyle-categories", &[])
    }
}

impl<T: Transport> DoctorsApi<'_, T> {
    pub fn list_doctors(&self, page: Option<u32>, per_page: Option<u32>) -> Result<Vec<Doctor>, ApiError> {
        let mut query = Vec::new();
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(per_page) = per_page {
            query.push(("per_page", per_page.to_string()));
        }
        self.get("", &query)
    }
}

impl<T: Transport> LookupApi<'_, T> {
    /// Request used by [`countries`](Self::countries) and by the client's
    /// liveness probe.
    pub fn build_countries(&self) -> HttpRequest {
        self.build(HttpMethod::Get, "/countries")
    }

    pub fn countries(&self) -> Result<Vec<Country>, ApiError> {
        self.get("/countries", &[])
    }

    pub fn specialties(&self) -> Result<Vec<Specialty>, ApiError> {
        self.get("/specialties", &[])
    }
}

impl<T: Transport> PartnersApi<'_, T> {
    /// The partner identified by the configured partner credentials.
    pub fn me(&self) -> Result<Partner, ApiError> {
        self.get("/me", &[])
    }
}

//! Synchronous client for the LifePlus partner API.
//!
//! # Overview
//! `LifePlusClient` wraps the healthcare/e-commerce REST API behind one
//! accessor per resource domain (`products()`, `doctors()`, `lookup()`, ...)
//! and manages the bearer token established by `login` / `register`.
//!
//! ```no_run
//! use lifeplus_core::{value_or_default, LifePlusClient, ListProducts};
//!
//! let mut client = LifePlusClient::new("https://api.lifeplusbd.com/api/v2");
//! client.login("01700000000", "secret")?;
//! for product in client.products().list_products(&ListProducts::default().per_page(5))? {
//!     println!("{}", value_or_default(product.name));
//! }
//! client.logout()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Design
//! - Requests and responses are plain data (`HttpRequest` / `HttpResponse`);
//!   endpoints are `build_*` / `parse_*` pairs and a [`Transport`] does the I/O.
//! - Credentials are snapshotted into a [`RequestContext`] per call.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod auth;
pub mod catalog;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod optional;
pub mod resources;
pub mod transport;
pub mod types;

pub use client::LifePlusClient;
pub use config::Configuration;
pub use context::RequestContext;
pub use error::{ApiError, ConfigError, LifePlusError, Operation};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use optional::{cloned_or_default, value_or_default, widen_or_zero};
pub use resources::{
    AddressesApi, AmbulanceApi, AppointmentsApi, AuthApi, CartApi, DoctorsApi, Domain, HomeCareApi, HomeSampleApi,
    HospitalsApi, LookupApi, OrdersApi, PackagesApi, PartnersApi, ProductsApi, ResourceApi, TelemedicineApi,
    WellbeingApi,
};
pub use transport::{Transport, UreqTransport};
pub use types::{
    Category, Country, Credentials, Doctor, ListProducts, Partner, Product, Session, Specialty, User,
    UserRegistration,
};

//! Resource-domain handles.
//!
//! # Design
//! The domain set is fixed, so one `macro_rules!` table maps each domain to
//! its accessor on [`LifePlusClient`], its handle type and its base path.
//! Every handle derefs to [`ResourceApi`], which offers generic JSON calls
//! scoped to the domain's base path; typed endpoints are added as inherent
//! methods on individual handles (see `auth` and `catalog`).
//!
//! Handles borrow the client, so each call picks up the request context that
//! is current when it is made.

use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::LifePlusClient;
use crate::context::RequestContext;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Map non-success status codes to the appropriate `ApiError` variant.
pub fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    match response.status {
        401 => Err(ApiError::Unauthorized {
            body: response.body.clone(),
        }),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

/// Check the status, then decode the body as JSON.
pub fn parse_json<R: DeserializeOwned>(response: HttpResponse) -> Result<R, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Check the status and discard the body.
pub fn parse_empty(response: HttpResponse) -> Result<(), ApiError> {
    check_status(&response)
}

macro_rules! domains {
    ($( $(#[$doc:meta])* $variant:ident => $accessor:ident, $handle:ident, $path:literal; )+) => {
        /// Resource domains exposed by the partner API.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Domain {
            $( $variant, )+
        }

        impl Domain {
            pub const ALL: &'static [Domain] = &[ $( Domain::$variant, )+ ];

            /// Path prefix of the domain, relative to the base URL.
            pub fn base_path(self) -> &'static str {
                match self {
                    $( Domain::$variant => $path, )+
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $( Domain::$variant => stringify!($variant), )+
                }
            }
        }

        $(
            $(#[$doc])*
            pub struct $handle<'c, T> {
                inner: ResourceApi<'c, T>,
            }

            impl<'c, T> Deref for $handle<'c, T> {
                type Target = ResourceApi<'c, T>;

                fn deref(&self) -> &Self::Target {
                    &self.inner
                }
            }
        )+

        impl<T: Transport> LifePlusClient<T> {
            $(
                $(#[$doc])*
                pub fn $accessor(&self) -> $handle<'_, T> {
                    $handle {
                        inner: ResourceApi::new(self, Domain::$variant),
                    }
                }
            )+
        }
    };
}

domains! {
    /// Authentication: sessions, registration and profile.
    Auth => auth, AuthApi, "/auth";
    /// Pharmacy and e-commerce catalogue.
    Products => products, ProductsApi, "/products";
    /// Order management.
    Orders => orders, OrdersApi, "/orders";
    /// Shopping cart.
    Cart => cart, CartApi, "/cart";
    /// Doctor search and slots.
    Doctors => doctors, DoctorsApi, "/doctors";
    /// Appointment booking.
    Appointments => appointments, AppointmentsApi, "/appointments";
    /// Video consultations.
    Telemedicine => telemedicine, TelemedicineApi, "/telemedicine";
    /// Health packages.
    Packages => packages, PackagesApi, "/packages";
    /// Ambulance services.
    Ambulance => ambulance, AmbulanceApi, "/ambulance";
    /// Home care services.
    HomeCare => home_care, HomeCareApi, "/home-care";
    /// Home sample collection.
    HomeSample => home_sample, HomeSampleApi, "/home-sample";
    /// Saved addresses.
    Addresses => addresses, AddressesApi, "/addresses";
    /// Partner information.
    Partners => partners, PartnersApi, "/partners";
    /// Hospitals.
    Hospitals => hospitals, HospitalsApi, "/hospitals";
    /// Reference data.
    Lookup => lookup, LookupApi, "/lookup";
    /// Wellbeing services.
    Wellbeing => wellbeing, WellbeingApi, "/wellbeing";
}

/// Generic calls against one domain of the API.
pub struct ResourceApi<'c, T> {
    client: &'c LifePlusClient<T>,
    domain: Domain,
}

impl<'c, T: Transport> ResourceApi<'c, T> {
    pub(crate) fn new(client: &'c LifePlusClient<T>, domain: Domain) -> Self {
        Self { client, domain }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Snapshot of the client's current credentials.
    pub fn context(&self) -> RequestContext {
        self.client.context()
    }

    /// `path` prefixed with the domain's base path.
    pub fn path(&self, path: &str) -> String {
        format!("{}{path}", self.domain.base_path())
    }

    pub fn build(&self, method: HttpMethod, path: &str) -> HttpRequest {
        self.context().request(method, &self.path(path))
    }

    pub fn build_json<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<HttpRequest, ApiError> {
        self.context().json_request(method, &self.path(path), body)
    }

    /// Execute a request and return the raw response, whatever its status.
    pub fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.client.execute(&request)
    }

    pub fn get<R: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<R, ApiError> {
        let request = self.build(HttpMethod::Get, path).with_query(query);
        parse_json(self.send(request)?)
    }

    pub fn post<B: Serialize + ?Sized, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        let request = self.build_json(HttpMethod::Post, path, body)?;
        parse_json(self.send(request)?)
    }

    pub fn put<B: Serialize + ?Sized, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        let request = self.build_json(HttpMethod::Put, path, body)?;
        parse_json(self.send(request)?)
    }

    pub fn patch<B: Serialize + ?Sized, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ApiError> {
        let request = self.build_json(HttpMethod::Patch, path, body)?;
        parse_json(self.send(request)?)
    }

    pub fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self.build(HttpMethod::Delete, path);
        parse_empty(self.send(request)?)
    }
}

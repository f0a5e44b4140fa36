use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const DEMO_NAME: &str = "Demo User";
pub const DEMO_MOBILE: &str = "01700000000";
pub const DEMO_PASSWORD: &str = "secret";
pub const DEMO_PARTNER_ID: &str = "demo-partner";
pub const DEMO_API_KEY: &str = "demo-key";

const DEFAULT_PER_PAGE: usize = 20;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub mobile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Deserialize)]
pub struct Credentials {
    pub mobile: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct Registration {
    pub name: String,
    pub mobile: String,
    pub password: String,
    pub email: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f32>,
    pub in_stock: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub specialty_name: String,
    pub consultation_fee: f32,
    pub experience_years: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Named {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    pub name: String,
    pub code: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Partner {
    pub partner_id: String,
    pub name: String,
}

#[derive(Deserialize)]
pub struct ProductQuery {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    pub search_key: Option<String>,
}

#[derive(Deserialize)]
pub struct Paging {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

struct Account {
    user: User,
    password: String,
}

/// Registered accounts and live sessions (token -> user id).
pub struct Store {
    accounts: Vec<Account>,
    sessions: HashMap<String, i64>,
}

impl Store {
    /// One demo account, no sessions.
    pub fn seeded() -> Self {
        Self {
            accounts: vec![Account {
                user: User {
                    id: 1,
                    name: DEMO_NAME.to_string(),
                    mobile: DEMO_MOBILE.to_string(),
                    email: None,
                },
                password: DEMO_PASSWORD.to_string(),
            }],
            sessions: HashMap::new(),
        }
    }

    fn open_session(&mut self, user: &User) -> Session {
        let token = Uuid::new_v4().simple().to_string();
        self.sessions.insert(token.clone(), user.id);
        Session {
            token,
            user: user.clone(),
        }
    }

    fn user_for_token(&self, token: &str) -> Option<&User> {
        let id = self.sessions.get(token)?;
        self.accounts.iter().map(|a| &a.user).find(|u| u.id == *id)
    }
}

pub type Db = Arc<RwLock<Store>>;

type Failure = (StatusCode, Json<ErrorBody>);

fn failure(status: StatusCode, message: &str) -> Failure {
    (
        status,
        Json(ErrorBody {
            message: message.to_string(),
        }),
    )
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded()));
    Router::new()
        .route("/auth/session", post(create_session).delete(delete_session))
        .route("/auth/register", post(register))
        .route("/auth/profile", get(profile))
        .route("/lookup/countries", get(countries))
        .route("/lookup/specialties", get(specialties))
        .route("/products", get(list_products))
        .route("/products/lifestyle-categories", get(lifestyle_categories))
        .route("/doctors", get(list_doctors))
        .route("/partners/me", get(partner_me))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

async fn create_session(State(db): State<Db>, Json(input): Json<Credentials>) -> Result<Json<Session>, Failure> {
    let mut store = db.write().await;
    let user = store
        .accounts
        .iter()
        .find(|a| a.user.mobile == input.mobile && a.password == input.password)
        .map(|a| a.user.clone())
        .ok_or_else(|| failure(StatusCode::UNAUTHORIZED, "invalid credentials"))?;
    tracing::info!(user_id = user.id, "session created");
    Ok(Json(store.open_session(&user)))
}

async fn register(
    State(db): State<Db>,
    Json(input): Json<Registration>,
) -> Result<(StatusCode, Json<Session>), Failure> {
    if input.mobile.trim().is_empty() || input.password.is_empty() {
        return Err(failure(StatusCode::UNPROCESSABLE_ENTITY, "mobile and password are required"));
    }
    let mut store = db.write().await;
    if store.accounts.iter().any(|a| a.user.mobile == input.mobile) {
        return Err(failure(StatusCode::CONFLICT, "mobile already registered"));
    }
    let user = User {
        id: store.accounts.len() as i64 + 1,
        name: input.name,
        mobile: input.mobile,
        email: input.email,
    };
    store.accounts.push(Account {
        user: user.clone(),
        password: input.password,
    });
    tracing::info!(user_id = user.id, "user registered");
    Ok((StatusCode::CREATED, Json(store.open_session(&user))))
}

async fn profile(State(db): State<Db>, headers: HeaderMap) -> Result<Json<User>, Failure> {
    let store = db.read().await;
    bearer_token(&headers)
        .and_then(|token| store.user_for_token(token))
        .cloned()
        .map(Json)
        .ok_or_else(|| failure(StatusCode::UNAUTHORIZED, "invalid or expired token"))
}

async fn delete_session(State(db): State<Db>, headers: HeaderMap) -> Result<StatusCode, Failure> {
    let token = bearer_token(&headers).ok_or_else(|| failure(StatusCode::UNAUTHORIZED, "missing bearer token"))?;
    let mut store = db.write().await;
    store
        .sessions
        .remove(token)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| failure(StatusCode::UNAUTHORIZED, "invalid or expired token"))
}

async fn countries() -> Json<Vec<Country>> {
    Json(vec![
        Country {
            id: 1,
            name: "Bangladesh".to_string(),
            code: "BD".to_string(),
        },
        Country {
            id: 2,
            name: "India".to_string(),
            code: "IN".to_string(),
        },
    ])
}

fn named(items: &[&str]) -> Vec<Named> {
    items
        .iter()
        .zip(1..)
        .map(|(name, id)| Named {
            id,
            name: name.to_string(),
        })
        .collect()
}

async fn specialties() -> Json<Vec<Named>> {
    Json(named(&["Cardiology", "Dermatology", "Medicine", "Pediatrics"]))
}

async fn lifestyle_categories() -> Json<Vec<Named>> {
    Json(named(&["Baby Care", "Personal Care", "Vitamins & Supplements"]))
}

fn catalogue() -> Vec<Product> {
    [
        ("Napa 500mg", Some(1.2), true),
        ("Napa Extra", Some(2.5), true),
        ("Paracetamol Syrup", Some(35.0), true),
        ("Seclo 20mg", Some(6.0), false),
        ("Vitamin C Chewable", None, true),
    ]
    .into_iter()
    .zip(1..)
    .map(|((name, price, in_stock), id)| Product {
        id,
        name: name.to_string(),
        price,
        in_stock,
    })
    .collect()
}

fn doctors() -> Vec<Doctor> {
    vec![
        Doctor {
            id: 1,
            name: "Dr. Karim Hossain".to_string(),
            specialty_name: "Cardiology".to_string(),
            consultation_fee: 1000.0,
            experience_years: 15,
        },
        Doctor {
            id: 2,
            name: "Dr. Nasrin Akter".to_string(),
            specialty_name: "Pediatrics".to_string(),
            consultation_fee: 700.0,
            experience_years: 8,
        },
        Doctor {
            id: 3,
            name: "Dr. Tanvir Ahmed".to_string(),
            specialty_name: "Medicine".to_string(),
            consultation_fee: 500.0,
            experience_years: 5,
        },
    ]
}

/// 1-based page of `items`; out-of-range pages are empty.
fn paginate<T>(items: Vec<T>, page: Option<usize>, per_page: Option<usize>) -> Vec<T> {
    let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE).max(1);
    let skip = page.unwrap_or(1).saturating_sub(1).saturating_mul(per_page);
    items.into_iter().skip(skip).take(per_page).collect()
}

async fn list_products(Query(query): Query<ProductQuery>) -> Json<Vec<Product>> {
    let mut products = catalogue();
    if let Some(key) = query.search_key.as_deref().map(str::to_lowercase) {
        products.retain(|p| p.name.to_lowercase().contains(&key));
    }
    Json(paginate(products, query.page, query.per_page))
}

async fn list_doctors(Query(paging): Query<Paging>) -> Json<Vec<Doctor>> {
    Json(paginate(doctors(), paging.page, paging.per_page))
}

async fn partner_me(headers: HeaderMap) -> Result<Json<Partner>, Failure> {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    match (header("x-partner-id"), header("x-api-key")) {
        (Some(DEMO_PARTNER_ID), Some(DEMO_API_KEY)) => Ok(Json(Partner {
            partner_id: DEMO_PARTNER_ID.to_string(),
            name: "Demo Pharmacy Ltd".to_string(),
        })),
        _ => Err(failure(StatusCode::UNAUTHORIZED, "invalid partner credentials")),
    }
}

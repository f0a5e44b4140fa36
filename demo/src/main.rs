//! Walks through the public catalogue endpoints.
//!
//! Reads `LIFEPLUS_BASE_URL` (and optional partner credentials) from the
//! environment; point it at `mock-server` for a local run. Set
//! `LIFEPLUS_MOBILE` and `LIFEPLUS_PASSWORD` to also exercise login/logout.

use lifeplus_core::{
    cloned_or_default, widen_or_zero, Configuration, LifePlusClient, ListProducts, Product, Transport,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info";

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Logs whether the API answers. The walkthrough continues either way.
fn check_reachable<T: Transport>(client: &LifePlusClient<T>) -> bool {
    match client.ping() {
        Ok(()) => {
            tracing::info!("API reachable");
            true
        }
        Err(err) => {
            tracing::error!(error = %err, "API not reachable, continuing anyway");
            false
        }
    }
}

fn print_products(products: &[Product]) {
    for (i, product) in products.iter().enumerate() {
        let name = cloned_or_default(product.name.as_ref());
        let price = widen_or_zero(product.price);
        println!("  {}. {name} - BDT {price:.2}", i + 1);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(log_filter())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Configuration::from_env()?;
    println!("=== LifePlus Rust SDK demo ({}) ===\n", config.base_url());
    let mut client = LifePlusClient::from_config(config);

    check_reachable(&client);

    println!("1. Listing products...");
    match client.products().list_products(&ListProducts::default().page(1).per_page(5)) {
        Ok(products) => {
            println!("Found {} products:", products.len());
            print_products(&products);
        }
        Err(err) => tracing::error!(error = %err, "listing products failed"),
    }
    println!();

    println!("2. Searching for products...");
    match client
        .products()
        .list_products(&ListProducts::default().search_key("paracetamol").per_page(3))
    {
        Ok(products) => {
            println!("Search found {} results:", products.len());
            print_products(&products);
        }
        Err(err) => tracing::error!(error = %err, "search failed"),
    }
    println!();

    println!("3. Getting categories...");
    match client.products().lifestyle_categories() {
        Ok(categories) => {
            println!("Found {} categories", categories.len());
            for (i, category) in categories.iter().take(5).enumerate() {
                println!("  {}. {}", i + 1, cloned_or_default(category.name.as_ref()));
            }
        }
        Err(err) => tracing::error!(error = %err, "listing categories failed"),
    }
    println!();

    println!("4. Listing doctors...");
    match client.doctors().list_doctors(Some(1), Some(3)) {
        Ok(doctors) => {
            println!("Found {} doctors:", doctors.len());
            for (i, doctor) in doctors.iter().enumerate() {
                let name = cloned_or_default(doctor.name.as_ref());
                let specialty = cloned_or_default(doctor.specialty_name.as_ref());
                let fee = widen_or_zero(doctor.consultation_fee);
                println!("  {}. {name} ({specialty}) - BDT {fee:.2}", i + 1);
            }
        }
        Err(err) => tracing::error!(error = %err, "listing doctors failed"),
    }
    println!();

    println!("5. Getting specialties...");
    match client.lookup().specialties() {
        Ok(specialties) => {
            println!("Found {} specialties", specialties.len());
            for (i, specialty) in specialties.iter().take(5).enumerate() {
                println!("  {}. {}", i + 1, cloned_or_default(specialty.name.as_ref()));
            }
        }
        Err(err) => tracing::error!(error = %err, "listing specialties failed"),
    }
    println!();

    if let (Ok(mobile), Ok(password)) = (std::env::var("LIFEPLUS_MOBILE"), std::env::var("LIFEPLUS_PASSWORD")) {
        println!("6. Logging in...");
        client.login(&mobile, &password)?;
        let user = client.get_profile()?;
        println!("Logged in as {}", cloned_or_default(user.name.as_ref()));
        client.logout()?;
        println!("Logged out");
        println!();
    }

    println!("Demo completed.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use lifeplus_core::{ApiError, HttpRequest, HttpResponse};
    use tracing_subscriber::filter::LevelFilter;

    use super::*;

    #[test]
    fn default_filter_is_info() {
        assert_eq!(EnvFilter::new(DEFAULT_LOG_FILTER).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn unreachable_api_does_not_stop_walkthrough() {
        let down = |_: &HttpRequest| -> Result<HttpResponse, ApiError> {
            Err(ApiError::Transport("connection refused".to_string()))
        };
        let client = LifePlusClient::with_transport(Configuration::new("http://api.test"), down);
        assert!(!check_reachable(&client));
    }

    #[test]
    fn reachable_api_is_reported() {
        let up = |_: &HttpRequest| -> Result<HttpResponse, ApiError> {
            Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: "[]".to_string(),
            })
        };
        let client = LifePlusClient::with_transport(Configuration::new("http://api.test"), up);
        assert!(check_reachable(&client));
    }
}

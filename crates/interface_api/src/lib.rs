//! HTTP API Layer
//!
//! This crate provides the REST API for the person registry using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Person and address CRUD plus health endpoints
//! - **Middleware**: Tracing, CORS, request logging
//! - **DTOs**: Request/response types with `validator` rules
//! - **Error Handling**: One translation point (`ApiError`) and one
//!   envelope (`HttpResult`) for every response
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_person::{AddressService, PersonService};

use crate::config::ApiConfig;
use crate::handlers::{address, health, person};
use crate::middleware::request_log_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub people: Arc<PersonService>,
    pub addresses: Arc<AddressService>,
    pub config: ApiConfig,
}

impl AppState {
    /// Creates application state from the domain services
    pub fn new(
        people: Arc<PersonService>,
        addresses: Arc<AddressService>,
        config: ApiConfig,
    ) -> Self {
        Self {
            people,
            addresses,
            config,
        }
    }
}

/// Creates the main API router
///
/// Registry routes are nested under `config.base_path`; health endpoints
/// stay at the root. Unmatched routes answer with the enveloped 404.
pub fn create_router(state: AppState) -> Router {
    let base_path = normalize_base_path(&state.config.base_path);

    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Person routes
    let person_routes = Router::new()
        .route("/", post(person::create_person))
        .route("/", get(person::list_people))
        .route("/:person_id", get(person::get_person))
        .route("/:person_id", put(person::update_person));

    // Address routes, always scoped by owner
    let address_routes = Router::new()
        .route("/person/:person_id", post(address::create_address))
        .route("/person/:person_id", get(address::list_addresses))
        .route("/:address_id/person/:person_id", get(address::get_address))
        .route("/:address_id/person/:person_id", put(address::update_address));

    let api_routes = Router::new()
        .nest("/person", person_routes)
        .nest("/address", address_routes)
        .layer(axum_middleware::from_fn(request_log_middleware));

    let router = match base_path {
        Some(prefix) => Router::new().merge(public_routes).nest(&prefix, api_routes),
        // Nesting at the root is rejected by axum; mount directly instead
        None => Router::new().merge(public_routes).merge(api_routes),
    };

    router
        .fallback(handlers::endpoint_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Normalizes the configured base path into a nesting prefix
///
/// Returns `None` when the path resolves to the root (`""` or `"/"`);
/// otherwise guarantees a leading slash and no trailing slash.
fn normalize_base_path(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else if trimmed.starts_with('/') {
        Some(trimmed.to_string())
    } else {
        Some(format!("/{trimmed}"))
    }
}

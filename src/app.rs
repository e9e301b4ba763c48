use axum::{middleware::from_fn_with_state, routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::access::{AccessGate, Requirement};
use crate::auth::{Role, TokenValidator};
use crate::config::AppConfig;
use crate::database::StatsRepository;
use crate::handlers;
use crate::middleware::{access_guard, RouteGuard};
use crate::services::{InteractionsService, StatisticsService};

/// Everything a handler may depend on, built once by the composition root
#[derive(Clone)]
pub struct AppState {
    pub interactions: Arc<InteractionsService>,
    pub statistics: Arc<StatisticsService>,
    pub repository: Arc<dyn StatsRepository>,
    pub gate: AccessGate,
}

impl AppState {
    pub fn new(repository: Arc<dyn StatsRepository>, validator: TokenValidator) -> Self {
        Self {
            interactions: Arc::new(InteractionsService::new(repository.clone())),
            statistics: Arc::new(StatisticsService::new(repository.clone())),
            repository,
            gate: AccessGate::new(validator),
        }
    }
}

/// Routes and access stages, without transport-level layers
pub fn routes(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/v1/interactions/:customer_id", get(handlers::customer_interactions))
        .route("/api/v1/stats/:table_name", get(handlers::table_count));

    let authenticated = Router::new()
        .route("/api/v1/user-access", get(handlers::user_access))
        .route_layer(from_fn_with_state(
            RouteGuard::new(state.gate.clone(), Requirement::Authenticated),
            access_guard,
        ));

    let admin = Router::new()
        .route("/api/v1/interactions/products", get(handlers::interactions_per_product))
        .route("/api/v1/admin-access", get(handlers::admin_access))
        .route_layer(from_fn_with_state(
            RouteGuard::new(state.gate.clone(), Requirement::role(Role::ADMIN)),
            access_guard,
        ));

    Router::new()
        .merge(public)
        .merge(authenticated)
        .merge(admin)
        .with_state(state)
}

/// Full application router with request tracing and CORS per configuration
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = routes(state);

    if config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

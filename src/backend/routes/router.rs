/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layers
 *
 * 1. Protected routes get `auth_middleware` as a route layer, so unmatched
 *    paths still answer 404 rather than 401
 * 2. `TraceLayer` records a span per request
 * 3. `CorsLayer` answers browser preflight requests
 */

use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::backend::middleware::{auth_middleware, setup_cors};
use crate::backend::routes::api_routes::{configure_protected_routes, configure_public_routes};
use crate::backend::routes::root::api_root;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state with the pool and services
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let cors = setup_cors(&app_state.config);

    let protected = configure_protected_routes(Router::new())
        .route_layer(middleware::from_fn_with_state(app_state.clone(), auth_middleware));

    let public = configure_public_routes(Router::new()).route("/", get(api_root));

    public
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(app_state)
}

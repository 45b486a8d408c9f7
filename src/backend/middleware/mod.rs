//! Middleware Module
//!
//! This module contains all HTTP middleware for the backend server.
//! Middleware functions are used to process requests before they reach
//! handlers.
//!
//! # Architecture
//!
//! - **`auth`** - Authentication middleware and extractors for protected routes
//! - **`cors`** - CORS layer for the browser frontend
//!
//! # Example
//!
//! ```rust,no_run
//! use notes_backend::backend::middleware::auth_middleware;
//! use notes_backend::backend::AppState;
//! use axum::{middleware, Router};
//!
//! # fn example(state: AppState, protected: Router<AppState>) -> Router<AppState> {
//! protected.route_layer(middleware::from_fn_with_state(state, auth_middleware))
//! # }
//! ```

pub mod auth;
pub mod cors;

pub use auth::{auth_middleware, authenticate, bearer_token, extract_authenticated_user, AuthUser, AuthenticatedUser, MaybeAuthUser};
pub use cors::setup_cors;

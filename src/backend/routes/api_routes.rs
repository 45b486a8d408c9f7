/**
 * API Route Handlers
 *
 * This module wires handlers to API paths. Routes are split by whether
 * they need an authenticated caller so the router can put the protected set
 * behind `auth_middleware`.
 *
 * # Public Routes
 *
 * - `POST /api/user/register/` - User registration
 * - `POST /api/token/` - Login, returns an access/refresh pair
 * - `POST /api/token/refresh/` - New access token
 * - `POST /api/password/request-reset/` - Email a reset code
 * - `POST /api/password/verify-reset/` - Set a new password with a code
 * - `GET /api/payments/config/` - Stripe publishable key
 * - `POST /newsletter/subscribe` - Newsletter signup (throttled)
 *
 * # Protected Routes
 *
 * - `GET /api/user/current/` - Current user
 * - `GET|POST /api/notes/` - List or create notes
 * - `DELETE /api/notes/delete/{id}/` - Delete a note
 * - `POST /api/payments/create-payment-intent/` - Start a payment
 * - `POST /api/payments/confirm-payment/{id}/` - Confirm a payment
 */

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::backend::auth::{get_me, login, refresh, register};
use crate::backend::newsletter::subscribe;
use crate::backend::notes::{create_note, delete_note, list_notes};
use crate::backend::password_reset::{request_reset_handler, verify_reset_handler};
use crate::backend::payments::{confirm_payment, create_payment_intent, get_stripe_config};
use crate::backend::server::state::AppState;

/// Routes callable without a token
pub fn configure_public_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/user/register/", post(register))
        .route("/api/token/", post(login))
        .route("/api/token/refresh/", post(refresh))
        .route("/api/password/request-reset/", post(request_reset_handler))
        .route("/api/password/verify-reset/", post(verify_reset_handler))
        .route("/api/payments/config/", get(get_stripe_config))
        .route("/newsletter/subscribe", post(subscribe))
}

/// Routes that require a valid access token
///
/// The caller is expected to apply `auth_middleware` to the returned router.
pub fn configure_protected_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/user/current/", get(get_me))
        .route("/api/notes/", get(list_notes).post(create_note))
        .route("/api/notes/delete/{id}/", delete(delete_note))
        .route("/api/payments/create-payment-intent/", post(create_payment_intent))
        .route("/api/payments/confirm-payment/{id}/", post(confirm_payment))
}

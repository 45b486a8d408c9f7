//! API root: a welcome message and a map of the endpoints.

use axum::response::Json;
use serde_json::{json, Value};

pub async fn api_root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Notes API",
        "endpoints": {
            "register": "/api/user/register/",
            "token": "/api/token/",
            "token_refresh": "/api/token/refresh/",
            "current_user": "/api/user/current/",
            "notes": "/api/notes/",
            "delete_note": "/api/notes/delete/{id}/",
            "password_reset_request": "/api/password/request-reset/",
            "password_reset_verify": "/api/password/verify-reset/",
            "payments_config": "/api/payments/config/",
            "create_payment_intent": "/api/payments/create-payment-intent/",
            "confirm_payment": "/api/payments/confirm-payment/{id}/",
            "newsletter_subscribe": "/newsletter/subscribe",
        }
    }))
}

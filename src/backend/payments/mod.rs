//! Payments Module
//!
//! Stripe payment intents with a local record per intent.
//!
//! - **`amount`** - Exact dollar amounts as integer cents
//! - **`db`** - Payment records and their status
//! - **`stripe`** - The processor client
//! - **`handlers`** - HTTP handlers
//!
//! A payment is created `pending` and becomes `completed` only through the
//! confirmation endpoint.

pub mod amount;
pub mod db;
pub mod handlers;
pub mod stripe;

pub use db::{Payment, PaymentStatus};
pub use handlers::{confirm_payment, create_payment_intent, get_stripe_config};
pub use stripe::StripeClient;

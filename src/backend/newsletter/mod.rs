//! Newsletter Module
//!
//! Anonymous email signups, unique per address and throttled per client.

pub mod db;
pub mod handlers;

pub use handlers::subscribe;

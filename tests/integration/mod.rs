//! Integration tests

mod api;
mod database;

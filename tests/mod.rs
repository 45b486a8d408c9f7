//! Test suite for the notes backend
//!
//! This module organizes all integration tests

pub mod common;
pub mod integration;

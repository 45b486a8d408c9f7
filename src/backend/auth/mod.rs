//! Authentication Module
//!
//! This module handles user registration, authentication and session tokens.
//! It provides HTTP handlers for authentication endpoints and manages user
//! data, JWT tokens and remember-me records.
//!
//! # Architecture
//!
//! The auth module is organized into focused submodules:
//!
//! - **`users`** - User data model and database operations
//! - **`sessions`** - JWT token generation and validation
//! - **`passwords`** - bcrypt hashing and verification
//! - **`remember_me`** - Long-lived token records for remembered logins
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Authentication Flow
//!
//! 1. **Register**: username, email and password → User created → 201 with public fields
//! 2. **Token**: username or email plus password → access/refresh pair
//! 3. **Refresh**: refresh token → new access token
//! 4. **Current user**: bearer access token → user info
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Access and refresh tokens carry a type claim and cannot stand in for each other
//! - Inactive users can neither log in nor use existing tokens

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// Password hashing
pub mod passwords;

/// Remember-me token records
pub mod remember_me;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::types::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};
pub use handlers::{get_me, login, refresh, register};
pub use sessions::TokenIssuer;

//! # Middleware Module
//!
//! Request interceptors for cross-cutting concerns.
//!
//! ## Our Middleware
//! - `auth`: Rejects requests unless a user is signed in

pub mod auth;

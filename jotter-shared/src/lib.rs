//! # Jotter Shared Library
//!
//! Shared types and business logic used by the Jotter API server.
//!
//! ## Module Organization
//!
//! - `models`: Database models (users, notes) and their SQL operations
//! - `auth`: Password hashing, session tokens, and the request auth gate
//! - `db`: Connection pool and migrations

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Jotter shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (register, login)
/// - `notes`: Owner-scoped note CRUD endpoints

pub mod auth;
pub mod health;
pub mod notes;

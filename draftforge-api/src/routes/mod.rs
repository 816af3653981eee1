/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: health check endpoint
/// - `auth`: registration and login
/// - `project`: project creation, bulk generation, fetch, export
/// - `refine`: per-section rewrite and review feedback

pub mod auth;
pub mod health;
pub mod project;
pub mod refine;

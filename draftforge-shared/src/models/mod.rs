/// Database models for DraftForge
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: registered accounts (email + Argon2id password hash)
/// - `project`: one authored document, owned by a user
/// - `section`: one outline entry of a project, with generated/refined text
///
/// Ownership is a strict chain: a section belongs to exactly one project, a
/// project to exactly one user. Lookups that mutate or expose content take
/// the caller's user id and fold the ownership check into the query, so a
/// row owned by someone else is indistinguishable from a missing row.

pub mod project;
pub mod section;
pub mod user;

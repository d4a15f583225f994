//! Catalog domain model.
//!
//! # Responsibility
//! - Define the plain data structures shared by repositories and services.
//! - Keep relationships explicit as id references, never lazily loaded.
//!
//! # Invariants
//! - Every entity is identified by a stable SQLite rowid.
//! - Activities, buildings and organizations are never deleted by the core.

pub mod activity;
pub mod building;
pub mod organization;

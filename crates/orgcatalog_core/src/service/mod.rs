//! Catalog use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Enforce business rules (nesting depth, referential checks, input
//!   validation) above the repository layer.
//! - Keep boundary layers decoupled from storage details.

pub mod activity_service;
pub mod building_service;
pub mod organization_service;

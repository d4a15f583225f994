//! Multi-field organization search.
//!
//! # Responsibility
//! - Combine optional substring predicates over organization name, building
//!   address and activity name into one filtered result set.
//! - Keep SQL shaping for search inside core.

pub mod organization_search;

pub use organization_search::{search_organizations, SearchError, SearchQuery, SearchResult};

//! Core domain concepts shared across all subdomains.
//!
//! - [`category::Category`]: the fixed set of thematic buckets a Topic belongs to
//! - [`error::DomainError`]: domain-level errors

pub mod category;
pub mod error;

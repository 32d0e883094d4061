//! Infrastructure layer for external integrations.
//!
//! Implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`cache`] - Caching abstractions (Redis and no-op implementations)
//! - [`enrichment`] - GeoIP and user-agent enrichment backends
//! - [`persistence`] - PostgreSQL repository implementations

pub mod cache;
pub mod enrichment;
pub mod persistence;

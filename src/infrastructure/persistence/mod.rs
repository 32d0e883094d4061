//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Tracking-link storage and slug reservation
//! - [`PgClickRepository`] - Click ingestion and analytics queries

pub mod pg_click_repository;
pub mod pg_link_repository;

pub use pg_click_repository::PgClickRepository;
pub use pg_link_repository::PgLinkRepository;

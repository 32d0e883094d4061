//! Domain layer containing business entities and logic.
//!
//! Defines entities, repository interfaces, and the click-ingestion pipeline
//! independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`enrichment`] - Best-effort visit enrichment boundary
//! - [`click_event`] - Queued click event model
//! - [`click_worker`] - Asynchronous click processing worker
//!
//! # Click Processing Flow
//!
//! 1. Redirect handler resolves the link and captures a
//!    [`click_event::ClickEvent`]
//! 2. The event is sent to a bounded channel (fire-and-forget)
//! 3. [`click_worker::run_click_worker`] enriches it under a timeout and
//!    persists it with retry via [`repositories::ClickRepository`]

pub mod click_event;
pub mod click_worker;
pub mod enrichment;
pub mod entities;
pub mod repositories;

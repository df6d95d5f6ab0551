//! # API Shared
//!
//! Shared definitions for the tarot APIs.
//!
//! Contains:
//! - JSON wire types (`dto` module) with OpenAPI schemas
//! - Shared services like `HealthService`
//!
//! Used by `api-rest`; kept free of domain logic so clients can depend on it alone.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;

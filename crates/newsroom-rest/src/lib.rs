//! # Newsroom REST
//!
//! REST API layer using Axum. Exposes news, videos, users, comments and
//! likes under `/api/v1` plus the usual health checks.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;

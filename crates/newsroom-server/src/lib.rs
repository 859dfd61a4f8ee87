//! # Newsroom Server Library
//!
//! Dependency injection wiring, background jobs and startup helpers for the
//! server binary.

pub mod di;
pub mod jobs;
pub mod startup;

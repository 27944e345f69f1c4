//! EventHub Core - Shared types library.
//!
//! This crate provides common types used across all EventHub components:
//! - `storefront` - Public-facing event discovery and booking site
//! - `integration-tests` - End-to-end tests
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients,
//! no session handling. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

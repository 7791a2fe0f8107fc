//! ArtVista Core - Shared types library.
//!
//! This crate provides common types used across all ArtVista components:
//! - `storefront` - Session, cart, catalog and directory services
//! - `integration-tests` - End-to-end flow tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! clocks. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe ids, emails, phone numbers,
//!   prices and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

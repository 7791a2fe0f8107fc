//! ArtVista storefront domain services.
//!
//! This crate provides the state that backs the ArtVista marketplace UI:
//! the authenticated session, the shopping cart, the mock catalog and the
//! user directory. Rendering, routing and form handling live in the
//! embedding application; everything here is plain in-process calls.
//!
//! # Architecture
//!
//! - [`services::session`] - Credential flows and the current identity
//! - [`services::cart`] - Cart line items, totals and snapshot persistence
//! - [`storage`] - Pluggable key-value persistence (memory or file backed)
//! - [`catalog`] - Read-only seeded artwork dataset
//! - [`directory`] - In-memory account registry
//! - [`notify`] - Outcome events toward the presentation layer

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod directory;
pub mod models;
pub mod notify;
pub mod services;
pub mod storage;
pub mod telemetry;

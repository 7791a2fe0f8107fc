//! Core types for ArtVista.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod assertion;
pub mod email;
pub mod id;
pub mod phone;
pub mod price;
pub mod role;

pub use assertion::OAuthAssertion;
pub use email::{Email, EmailError};
pub use id::*;
pub use phone::{Phone, PhoneError};
pub use price::{CurrencyCode, Price};
pub use role::Role;

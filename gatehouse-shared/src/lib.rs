//! # Gatehouse Shared Library
//!
//! This crate contains the domain core shared by the Gatehouse API server:
//! the authentication/authorization stack, the account model, and the
//! account directory abstraction.
//!
//! ## Module Organization
//!
//! - `auth`: Password hashing, bearer tokens, and access control
//! - `models`: Account records and their outward-facing views
//! - `directory`: The account store trait and its in-memory implementation

pub mod auth;
pub mod directory;
pub mod models;

/// Current version of the Gatehouse shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

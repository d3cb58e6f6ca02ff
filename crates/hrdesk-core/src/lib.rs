//! hrdesk core: runtime-free permission and upload predicates.
//!
//! This crate holds the decision layer shared by the gateway and the UI
//! adapters: role policy tables, file-upload validation, filename generation,
//! and the two-segment meter split. It carries no async runtime or I/O
//! dependencies, so every function here is synchronous and reentrant.
//!
//! # Guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Predicates are total: expected user-input conditions come back as values,
//! and only misuse surfaces as `DeskError`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod meter;
pub mod policy;
pub mod upload;

/// Shared result type.
pub use error::{DeskError, Result};

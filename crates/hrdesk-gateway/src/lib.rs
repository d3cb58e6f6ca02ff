//! hrdesk gateway library entry.
//!
//! This crate wires the debounced input gateways, the per-field registry,
//! strict configuration, and in-process counters around the pure predicates
//! from `hrdesk-core`. It is consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod config;
pub mod debounce;
pub mod obs;
pub mod runtime;

//! Top-level facade crate for hrdesk.
//!
//! Re-exports the predicates and the gateway library so users can depend on a single crate.

pub mod core {
    pub use hrdesk_core::*;
}

pub mod gateway {
    pub use hrdesk_gateway::*;
}

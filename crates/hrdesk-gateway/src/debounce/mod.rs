//! Trailing-edge debounce for UI input fields.
//!
//! A `DebounceGateway` owns at most one pending emission. Every `submit`
//! supersedes the previous one, so only the last value of a burst reaches
//! the sink. The `GatewayRegistry` keeps one gateway per input field.

pub mod gateway;
pub mod registry;

pub use gateway::{DebounceConfig, DebounceGateway, GatewayState, SettledSink, DEFAULT_DELAY_MS};
pub use registry::GatewayRegistry;

//! One debounce gateway per input field.

use std::sync::Arc;

use dashmap::DashMap;

use crate::obs::DeskMetrics;

use super::gateway::{DebounceConfig, DebounceGateway, SettledSink};

pub struct GatewayRegistry {
    gateways: DashMap<String, Arc<DebounceGateway>>,
    config: DebounceConfig,
    metrics: Arc<DeskMetrics>,
}

impl GatewayRegistry {
    pub fn new(config: DebounceConfig, metrics: Arc<DeskMetrics>) -> Self {
        Self {
            gateways: DashMap::new(),
            config,
            metrics,
        }
    }

    pub fn config(&self) -> DebounceConfig {
        self.config
    }

    /// Create the gateway for `field`. An existing one is disposed and replaced.
    pub fn register(&self, field: &str, sink: impl SettledSink + 'static) -> Arc<DebounceGateway> {
        let gateway = Arc::new(DebounceGateway::with_parts(
            field,
            self.config,
            Arc::new(sink),
            Arc::clone(&self.metrics),
        ));
        if let Some(old) = self.gateways.insert(field.to_string(), Arc::clone(&gateway)) {
            tracing::debug!(field = %field, "replacing debounce gateway");
            old.dispose();
        }
        gateway
    }

    pub fn get(&self, field: &str) -> Option<Arc<DebounceGateway>> {
        self.gateways.get(field).map(|g| Arc::clone(g.value()))
    }

    /// Dispose and forget `field`'s gateway. Returns whether one existed.
    pub fn remove(&self, field: &str) -> bool {
        match self.gateways.remove(field) {
            Some((_, gateway)) => {
                gateway.dispose();
                true
            }
            None => false,
        }
    }

    pub fn dispose_all(&self) {
        let fields: Vec<String> = self.gateways.iter().map(|g| g.key().clone()).collect();
        for field in fields {
            self.remove(&field);
        }
    }

    pub fn len(&self) -> usize {
        self.gateways.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gateways.is_empty()
    }
}

//! Shared runtime state for the desk gateway.
//!
//! Compiles a `DeskConfig` once into role/upload policies, a filename namer,
//! and a gateway registry. Cloning is cheap; all clones share metrics.

use std::sync::Arc;

use hrdesk_core::error::Result;
use hrdesk_core::policy::{Permission, RolePolicy};
use hrdesk_core::upload::{FileCandidate, UploadNamer, UploadPolicy, ValidationResult};

use crate::config::DeskConfig;
use crate::debounce::GatewayRegistry;
use crate::obs::DeskMetrics;

#[derive(Clone)]
pub struct DeskRuntime {
    inner: Arc<DeskRuntimeInner>,
}

struct DeskRuntimeInner {
    cfg: DeskConfig,
    roles: RolePolicy,
    uploads: UploadPolicy,
    namer: UploadNamer,
    registry: GatewayRegistry,
    metrics: Arc<DeskMetrics>,
}

impl DeskRuntime {
    /// Build runtime state. Returns Result so main can report bad config.
    pub fn new(cfg: DeskConfig) -> Result<Self> {
        cfg.check_version()?;

        let debounce = cfg.debounce.compile()?;
        let roles = cfg.permissions.compile()?;
        let uploads = cfg.uploads.compile_policy()?;
        let namer = cfg.uploads.compile_namer()?;

        for permission in cfg.permissions.unreachable() {
            tracing::warn!(permission = permission.as_str(), "no role holds this permission");
        }

        let metrics = Arc::new(DeskMetrics::default());
        let registry = GatewayRegistry::new(debounce, Arc::clone(&metrics));

        tracing::info!(
            delay_ms = debounce.delay().as_millis() as u64,
            max_upload_bytes = uploads.max_size_bytes(),
            "desk runtime ready"
        );

        Ok(Self {
            inner: Arc::new(DeskRuntimeInner {
                cfg,
                roles,
                uploads,
                namer,
                registry,
                metrics,
            }),
        })
    }

    pub fn cfg(&self) -> &DeskConfig {
        &self.inner.cfg
    }

    pub fn roles(&self) -> &RolePolicy {
        &self.inner.roles
    }

    pub fn uploads(&self) -> &UploadPolicy {
        &self.inner.uploads
    }

    pub fn registry(&self) -> &GatewayRegistry {
        &self.inner.registry
    }

    pub fn metrics(&self) -> Arc<DeskMetrics> {
        Arc::clone(&self.inner.metrics)
    }

    /// Permission check, counted per permission and decision.
    pub fn check(&self, permission: Permission, role: Option<&str>) -> bool {
        let allowed = self.inner.roles.allows(permission, role);
        let decision = if allowed { "allow" } else { "deny" };
        self.inner
            .metrics
            .permission_checks
            .inc(&[("permission", permission.as_str()), ("decision", decision)]);
        allowed
    }

    /// Upload policy check, counted per outcome.
    pub fn validate_upload(&self, file: &FileCandidate) -> ValidationResult {
        let result = self.inner.uploads.validate(file);
        let label = result.reason().map(|r| r.label()).unwrap_or("accepted");
        self.inner.metrics.upload_decisions.inc(&[("result", label)]);
        if let Some(reason) = result.error() {
            tracing::debug!(mime = %file.mime_type, size = file.size_bytes, reason, "upload rejected");
        }
        result
    }

    pub fn upload_filename(&self, owner_id: &str, original_name: &str) -> String {
        self.inner.namer.build(owner_id, original_name)
    }
}

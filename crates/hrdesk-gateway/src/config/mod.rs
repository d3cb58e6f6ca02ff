//! Desk config loader (strict parsing).

pub mod schema;

use std::fs;

use hrdesk_core::error::{DeskError, Result};

pub use schema::{DebounceSection, DeskConfig, PermissionsSection, UploadsSection};

pub fn load_from_file(path: &str) -> Result<DeskConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| DeskError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<DeskConfig> {
    let cfg: DeskConfig = serde_yaml::from_str(s)
        .map_err(|e| DeskError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

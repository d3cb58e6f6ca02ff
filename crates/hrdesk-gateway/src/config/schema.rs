use serde::Deserialize;

use hrdesk_core::error::{DeskError, Result};
use hrdesk_core::policy::{Permission, RolePolicy, ROLE_HRM, ROLE_OPERATION_MANAGER};
use hrdesk_core::upload::{
    UploadNamer, UploadPolicy, DEFAULT_ALLOWED_MIME_TYPES, DEFAULT_MAX_SIZE_BYTES, DEFAULT_PREFIX,
};

use crate::debounce::{DebounceConfig, DEFAULT_DELAY_MS};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeskConfig {
    pub version: u32,

    #[serde(default)]
    pub debounce: DebounceSection,

    #[serde(default)]
    pub uploads: UploadsSection,

    #[serde(default)]
    pub permissions: PermissionsSection,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            version: 1,
            debounce: DebounceSection::default(),
            uploads: UploadsSection::default(),
            permissions: PermissionsSection::default(),
        }
    }
}

impl DeskConfig {
    pub fn check_version(&self) -> Result<()> {
        if self.version != 1 {
            return Err(DeskError::UnsupportedVersion);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.check_version()?;

        self.debounce.compile()?;
        self.uploads.compile_policy()?;
        self.uploads.compile_namer()?;
        self.permissions.compile()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DebounceSection {
    /// Signed so a negative value reaches validation as InvalidConfig
    /// instead of failing as a yaml type error.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: i64,
}

impl Default for DebounceSection {
    fn default() -> Self {
        Self { delay_ms: default_delay_ms() }
    }
}

impl DebounceSection {
    pub fn compile(&self) -> Result<DebounceConfig> {
        DebounceConfig::new(self.delay_ms)
    }
}

fn default_delay_ms() -> i64 {
    DEFAULT_DELAY_MS as i64
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UploadsSection {
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,

    #[serde(default = "default_max_size_bytes")]
    pub max_size_bytes: u64,

    #[serde(default = "default_filename_prefix")]
    pub filename_prefix: String,
}

impl Default for UploadsSection {
    fn default() -> Self {
        Self {
            allowed_mime_types: default_allowed_mime_types(),
            max_size_bytes: default_max_size_bytes(),
            filename_prefix: default_filename_prefix(),
        }
    }
}

impl UploadsSection {
    pub fn compile_policy(&self) -> Result<UploadPolicy> {
        UploadPolicy::new(self.allowed_mime_types.clone(), self.max_size_bytes)
    }

    pub fn compile_namer(&self) -> Result<UploadNamer> {
        UploadNamer::new(self.filename_prefix.clone())
    }
}

fn default_allowed_mime_types() -> Vec<String> {
    DEFAULT_ALLOWED_MIME_TYPES.iter().map(|m| m.to_string()).collect()
}
fn default_max_size_bytes() -> u64 {
    DEFAULT_MAX_SIZE_BYTES
}
fn default_filename_prefix() -> String {
    DEFAULT_PREFIX.into()
}

/// Privileged role tokens per permission (exact, case-sensitive).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PermissionsSection {
    #[serde(default = "default_privileged")]
    pub edit_users: Vec<String>,

    #[serde(default = "default_privileged")]
    pub view_contract: Vec<String>,

    #[serde(default = "default_privileged")]
    pub delete_users: Vec<String>,
}

impl Default for PermissionsSection {
    fn default() -> Self {
        Self {
            edit_users: default_privileged(),
            view_contract: default_privileged(),
            delete_users: default_privileged(),
        }
    }
}

impl PermissionsSection {
    fn entries(&self) -> [(Permission, &[String]); 3] {
        [
            (Permission::EditUsers, self.edit_users.as_slice()),
            (Permission::ViewContract, self.view_contract.as_slice()),
            (Permission::DeleteUsers, self.delete_users.as_slice()),
        ]
    }

    pub fn compile(&self) -> Result<RolePolicy> {
        RolePolicy::from_lists(self.entries())
    }

    /// Permissions nobody can exercise.
    pub fn unreachable(&self) -> Vec<Permission> {
        self.entries()
            .iter()
            .filter(|(_, roles)| roles.is_empty())
            .map(|(p, _)| *p)
            .collect()
    }
}

fn default_privileged() -> Vec<String> {
    vec![ROLE_HRM.into(), ROLE_OPERATION_MANAGER.into()]
}

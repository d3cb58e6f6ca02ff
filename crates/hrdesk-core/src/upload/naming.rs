//! Stored filename generation.
//!
//! Names have the shape `{prefix}-{owner}-{unix_millis}-{seq}.{ext}`. The
//! timestamp alone is not unique under load (millisecond clocks repeat), so
//! every namer carries its own monotonically increasing `seq`. Every part of
//! a stored name is restricted to `[A-Za-z0-9_-]` plus the single `.` before
//! the extension, so a name never carries path segments.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{DeskError, Result};

pub const DEFAULT_PREFIX: &str = "upload";

/// Substring after the last `.`, lower-cased. Empty when there is no `.`.
pub fn derive_file_extension(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    }
}

fn sanitize_owner(owner_id: &str) -> String {
    owner_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

/// Extension kept only when it is plain ASCII alphanumeric; otherwise dropped.
fn stored_extension(original_name: &str) -> String {
    let ext = derive_file_extension(original_name);
    if ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        ext
    } else {
        String::new()
    }
}

fn unix_millis() -> u64 {
    // Clock before 1970 only happens on broken hosts; fall back to 0 and
    // let `seq` keep names distinct.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Generates upload filenames for one storage bucket.
#[derive(Debug)]
pub struct UploadNamer {
    prefix: String,
    seq: AtomicU64,
}

impl Default for UploadNamer {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            seq: AtomicU64::new(0),
        }
    }
}

impl UploadNamer {
    pub fn new(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(DeskError::BadRequest("filename prefix must not be empty".into()));
        }
        if prefix.contains(['/', '\\', '.']) {
            return Err(DeskError::BadRequest(format!(
                "filename prefix must not contain path separators or '.': {prefix}"
            )));
        }
        Ok(Self { prefix, seq: AtomicU64::new(0) })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Name stamped with the current wall clock.
    pub fn build(&self, owner_id: &str, original_name: &str) -> String {
        self.build_at(owner_id, original_name, unix_millis())
    }

    /// Name stamped with an explicit timestamp.
    pub fn build_at(&self, owner_id: &str, original_name: &str, unix_millis: u64) -> String {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let owner = sanitize_owner(owner_id);
        let ext = stored_extension(original_name);
        let stem = format!("{}-{}-{}-{}", self.prefix, owner, unix_millis, seq);
        if ext.is_empty() {
            stem
        } else {
            format!("{stem}.{ext}")
        }
    }
}

/// Build a name with the process-wide default namer.
pub fn build_upload_filename(owner_id: &str, original_name: &str) -> String {
    static NAMER: OnceLock<UploadNamer> = OnceLock::new();
    NAMER.get_or_init(UploadNamer::default).build(owner_id, original_name)
}

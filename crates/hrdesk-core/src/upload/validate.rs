//! File candidate validation (type allow-list, then size cap).

use serde::{Deserialize, Serialize};

use crate::error::{DeskError, Result};

/// JPEG, PNG and GIF variants accepted by default.
pub const DEFAULT_ALLOWED_MIME_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/pjpeg",
    "image/png",
    "image/gif",
];

/// 5 MiB.
pub const DEFAULT_MAX_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// File picked by the user, as reported by the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCandidate {
    pub mime_type: String,
    pub size_bytes: u64,
    pub name: String,
}

impl FileCandidate {
    pub fn new(mime_type: impl Into<String>, size_bytes: u64, name: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            size_bytes,
            name: name.into(),
        }
    }
}

/// Why a candidate was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    UnsupportedType,
    TooLarge,
}

impl RejectReason {
    /// User-facing message.
    pub fn as_str(self) -> &'static str {
        match self {
            RejectReason::UnsupportedType => "unsupported type",
            RejectReason::TooLarge => "too large",
        }
    }

    /// Metric label.
    pub fn label(self) -> &'static str {
        match self {
            RejectReason::UnsupportedType => "unsupported_type",
            RejectReason::TooLarge => "too_large",
        }
    }
}

/// Outcome of `validate_file_candidate`.
/// `error()` is `Some` exactly when `is_valid()` is false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    reason: Option<RejectReason>,
}

impl ValidationResult {
    pub fn accepted() -> Self {
        Self { reason: None }
    }

    pub fn rejected(reason: RejectReason) -> Self {
        Self { reason: Some(reason) }
    }

    pub fn is_valid(&self) -> bool {
        self.reason.is_none()
    }

    pub fn error(&self) -> Option<&'static str> {
        self.reason.map(RejectReason::as_str)
    }

    pub fn reason(&self) -> Option<RejectReason> {
        self.reason
    }

    /// Lift a rejection into `DeskError::ValidationRejected` for `?` callers.
    pub fn into_result(self) -> Result<()> {
        match self.reason {
            None => Ok(()),
            Some(r) => Err(DeskError::ValidationRejected(r.as_str().to_string())),
        }
    }
}

/// Allow-list and size cap applied to uploads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    allowed_mime_types: Vec<String>,
    max_size_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_mime_types: DEFAULT_ALLOWED_MIME_TYPES.iter().map(|m| m.to_string()).collect(),
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
        }
    }
}

impl UploadPolicy {
    pub fn new(allowed_mime_types: Vec<String>, max_size_bytes: u64) -> Result<Self> {
        if allowed_mime_types.is_empty() {
            return Err(DeskError::BadRequest("allowed_mime_types must not be empty".into()));
        }
        if let Some(bad) = allowed_mime_types.iter().find(|m| !m.contains('/')) {
            return Err(DeskError::BadRequest(format!(
                "invalid mime type: {bad} (expected type/subtype)"
            )));
        }
        if max_size_bytes == 0 {
            return Err(DeskError::BadRequest("max_size_bytes must be greater than 0".into()));
        }
        Ok(Self { allowed_mime_types, max_size_bytes })
    }

    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_bytes
    }

    pub fn allowed_mime_types(&self) -> &[String] {
        &self.allowed_mime_types
    }

    fn is_type_allowed(&self, mime_type: &str) -> bool {
        self.allowed_mime_types
            .iter()
            .any(|m| m.eq_ignore_ascii_case(mime_type))
    }

    /// Type first, then size. A file failing both reports the type.
    pub fn validate(&self, file: &FileCandidate) -> ValidationResult {
        if !self.is_type_allowed(&file.mime_type) {
            return ValidationResult::rejected(RejectReason::UnsupportedType);
        }
        if file.size_bytes > self.max_size_bytes {
            return ValidationResult::rejected(RejectReason::TooLarge);
        }
        ValidationResult::accepted()
    }
}

/// Validate against the default policy.
pub fn validate_file_candidate(file: &FileCandidate) -> ValidationResult {
    UploadPolicy::default().validate(file)
}

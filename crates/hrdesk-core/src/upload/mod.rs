//! Upload gatekeeping: file policy validation and stored filename generation.

pub mod naming;
pub mod validate;

pub use naming::{build_upload_filename, derive_file_extension, UploadNamer, DEFAULT_PREFIX};
pub use validate::{
    validate_file_candidate, FileCandidate, RejectReason, UploadPolicy, ValidationResult,
    DEFAULT_ALLOWED_MIME_TYPES, DEFAULT_MAX_SIZE_BYTES,
};

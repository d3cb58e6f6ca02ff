#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use hrdesk_core::policy::Permission;
use hrdesk_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
uploads:
  max_size_bytez: 123 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.debounce.delay_ms, 300);
    assert_eq!(cfg.uploads.max_size_bytes, 5 * 1024 * 1024);
    assert_eq!(cfg.uploads.filename_prefix, "upload");
    assert_eq!(cfg.permissions.edit_users, vec!["HRM", "OPERATION_MANAGER"]);
    assert!(cfg.permissions.unreachable().is_empty());
}

#[test]
fn negative_delay_is_invalid_config() {
    let bad = r#"
version: 1
debounce:
  delay_ms: -1
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "INVALID_CONFIG");
}

#[test]
fn zero_delay_is_allowed() {
    let cfg = config::load_from_str("version: 1\ndebounce: { delay_ms: 0 }\n").unwrap();
    assert!(cfg.debounce.compile().unwrap().is_immediate());
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn missing_version_fails() {
    let err = config::load_from_str("debounce: { delay_ms: 10 }\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_REQUEST");
}

#[test]
fn empty_mime_allowlist_fails() {
    let bad = r#"
version: 1
uploads:
  allowed_mime_types: []
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_REQUEST");
}

#[test]
fn bad_filename_prefix_fails() {
    let err = config::load_from_str("version: 1\nuploads: { filename_prefix: \"../x\" }\n")
        .expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_REQUEST");
}

#[test]
fn blank_role_token_fails() {
    let bad = r#"
version: 1
permissions:
  delete_users: ["HRM", ""]
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_REQUEST");
}

#[test]
fn permissions_compile_independently() {
    let ok = r#"
version: 1
permissions:
  delete_users: ["HRM"]
  view_contract: []
"#;
    let cfg = config::load_from_str(ok).unwrap();
    let roles = cfg.permissions.compile().unwrap();

    assert!(roles.can_delete_users(Some("HRM")));
    assert!(!roles.can_delete_users(Some("OPERATION_MANAGER")));
    assert!(roles.can_edit_users(Some("OPERATION_MANAGER")));
    assert!(!roles.can_view_contract(Some("HRM")));
    assert_eq!(cfg.permissions.unreachable(), vec![Permission::ViewContract]);
}

#[test]
fn unknown_permission_key_fails() {
    let bad = r#"
version: 1
permissions:
  approve_leave: ["HRM"]
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_REQUEST");
}

#[test]
fn missing_file_is_internal() {
    let err = config::load_from_file("does/not/exist.yaml").expect_err("must fail");
    assert_eq!(err.code().as_str(), "INTERNAL");
}

#[test]
fn shipped_config_loads() {
    let cfg = config::load_from_file("../../hrdesk.yaml").expect("shipped config must load");
    assert_eq!(cfg.debounce.delay_ms, 300);
    assert_eq!(cfg.uploads.allowed_mime_types.len(), 5);
}

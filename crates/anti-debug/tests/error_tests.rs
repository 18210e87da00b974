use anti_debug::AntiDebugError;

#[test]
fn error_codes_are_stable() {
    let deny = AntiDebugError::DenyAttachFailed { errno: 1 };
    let query = AntiDebugError::ProcessQueryFailed {
        pid: 7,
        detail: "gone".to_string(),
    };
    let unsupported = AntiDebugError::Unsupported {
        operation: "trace_flag",
    };

    assert_eq!(deny.code(), "deny_attach_failed");
    assert_eq!(query.code(), "process_query_failed");
    assert_eq!(unsupported.code(), "unsupported_platform");
}

#[test]
fn only_deny_failures_carry_an_errno() {
    assert_eq!(
        AntiDebugError::DenyAttachFailed { errno: 13 }.raw_os_error(),
        Some(13)
    );
    assert_eq!(
        AntiDebugError::Unsupported {
            operation: "deny_attach"
        }
        .raw_os_error(),
        None
    );
}

#[test]
fn display_names_the_failing_query() {
    let rendered = AntiDebugError::ProcessQueryFailed {
        pid: 4242,
        detail: "No such file or directory".to_string(),
    }
    .to_string();
    assert!(rendered.contains("pid 4242"));
    assert!(rendered.contains("No such file"));

    let unsupported = AntiDebugError::Unsupported {
        operation: "deny_attach",
    }
    .to_string();
    assert_eq!(unsupported, "deny_attach is not supported on this platform");
}

//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use storyloom_foundation::{Error, ErrorContext, ErrorKind, InputError, NodeId};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_invalid_node() {
    let err = Error::invalid_node("attic", "text is empty");
    assert_eq!(
        err.kind,
        ErrorKind::InvalidNode {
            node: "attic".into(),
            reason: "text is empty".into()
        }
    );
}

#[test]
fn error_missing_target() {
    let err = Error::missing_target(&NodeId::from("hall"), "void");
    assert!(matches!(err.kind, ErrorKind::BrokenGraph(_)));
    let msg = format!("{err}");
    assert!(msg.contains("hall"));
    assert!(msg.contains("void"));
}

#[test]
fn error_unknown_node() {
    let err = Error::unknown_node("cellar");
    assert!(matches!(err.kind, ErrorKind::BrokenGraph(_)));
    assert!(err.to_string().contains("cellar"));
}

#[test]
fn io_errors_convert() {
    let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
    let err: Error = io.into();
    assert!(matches!(err.kind, ErrorKind::Io(_)));
    assert!(err.to_string().contains("pipe closed"));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_is_shown_after_kind() {
    let err = Error::script("attempt to call a nil value").with_context(
        ErrorContext::new()
            .with_node(NodeId::from("door"))
            .with_hook("openDoor"),
    );
    assert_eq!(
        err.to_string(),
        "script error: attempt to call a nil value (at node 'door', in hook 'openDoor')"
    );
}

#[test]
fn at_node_keeps_existing_node() {
    let inner = Error::script("boom")
        .with_context(ErrorContext::new().with_node(NodeId::from("a")));
    let err = inner.at_node(&NodeId::from("b"));
    assert_eq!(err.context.unwrap().node, Some(NodeId::from("a")));

    let err = Error::script("boom").at_node(&NodeId::from("b"));
    assert_eq!(err.context.unwrap().node, Some(NodeId::from("b")));
}

#[test]
fn context_frames_are_listed_in_order() {
    let ctx = ErrorContext::new().with_frame("load").with_frame("chunk");
    assert_eq!(ctx.to_string(), "in load, in chunk");
}

// =============================================================================
// Input Errors
// =============================================================================

#[test]
fn input_errors_describe_the_rejection() {
    let not_a_number = InputError::NotANumber("abc".into());
    assert!(not_a_number.to_string().contains("abc"));
    assert_eq!(
        InputError::OutOfRange {
            choice: 9,
            count: 2
        }
        .to_string(),
        "choice 9 is out of range (1-2)"
    );
    assert_eq!(
        InputError::Ineligible { choice: 1 }.to_string(),
        "choice 1 is not available"
    );
}

#[test]
fn node_ids_compare_with_strings() {
    let id = NodeId::from("north");
    assert_eq!(id, "north");
    assert_eq!(id.as_str(), "north");
    assert!(!id.is_empty());
    assert!(NodeId::new("").is_empty());
}

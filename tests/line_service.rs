//! Line service loop driven over in-memory streams.

use std::io::Cursor;

use varspace::context::{Context, ContextConfig};
use varspace::server::LineService;

fn quiet_service() -> LineService {
    let context = Context::new(ContextConfig {
        quiet: true,
        ..ContextConfig::default()
    })
    .unwrap();
    LineService::new(context)
}

fn drive(service: &mut LineService, input: &str) -> Vec<String> {
    let reader = Cursor::new(input.as_bytes().to_vec());
    let mut output = Vec::new();
    service.handle(reader, &mut output).unwrap();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn replies_arrive_in_order_one_per_line() {
    let mut service = quiet_service();
    let replies = drive(
        &mut service,
        "Integer create: x, withValue: 7\nx getValue\nContext listVariables\n",
    );
    assert_eq!(replies, vec!["null", "7", "[x]"]);
}

#[test]
fn blank_lines_are_skipped() {
    let mut service = quiet_service();
    let replies = drive(&mut service, "\n   \nBoolean create: b\n\nb getValue\n");
    assert_eq!(replies, vec!["null", "false"]);
}

#[test]
fn state_survives_across_connections() {
    let mut service = quiet_service();
    drive(&mut service, "Integer create: keep, withValue: 5\n");
    let replies = drive(&mut service, "keep getValue\n");
    assert_eq!(replies, vec!["5"]);
}

#[test]
fn connection_close_ends_the_loop() {
    let mut service = quiet_service();
    let replies = drive(
        &mut service,
        "Connection close\nInteger create: after, withValue: 1\n",
    );
    assert_eq!(replies, vec!["null"]);
    // The line after the close was never dispatched.
    let replies = drive(&mut service, "after getValue\n");
    assert_eq!(replies, vec!["EXC_UNEXISTENT_VARIABLE"]);
}

#[test]
fn connection_get_id_is_a_quoted_string() {
    let mut service = quiet_service();
    let replies = drive(&mut service, "Connection getId\n");
    assert_eq!(replies.len(), 1);
    assert!(replies[0].starts_with('"') && replies[0].ends_with('"'));
}

#[test]
fn each_connection_gets_a_fresh_session_id() {
    let mut service = quiet_service();
    let first = drive(&mut service, "Connection getId\n");
    let second = drive(&mut service, "Connection getId\n");
    assert_ne!(first, second);
}

#[test]
fn unknown_connection_selector_is_reported() {
    let mut service = quiet_service();
    let replies = drive(&mut service, "Connection reboot\nConnection close: now\n");
    assert_eq!(
        replies,
        vec!["EXC_INVALID_MESSAGE", "EXC_WRONG_NUMBER_OF_ARGUMENTS"]
    );
}

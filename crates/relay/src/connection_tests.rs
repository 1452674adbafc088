// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn plain_line_is_trimmed() {
    assert_eq!(message_body("  status: low battery  "), "status: low battery");
}

#[test]
fn tab_prefix_is_discarded() {
    assert_eq!(message_body("Alice\tHello there"), "Hello there");
}

#[test]
fn only_first_tab_splits() {
    assert_eq!(message_body("Alice\tcol1\tcol2"), "col1\tcol2");
}

#[test]
fn tab_body_is_trimmed() {
    assert_eq!(message_body("Alice\t  spaced out \r"), "spaced out");
}

#[test]
fn trailing_carriage_return_is_stripped() {
    assert_eq!(message_body("hello\r"), "hello");
}

#[test]
fn empty_line_yields_empty_body() {
    assert_eq!(message_body(""), "");
    assert_eq!(message_body("Alice\t"), "");
}

#[test]
fn client_key_is_addr_colon_port() {
    let peer: std::net::SocketAddr = "10.1.2.3:4455".parse().expect("addr");
    assert_eq!(client_key(&peer), "10.1.2.3:4455");
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn missing_file_starts_at_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("client_counter.txt");

    assert_eq!(next_client_number(&path).expect("first"), 1);
    assert_eq!(fs::read_to_string(&path).expect("read").trim(), "1");
}

#[test]
fn successive_calls_increment() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("client_counter.txt");

    assert_eq!(next_client_number(&path).expect("first"), 1);
    assert_eq!(next_client_number(&path).expect("second"), 2);
    assert_eq!(next_client_number(&path).expect("third"), 3);
}

#[test]
fn garbage_contents_reset_to_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("client_counter.txt");
    fs::write(&path, "not a number\n").expect("seed");

    assert_eq!(next_client_number(&path).expect("next"), 1);
}

#[test]
fn whitespace_around_number_is_tolerated() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("client_counter.txt");
    fs::write(&path, "  41  \n").expect("seed");

    assert_eq!(next_client_number(&path).expect("next"), 42);
}

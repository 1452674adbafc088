// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sequential client numbering persisted to a local file.
//!
//! Read once at startup: the stored number is incremented and written back,
//! so each launch on the same machine gets the next `ClientN` default name.
//! A missing or unparsable file restarts the sequence at 1.

use std::fs;
use std::io;
use std::path::Path;

pub fn next_client_number(path: &Path) -> io::Result<u32> {
    let number = match fs::read_to_string(path) {
        Ok(contents) => contents.trim().parse::<u32>().map(|n| n.saturating_add(1)).unwrap_or(1),
        Err(e) if e.kind() == io::ErrorKind::NotFound => 1,
        Err(e) => return Err(e),
    };
    fs::write(path, format!("{number}\n"))?;
    Ok(number)
}

#[cfg(test)]
#[path = "counter_tests.rs"]
mod tests;

//! JSON output formatting.

use serde::Serialize;
use std::io::{self, Write};

/// Print any serializable value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    let mut out = io::stdout().lock();
    writeln!(out, "{}", json)
}

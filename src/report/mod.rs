//! Human-readable diagnostic reports.
//!
//! Every report writes to any `io::Write` so the CLI can hand it stdout and
//! the tests a `Vec<u8>`.
pub mod chunks;
pub mod files;

use std::io::{self, Write};
use std::path::Path;

const RULE_WIDTH: usize = 60;

pub(crate) fn heading(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out)
}

/// Short name used to label a file in reports.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub(crate) fn yes_no(b: bool) -> &'static str {
    if b { "yes" } else { "no" }
}

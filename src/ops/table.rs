//! Rendering of the compatibility table.

use std::fmt::Write;

use crate::resolver::CompatibilityTable;

/// Render the table as aligned plain text.
pub fn format_table(table: &CompatibilityTable) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "compatibility table v{}", table.version());
    let _ = writeln!(out, "minSdk floor: {}", table.floor());
    let _ = writeln!(
        out,
        "compileSdk range: {}..={}",
        table.min_supported(),
        table.max_supported()
    );
    let _ = writeln!(
        out,
        "java runtimes: {}",
        table
            .runtimes()
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    out.push('\n');

    let _ = writeln!(out, "{:<6} {:<8} {}", "API", "VERSION", "CODENAME");
    for release in table.releases().iter().rev() {
        let _ = writeln!(
            out,
            "{:<6} {:<8} {}",
            release.api_level.to_string(),
            release.version,
            release.codename
        );
    }

    out
}

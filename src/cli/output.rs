//! Shared CLI output helpers for consistent terminal output.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, checkmarks
//! - Red: errors, deletions
//! - Cyan: names, hints
//! - Bold: headers, important values
//! - Dimmed: secondary info

use console::style;
use std::fmt::Display;

const RULE_WIDTH: usize = 56;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn paint<D: Display>(styled: console::StyledObject<D>) -> String {
    styled.force_styling(colors_enabled()).to_string()
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ synced alice/app`
pub fn success(msg: &str) {
    println!("{} {}", paint(style("✓").green()), msg);
}

/// Print an error message to stderr (red).
pub fn error(msg: &str) {
    eprintln!("{} {}", paint(style("✗").red()), msg);
}

/// Print a hint message to stderr (cyan).
///
/// Example: `→ check that the token has the repo scope`
pub fn hint(msg: &str) {
    eprintln!("{} {}", paint(style("→").cyan()), paint(style(msg).cyan()));
}

/// Print a bold section header.
pub fn header(title: &str) {
    println!("{}", paint(style(title).bold()));
}

/// Print a key-value pair (label dimmed, value bold).
pub fn kv(label: &str, value: impl Display) {
    println!(
        "  {}  {}",
        paint(style(label).dim()),
        paint(style(value.to_string()).bold())
    );
}

/// Print a list item with bullet.
///
/// Example: `  • DATABASE_URL`
pub fn list_item(item: &str) {
    println!("  • {}", item);
}

/// Print a list item with a change marker.
///
/// Example: `  - OLD_TOKEN`
pub fn change(marker: char, item: &str) {
    let marker = match marker {
        '+' => paint(style(marker).green()),
        '-' => paint(style(marker).red()),
        '!' => paint(style(marker).yellow()),
        _ => paint(style(marker).dim()),
    };
    println!("  {} {}", marker, item);
}

/// Print a horizontal rule separator.
pub fn rule() {
    println!("{}", paint(style("─".repeat(RULE_WIDTH)).dim()));
}

/// Format a secret or repository name in cyan.
pub fn name(n: &str) -> String {
    paint(style(n).cyan())
}

/// Print a dimmed/secondary message.
///
/// Example: `no secrets stored`
pub fn dimmed(msg: &str) {
    println!("{}", paint(style(msg).dim()));
}

/// Print a section header with a separator line.
pub fn section(title: &str) {
    println!();
    header(title);
    rule();
}

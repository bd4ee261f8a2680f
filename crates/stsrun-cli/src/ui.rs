//! Styled terminal lines. Every style is dropped when `NO_COLOR` is set.

use console::{style, Color};

#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var_os("NO_COLOR").is_some()
}

/// Render `text` in bold `color`, or as-is without color.
fn styled(text: &str, color: Color) -> String {
    if is_color_disabled() {
        text.to_string()
    } else {
        style(text).fg(color).bold().to_string()
    }
}

/// `=== n = 4 ===` section header.
pub fn print_header(text: &str) {
    println!("{}", styled(&format!("=== {text} ==="), Color::Cyan));
}

pub fn print_success(text: &str) {
    println!("{} {text}", styled("[OK]", Color::Green));
}

/// Line for a run that ended without an optimal solution.
pub fn print_warning(text: &str) {
    println!("{} {text}", styled("[WARN]", Color::Yellow));
}

/// Error line on stderr.
pub fn print_error(text: &str) {
    eprintln!("{} {text}", styled("[ERROR]", Color::Red));
}

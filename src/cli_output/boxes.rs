//! Simple line-based CLI output utilities.

/// Line width for separators.
const LINE_WIDTH: usize = 60;

/// Print the main header.
///
/// ```text
/// DASHBOARD
/// ════════════════════════════════════════════════════════════
/// ```
pub fn print_header(title: &str) {
    println!();
    println!("{}", title);
    println!("{}", "═".repeat(LINE_WIDTH));
    println!();
}

/// Print the start of a section.
///
/// ```text
/// RECENT ACTIVITY
/// ────────────────────────────────────────────────────────────
/// ```
pub fn print_section_start(title: &str) {
    println!("{}", title);
    println!("{}", "─".repeat(LINE_WIDTH));
}

/// Print a line within a section.
///
/// ```text
///   ✓ Signed in as sam
/// ```
pub fn print_section_line(icon: &str, message: &str) {
    println!("  {} {}", icon, message);
}

/// Print the end of a section (just a blank line).
pub fn print_section_end() {
    println!();
}

/// Print indented hint lines.
pub fn print_hints(lines: &[&str]) {
    println!();
    for line in lines {
        println!("    {}", line);
    }
}

/// Print a footer rule.
pub fn print_footer() {
    println!("{}", "═".repeat(LINE_WIDTH));
}

/// Status icons
pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const FAILURE: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const ITEM: &str = "•";
}

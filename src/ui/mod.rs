//! Operator-facing output
//!
//! Everything the operator reads goes through here so styling stays
//! consistent. Diagnostics for developers go through `tracing` instead.

pub mod display;

use console::Style;

/// Bold section heading
pub fn heading(text: &str) {
    println!("{}", Style::new().bold().apply_to(text));
}

/// Plain progress line
pub fn info(text: &str) {
    println!("{text}");
}

/// Non-fatal problem the operator should know about
pub fn warning(text: &str) {
    println!(
        "{} {}",
        Style::new().yellow().bold().apply_to("WARNING:"),
        Style::new().yellow().apply_to(text)
    );
}

/// Loud notice before destroying data
pub fn danger(text: &str) {
    println!("{}", Style::new().red().bold().apply_to(text));
}

/// Final success line
pub fn success(text: &str) {
    println!("{}", Style::new().green().bold().apply_to(text));
}

//! Console output for the demo commands.
//!
//! Errors go to stderr; everything else to stdout.

use std::fmt::Display;

use colored::Colorize;

pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

pub fn error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message);
}

pub fn warning(message: &str) {
    println!("{} {}", "warning:".yellow().bold(), message);
}

/// Secondary information, dimmed.
pub fn info(message: &str) {
    println!("{}", message.dimmed());
}

/// Section title.
pub fn title(text: &str) {
    println!("\n{}", text.bold().underline());
}

/// Indented `label: value` line.
pub fn field(label: &str, value: &str) {
    println!("  {:<14} {}", format!("{}:", label).cyan(), value);
}

pub fn rule() {
    println!("{}", "─".repeat(48).dimmed());
}

/// Pretty-print a serializable value as JSON.
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Text of an optional value, `-` when absent.
pub fn or_dash<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(Some(rust_decimal::Decimal::new(1050, 2))), "10.50");
        assert_eq!(or_dash(Some("paid")), "paid");
        assert_eq!(or_dash(None::<u32>), "-");
    }
}

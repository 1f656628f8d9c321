//! Shared formatting helpers for terminal output

use crate::models::Money;

/// Format a percentage with precision that suits its size
pub fn format_percentage(pct: f64) -> String {
    if pct > 0.0 && pct < 0.1 {
        format!("{:.2}%", pct)
    } else if pct.abs() < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Horizontal bar of `width` cells, filled in proportion to `fraction` (0..=1)
pub fn format_bar(fraction: f64, width: usize) -> String {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = ((fraction * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn money(amount: Money, currency: &str) -> String {
    amount.format_with_symbol(currency)
}

/// Section title underlined to its own width
pub fn heading(title: &str) -> String {
    format!("{}\n{}\n", title, "═".repeat(title.chars().count()))
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Shorten to `max_chars` characters, ending in "..." when cut
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars <= 3 {
        return ".".repeat(max_chars);
    }
    let kept: String = s.chars().take(max_chars - 3).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.24), "5.2%");
        assert_eq!(format_percentage(87.6), "88%");
        assert_eq!(format_percentage(0.0), "0.0%");
    }

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(0.5, 4), "██░░");
        assert_eq!(format_bar(1.7, 4), "████");
        assert_eq!(format_bar(f64::NAN, 2), "░░");
    }

    #[test]
    fn test_truncate_is_char_aware() {
        assert_eq!(truncate("Groceries", 20), "Groceries");
        assert_eq!(truncate("Gifts & Donations", 8), "Gifts...");
        assert_eq!(truncate("Café crème brûlée", 7), "Café...");
    }
}

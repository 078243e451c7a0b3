//! Display-width aware text helpers for fixed-column output.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate a string with ellipsis, using Unicode display width for accuracy.
#[must_use]
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    let (budget, suffix) = if max_width > 3 {
        (max_width - 3, "...")
    } else {
        (max_width, "")
    };

    let mut width = 0;
    let truncated: String = s
        .chars()
        .take_while(|ch| {
            let w = UnicodeWidthChar::width(*ch).unwrap_or(0);
            if width + w > budget {
                return false;
            }
            width += w;
            true
        })
        .collect();
    format!("{truncated}{suffix}")
}

/// Truncate to `width` and left-align, padding with spaces by display width.
#[must_use]
pub fn pad_right(s: &str, width: usize) -> String {
    let text = truncate_str(s, width);
    let fill = width.saturating_sub(UnicodeWidthStr::width(text.as_str()));
    format!("{text}{}", " ".repeat(fill))
}

/// Right-align `s` in `width` columns.
#[must_use]
pub fn pad_left(s: &str, width: usize) -> String {
    let text = truncate_str(s, width);
    let fill = width.saturating_sub(UnicodeWidthStr::width(text.as_str()));
    format!("{}{text}", " ".repeat(fill))
}

/// Horizontal bar of `width` cells filled in proportion to `fraction`.
#[must_use]
pub fn bar(fraction: f64, width: usize) -> String {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (fraction * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled.min(width)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_strings() {
        assert_eq!(truncate_str("Iron Tide", 20), "Iron Tide");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_str("Carnival of Echoes", 10), "Carniva...");
        assert_eq!(truncate_str("abcdef", 3), "abc");
    }

    #[test]
    fn test_wide_characters_count_double() {
        // Each CJK character occupies two columns
        assert_eq!(pad_right("東京", 6), "東京  ");
        assert_eq!(truncate_str("東京物語", 7), "東京...");
    }

    #[test]
    fn test_pad_left() {
        assert_eq!(pad_left("7.5", 6), "   7.5");
    }

    #[test]
    fn test_bar_proportions() {
        assert_eq!(bar(0.5, 4), "██░░");
        assert_eq!(bar(2.0, 3), "███");
        assert_eq!(bar(f64::NAN, 2), "░░");
    }
}

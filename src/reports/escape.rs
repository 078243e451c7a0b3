//! Escaping utilities for Markdown and CSV output.
//!
//! Catalog files are user supplied, so titles, genres and suggestions may
//! contain characters that break table layout. Escape them before embedding.

/// Characters that end or restructure a table cell.
const TABLE_SPECIALS: &[char] = &['|', '`', '[', ']'];

/// Characters with inline Markdown meaning.
const INLINE_SPECIALS: &[char] = &['*', '_', '`', '[', ']', '#', '|', '<', '>'];

/// Backslash-escape `specials`, flatten newlines and drop carriage returns.
fn escape_with(s: &str, specials: &[char]) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => result.push(' '),
            '\r' => {}
            c if specials.contains(&c) => {
                result.push('\\');
                result.push(c);
            }
            c => result.push(c),
        }
    }
    result
}

/// Escape a string for safe inclusion in a Markdown table cell.
///
/// # Examples
///
/// ```
/// use franchise_ranker::reports::escape::escape_markdown_table;
///
/// assert_eq!(escape_markdown_table("a | b"), "a \\| b");
/// assert_eq!(escape_markdown_table("line1\nline2"), "line1 line2");
/// assert_eq!(escape_markdown_table("`code`"), "\\`code\\`");
/// ```
#[must_use]
pub fn escape_markdown_table(s: &str) -> String {
    escape_with(s, TABLE_SPECIALS)
}

/// Escape a string for Markdown inline content such as headings and lists.
///
/// # Examples
///
/// ```
/// use franchise_ranker::reports::escape::escape_markdown_inline;
///
/// assert_eq!(escape_markdown_inline("**bold**"), "\\*\\*bold\\*\\*");
/// assert_eq!(escape_markdown_inline("#1 pick"), "\\#1 pick");
/// ```
#[must_use]
pub fn escape_markdown_inline(s: &str) -> String {
    escape_with(s, INLINE_SPECIALS)
}

/// Quote a CSV field: embedded quotes are doubled and newlines flattened.
///
/// # Examples
///
/// ```
/// use franchise_ranker::reports::escape::escape_csv;
///
/// assert_eq!(escape_csv("Say \"hi\""), "\"Say \"\"hi\"\"\"");
/// assert_eq!(escape_csv("a,b"), "\"a,b\"");
/// ```
#[must_use]
pub fn escape_csv(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\"").replace(['\n', '\r'], " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_table_plain_text_untouched() {
        assert_eq!(escape_markdown_table("Ember Crown"), "Ember Crown");
    }

    #[test]
    fn test_csv_flattens_newlines() {
        assert_eq!(escape_csv("a\r\nb"), "\"a  b\"");
    }
}

//! Terminal output sanitization
//!
//! Listing text (titles, addresses, amenity tags) comes from fetched page files and is not
//! trusted. Escape sequences in it could clear the screen, move the cursor or recolor the
//! terminal, so every listing field is passed through [`strip_ansi_codes`] or
//! [`sanitize_line`] before the CLI prints it.

/// Strips ANSI escape codes and control characters from a string
///
/// Removes CSI sequences (`ESC [ ... letter`) and every control character except tab,
/// newline and carriage return.
///
/// # Examples
///
/// ```
/// use pg_explorer::utils::terminal::strip_ansi_codes;
///
/// let text = "\x1b[31mSunrise PG\x1b[0m";
/// assert_eq!(strip_ansi_codes(text), "Sunrise PG");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next(); // consume '['
            // Skip until the final letter of the sequence
            while let Some(&next_ch) = chars.peek() {
                chars.next();
                if next_ch.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }

        if ch.is_control() && ch != '\t' && ch != '\n' && ch != '\r' {
            continue;
        }

        result.push(ch);
    }

    result
}

/// [`strip_ansi_codes`], then fold all whitespace runs into single spaces
///
/// For values printed inside one table row.
pub fn sanitize_line(text: &str) -> String {
    strip_ansi_codes(text).split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ansi_codes_color() {
        let text = "\x1b[31mGreen Nest\x1b[0m PG";
        assert_eq!(strip_ansi_codes(text), "Green Nest PG");
    }

    #[test]
    fn test_strip_ansi_codes_cursor_movement() {
        let text = "\x1b[2J\x1b[H HSR Layout";
        assert_eq!(strip_ansi_codes(text), " HSR Layout");
    }

    #[test]
    fn test_strip_ansi_codes_bell_and_backspace() {
        assert_eq!(strip_ansi_codes("Koramangala\x07\x08"), "Koramangala");
    }

    #[test]
    fn test_strip_ansi_codes_preserves_newlines() {
        let text = "Line 1\nLine 2\rLine 3\tTabbed";
        assert_eq!(strip_ansi_codes(text), "Line 1\nLine 2\rLine 3\tTabbed");
    }

    #[test]
    fn test_strip_ansi_codes_unicode() {
        let text = "Stay 🏠 \x1b[31mBengaluru\x1b[0m";
        assert_eq!(strip_ansi_codes(text), "Stay 🏠 Bengaluru");
    }

    #[test]
    fn test_strip_ansi_codes_only_escape_sequences() {
        assert_eq!(strip_ansi_codes("\x1b[31m\x1b[0m\x1b[2J"), "");
    }

    #[test]
    fn test_sanitize_line_folds_whitespace() {
        let text = "  Sunrise\n\tResidency \x1b[1mPG\x1b[0m  ";
        assert_eq!(sanitize_line(text), "Sunrise Residency PG");
    }
}

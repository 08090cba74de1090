// Entry-time normalization for personal info. Disallowed characters are
// dropped silently; nothing here reports an error.

const PHONE_SYMBOLS: &[char] = &['+', '-', '(', ')'];
const LOCATION_SYMBOLS: &[char] = &[',', '.', '-'];

/// ASCII letters and whitespace only.
pub fn full_name(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect()
}

/// Digits, whitespace and `+-()`.
pub fn phone(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_digit() || c.is_whitespace() || PHONE_SYMBOLS.contains(c))
        .collect()
}

/// ASCII letters, whitespace and `,.-`.
pub fn location(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace() || LOCATION_SYMBOLS.contains(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_strips_digits_and_punctuation() {
        assert_eq!(full_name("Jane D0e!"), "Jane De");
        assert_eq!(full_name("José Álvarez"), "Jos lvarez");
    }

    #[test]
    fn test_phone_keeps_dial_symbols() {
        assert_eq!(phone("+1 (555) 123-4567 ext"), "+1 (555) 123-4567 ");
        assert_eq!(phone("call me"), " ");
    }

    #[test]
    fn test_location_keeps_separators() {
        assert_eq!(location("New York, NY 10001"), "New York, NY ");
        assert_eq!(location("St. Paul-Minneapolis"), "St. Paul-Minneapolis");
        assert_eq!(location("Zürich, CH"), "Zrich, CH");
    }
}

use lazy_regex::regex_find;

/// The value of the first run of ASCII digits in `text`, e.g. `3` for `Table 3`.
pub fn embedded_number(text: &str) -> Option<u32> {
    regex_find!(r"[0-9]+", text)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::embedded_number;

    #[test]
    fn bare_number() {
        assert_eq!(embedded_number("3"), Some(3));
    }

    #[test]
    fn surrounded_by_text() {
        assert_eq!(embedded_number("Table 3"), Some(3));
        assert_eq!(embedded_number("Round 12 (rematch)"), Some(12));
    }

    #[test]
    fn only_first_run_counts() {
        assert_eq!(embedded_number("Round 2 of 5"), Some(2));
    }

    #[test]
    fn leading_zeros() {
        assert_eq!(embedded_number("Table 03"), Some(3));
    }

    #[test]
    fn no_digits() {
        assert_eq!(embedded_number("semifinal"), None);
        assert_eq!(embedded_number(""), None);
    }

    #[test]
    fn overflow() {
        assert_eq!(embedded_number("99999999999999999999"), None);
    }
}

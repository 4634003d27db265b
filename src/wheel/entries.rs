//! Entry list parsing and pin lookup

/// Split raw entry text into wheel entries.
///
/// Text containing any newline is split on newlines, otherwise on commas.
/// Pieces are trimmed and blanks dropped. A comma inside an entry of a
/// single-line list is treated as a separator.
pub fn parse_entries(text: &str) -> Vec<String> {
    let delimiter = if text.contains('\n') { '\n' } else { ',' };
    text.split(delimiter)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(String::from)
        .collect()
}

/// First entry containing `query` (case-insensitive), in list order
pub fn find_pin_match<'a>(entries: &'a [String], query: &str) -> Option<&'a str> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    entries
        .iter()
        .find(|entry| entry.to_lowercase().contains(&needle))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_newline_and_comma_lists_agree() {
        let expected = list(&["Alice", "Bob", "Carol"]);
        assert_eq!(parse_entries("Alice\nBob\nCarol"), expected);
        assert_eq!(parse_entries("Alice, Bob, Carol"), expected);
    }

    #[test]
    fn test_blank_lines_and_padding_dropped() {
        assert_eq!(parse_entries("  Alice \n\n Bob  "), list(&["Alice", "Bob"]));
    }

    #[test]
    fn test_newline_wins_over_comma() {
        // Commas survive once the text is multi-line
        assert_eq!(
            parse_entries("Smith, Jane\nDoe, John"),
            list(&["Smith, Jane", "Doe, John"])
        );
    }

    #[test]
    fn test_crlf_lines_trimmed() {
        assert_eq!(parse_entries("Alice\r\nBob\r\n"), list(&["Alice", "Bob"]));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_entries("").is_empty());
        assert!(parse_entries(" , ,, ").is_empty());
        assert!(parse_entries("\n \n").is_empty());
    }

    #[test]
    fn test_duplicates_kept_in_order() {
        assert_eq!(parse_entries("a,b,a"), list(&["a", "b", "a"]));
    }

    #[test]
    fn test_pin_match_substring_case_insensitive() {
        let entries = list(&["Alice", "Bobby", "Roberta"]);
        assert_eq!(find_pin_match(&entries, "BOB"), Some("Bobby"));
        assert_eq!(find_pin_match(&entries, "ert"), Some("Roberta"));
        assert_eq!(find_pin_match(&entries, "  lic "), Some("Alice"));
    }

    #[test]
    fn test_pin_match_first_wins() {
        let entries = list(&["Anna", "Hannah"]);
        assert_eq!(find_pin_match(&entries, "an"), Some("Anna"));
    }

    #[test]
    fn test_pin_match_misses() {
        let entries = list(&["Alice"]);
        assert_eq!(find_pin_match(&entries, "zed"), None);
        assert_eq!(find_pin_match(&entries, "   "), None);
        assert_eq!(find_pin_match(&[], "a"), None);
    }
}

//! Color-token discovery over file text.
//!
//! Two regex passes: a substring pass for `#` hex codes (3 or 6 digits) and
//! a whole-word pass for CSS3 color names, both case-insensitive. The word
//! boundary on the name pass keeps "red" from matching inside "credit".

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use super::palette::NAMED_COLORS;

/// `#` + exactly 3 or exactly 6 hex digits. Greedy, so a 6-digit code is
/// consumed whole rather than as a 3-digit prefix. Case-insensitivity is
/// applied by the callers so the fragment can be embedded in larger patterns.
pub const HEX_TOKEN: &str = "#(?:[0-9a-f]{3}){1,2}";

fn hex_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(&format!("(?i){HEX_TOKEN}")).expect("Invalid hex color regex pattern")
    })
}

fn name_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        let names: Vec<&str> = NAMED_COLORS.iter().map(|&(n, _)| n).collect();
        let pattern = format!(r"(?i)\b(?:{})\b", names.join("|"));
        Regex::new(&pattern).expect("Invalid color name regex pattern")
    })
}

/// Returns the distinct color tokens in `text`, sorted case-insensitively.
///
/// Dedup is case-sensitive: if both `Red` and `red` occur literally, both
/// survive as separate tokens. Ties between such case variants break by
/// case-sensitive order so the result is deterministic.
pub fn discover(text: &str) -> Vec<String> {
    let mut found: HashSet<String> = HashSet::new();

    for m in hex_regex().find_iter(text) {
        found.insert(m.as_str().to_string());
    }
    for m in name_regex().find_iter(text) {
        found.insert(m.as_str().to_string());
    }

    let mut tokens: Vec<String> = found.into_iter().collect();
    tokens.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_mixed_tokens_sorted() {
        let text = "color: #fff; border: red; background: #FF00FF;";
        assert_eq!(discover(text), vec!["#FF00FF", "#fff", "red"]);
    }

    #[test]
    fn test_discover_is_idempotent() {
        let text = "a #abc b salmon c #AbC d SALMON";
        assert_eq!(discover(text), discover(text));
    }

    #[test]
    fn test_names_require_word_boundaries() {
        assert!(discover("credit card").is_empty());
        assert!(discover("bored now").is_empty());
        assert_eq!(discover("a red card"), vec!["red"]);
        assert_eq!(discover("border:red;"), vec!["red"]);
    }

    #[test]
    fn test_hex_needs_no_word_boundary() {
        assert_eq!(discover("bg:#1a2b3c;"), vec!["#1a2b3c"]);
        assert_eq!(discover("x#fffy"), vec!["#fff"]);
    }

    #[test]
    fn test_six_digit_code_not_split() {
        // Greedy match: the 6-digit form wins over a 3-digit prefix.
        assert_eq!(discover("#FFFABC"), vec!["#FFFABC"]);
    }

    #[test]
    fn test_case_variants_both_survive() {
        let text = "Red red #ABC #abc";
        assert_eq!(discover(text), vec!["#ABC", "#abc", "Red", "red"]);
    }

    #[test]
    fn test_invalid_hex_lengths_partially_match() {
        // Four digits: the first three match, same as the original scanner.
        assert_eq!(discover("#ffff"), vec!["#fff"]);
        // Two digits: no match at all.
        assert!(discover("#ff").is_empty());
    }

    #[test]
    fn test_no_tokens_yields_empty() {
        assert!(discover("").is_empty());
        assert!(discover("nothing to see here").is_empty());
    }
}

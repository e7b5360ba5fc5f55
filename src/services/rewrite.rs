//! Substitution of chosen replacement colors into file text.
//!
//! The rewrite runs as a single left-to-right pass of one combined pattern:
//! the hex-token pattern from discovery plus a whole-word alternation of the
//! mapped name tokens. Each match is replaced only when its lowercased
//! spelling is a key of the map. This gives exact token boundaries for hex
//! codes (a mapped `#fff` never corrupts a longer `#fffabc`), makes the
//! result independent of key order, and keeps replacement values from being
//! rescanned.
//!
//! Matching is case-insensitive, so case-variant spellings of one token
//! (`Red` / `red`) share a single replacement behavior. When a map carries
//! both variants as separate keys, the keys are folded in sorted order and
//! the later one wins.

use std::collections::HashMap;

use regex::{Captures, Regex};

use super::scan::HEX_TOKEN;

/// True for tokens matched by the name pass rather than the hex pass.
pub fn is_name_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_alphabetic())
}

/// Applies every replacement in `replacements` to `text`.
///
/// Name tokens replace as whole words, hex tokens as exact hex tokens; both
/// are case-insensitive. An empty map returns the text unchanged.
pub fn apply(text: &str, replacements: &HashMap<String, String>) -> String {
    if replacements.is_empty() {
        return text.to_string();
    }

    // Fold keys in sorted order so case-variant collisions resolve
    // deterministically.
    let mut keys: Vec<&String> = replacements.keys().collect();
    keys.sort();

    let mut lookup: HashMap<String, &str> = HashMap::new();
    let mut name_alts: Vec<String> = Vec::new();
    for key in keys {
        let lower = key.to_lowercase();
        if is_name_token(key) && !lookup.contains_key(&lower) {
            name_alts.push(regex::escape(&lower));
        }
        lookup.insert(lower, replacements[key].as_str());
    }

    // The hex branch is always present: it consumes full hex tokens even
    // when only their prefix is mapped, which is what enforces the exact
    // token boundary.
    let pattern = if name_alts.is_empty() {
        format!("(?i){HEX_TOKEN}")
    } else {
        format!(r"(?i)(?:{HEX_TOKEN}|\b(?:{})\b)", name_alts.join("|"))
    };
    let re = Regex::new(&pattern).expect("Invalid rewrite pattern from escaped tokens");

    re.replace_all(text, |caps: &Captures| {
        let matched = &caps[0];
        match lookup.get(&matched.to_lowercase()) {
            Some(replacement) => (*replacement).to_string(),
            None => matched.to_string(),
        }
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_map_returns_input_unchanged() {
        let text = "color: #fff; border: red;";
        assert_eq!(apply(text, &HashMap::new()), text);
    }

    #[test]
    fn test_name_replaces_whole_words_case_insensitively() {
        let out = apply(
            "Red box, red line, credited",
            &map(&[("red", "#123456")]),
        );
        assert_eq!(out, "#123456 box, #123456 line, credited");
    }

    #[test]
    fn test_hex_replacement_respects_token_boundaries() {
        let out = apply("bg:#fff; x:#FFFABC", &map(&[("#fff", "#000000")]));
        assert_eq!(out, "bg:#000000; x:#FFFABC");
    }

    #[test]
    fn test_hex_replacement_case_insensitive() {
        let out = apply("a #ABC b #abc", &map(&[("#abc", "#101010")]));
        assert_eq!(out, "a #101010 b #101010");
    }

    #[test]
    fn test_mixed_hex_and_name_keys() {
        let out = apply(
            "color: #fff; border: red; background: #FF00FF;",
            &map(&[("#fff", "#111111"), ("red", "#222222")]),
        );
        assert_eq!(out, "color: #111111; border: #222222; background: #FF00FF;");
    }

    #[test]
    fn test_output_independent_of_key_order() {
        let text = "tomato #abc salmon #def";
        let entries = [
            ("tomato", "#010101"),
            ("salmon", "#020202"),
            ("#abc", "#030303"),
            ("#def", "#040404"),
        ];
        let forward = map(&entries);
        let mut reversed_entries = entries;
        reversed_entries.reverse();
        let reversed = map(&reversed_entries);
        assert_eq!(apply(text, &forward), apply(text, &reversed));
    }

    #[test]
    fn test_replacement_values_are_not_rescanned() {
        // "red" maps to a value that is itself a mapped token; the inserted
        // text must survive as-is.
        let out = apply(
            "red and #00f",
            &map(&[("red", "#00f"), ("#00f", "#ffffff")]),
        );
        assert_eq!(out, "#00f and #ffffff");
    }

    #[test]
    fn test_case_variant_keys_fold_to_one_behavior() {
        // Both spellings map; sorted fold means the "red" entry wins.
        let out = apply(
            "Red red RED",
            &map(&[("Red", "#111111"), ("red", "#222222")]),
        );
        assert_eq!(out, "#222222 #222222 #222222");
    }

    #[test]
    fn test_is_name_token() {
        assert!(is_name_token("red"));
        assert!(is_name_token("AliceBlue"));
        assert!(!is_name_token("#fff"));
        assert!(!is_name_token(""));
        assert!(!is_name_token("not-a-color"));
    }
}

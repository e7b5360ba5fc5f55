//! Edit session: the state the UI drives through explicit commands.
//!
//! A session is built once per file load. Discovery runs at construction and
//! the result is immutable; replacements accumulate only through
//! [`EditSession::select_replacement`]. Substitution matches
//! case-insensitively, so replacements are keyed by the lowercased token
//! spelling: picking a color for `Red` and later for `red` leaves a single
//! entry, and the most recent pick wins.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::{file_ops, palette, rewrite, scan};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Token was not discovered in this file: {0}")]
    UnknownToken(String),

    #[error("Not a valid hex color value: {0}")]
    InvalidHex(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub struct EditSession {
    source_path: PathBuf,
    source_text: String,
    found_colors: Vec<String>,
    replacements: HashMap<String, String>,
}

impl EditSession {
    /// Builds a session for `text` loaded from `path`, running discovery.
    pub fn new(path: PathBuf, text: String) -> Self {
        let found_colors = scan::discover(&text);
        Self {
            source_path: path,
            source_text: text,
            found_colors,
            replacements: HashMap::new(),
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Discovered tokens, sorted case-insensitively. Empty when the file
    /// contains no recognized colors.
    pub fn found_colors(&self) -> &[String] {
        &self.found_colors
    }

    /// Pending replacement for `token`, if one was selected for it or for a
    /// case-variant spelling of it.
    pub fn replacement_for(&self, token: &str) -> Option<&str> {
        self.replacements.get(&token.to_lowercase()).map(|s| s.as_str())
    }

    pub fn pending_count(&self) -> usize {
        self.replacements.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.replacements.is_empty()
    }

    /// Records `hex` as the replacement for `token`.
    ///
    /// The token must come from this session's discovery result and the hex
    /// value must be a `#rgb` or `#rrggbb` string.
    pub fn select_replacement(&mut self, token: &str, hex: &str) -> Result<(), SessionError> {
        if !self.found_colors.iter().any(|t| t == token) {
            return Err(SessionError::UnknownToken(token.to_string()));
        }
        if !palette::is_valid_hex(hex) {
            return Err(SessionError::InvalidHex(hex.to_string()));
        }
        self.replacements.insert(token.to_lowercase(), hex.to_string());
        Ok(())
    }

    /// Drops the pending replacement for `token` (or a case-variant of it).
    /// Returns whether an entry was removed.
    pub fn clear_replacement(&mut self, token: &str) -> bool {
        self.replacements.remove(&token.to_lowercase()).is_some()
    }

    /// The substituted text. Pure; the source text is never mutated.
    pub fn apply(&self) -> String {
        rewrite::apply(&self.source_text, &self.replacements)
    }

    /// Where [`EditSession::save`] would write for the given suffix.
    pub fn output_path(&self, suffix: &str) -> PathBuf {
        file_ops::output_path(&self.source_path, suffix)
    }

    /// Applies the replacements and writes the output file.
    ///
    /// With no pending replacements this writes nothing and returns
    /// `Ok(None)`; ending the session without saving is not an error.
    pub fn save(&self, suffix: &str) -> Result<Option<PathBuf>, SessionError> {
        if self.replacements.is_empty() {
            return Ok(None);
        }
        let path = self.output_path(suffix);
        file_ops::write_output(&path, &self.apply())?;
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn session(text: &str) -> EditSession {
        EditSession::new(PathBuf::from("/tmp/input.css"), text.to_string())
    }

    #[test]
    fn test_new_runs_discovery_once() {
        let s = session("color: #fff; border: red; background: #FF00FF;");
        assert_eq!(s.found_colors(), ["#FF00FF", "#fff", "red"]);
        assert!(!s.has_pending());
    }

    #[test]
    fn test_select_rejects_unknown_token() {
        let mut s = session("color: red;");
        let err = s.select_replacement("blue", "#123456");
        assert!(matches!(err, Err(SessionError::UnknownToken(_))));
        assert_eq!(s.pending_count(), 0);
    }

    #[test]
    fn test_select_rejects_invalid_hex() {
        let mut s = session("color: red;");
        assert!(matches!(
            s.select_replacement("red", "123456"),
            Err(SessionError::InvalidHex(_))
        ));
        assert!(matches!(
            s.select_replacement("red", "#12345"),
            Err(SessionError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_case_variants_share_one_replacement() {
        let mut s = session("Red red");
        s.select_replacement("Red", "#111111").expect("select failed");
        s.select_replacement("red", "#222222").expect("select failed");
        assert_eq!(s.pending_count(), 1);
        assert_eq!(s.replacement_for("Red"), Some("#222222"));
        assert_eq!(s.replacement_for("red"), Some("#222222"));
        assert_eq!(s.apply(), "#222222 #222222");
    }

    #[test]
    fn test_clear_replacement() {
        let mut s = session("color: red;");
        s.select_replacement("red", "#123456").expect("select failed");
        assert!(s.clear_replacement("RED"));
        assert!(!s.clear_replacement("red"));
        assert_eq!(s.apply(), "color: red;");
    }

    #[test]
    fn test_save_with_no_replacements_writes_nothing() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("input.css");
        fs::write(&path, "color: red;").expect("write failed");

        let s = EditSession::new(path, "color: red;".to_string());
        assert_eq!(s.save("-modified").expect("save failed"), None);
        assert!(!dir.path().join("input-modified.css").exists());
    }

    #[test]
    fn test_save_end_to_end() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("input.css");
        let text = "a { color: #fff; }\nb { background: #fff; }\n";
        fs::write(&path, text).expect("write failed");

        let mut s = EditSession::new(path, text.to_string());
        s.select_replacement("#fff", "#112233").expect("select failed");

        let saved = s.save("-modified").expect("save failed");
        let expected = dir.path().join("input-modified.css");
        assert_eq!(saved, Some(expected.clone()));
        assert_eq!(
            fs::read_to_string(expected).expect("read failed"),
            "a { color: #112233; }\nb { background: #112233; }\n"
        );
    }
}

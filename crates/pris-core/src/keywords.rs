//! Injectable risk-keyword configuration for the rumor tagger.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Display sentinel for a signal with no keyword matches.
pub const NO_MATCH_SENTINEL: &str = "none";

/// Built-in rumor keywords, in tag-output order.
const DEFAULT_KEYWORDS: &[&str] = &[
    "infertility",
    "haram",
    "paralysis",
    "dangerous",
    "fake",
    "side effect",
];

#[derive(Debug, Error)]
pub enum KeywordSetError {
    #[error("failed to read keyword file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse keyword file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("keyword file {0} contains no keywords")]
    Empty(String),
}

#[derive(Debug, Deserialize)]
struct KeywordFile {
    keywords: Vec<String>,
}

/// Ordered list of risk keywords matched by the rumor tagger.
///
/// Matching is pure substring containment over normalized text — no
/// stemming, no word boundaries. Order is preserved end to end: tag output
/// follows keyword-list order, not text order.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl KeywordSet {
    /// Build a keyword set from explicit entries, lowercasing each and
    /// dropping empties.
    #[must_use]
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    /// Load a keyword set from a YAML file of the form
    /// `keywords: ["infertility", ...]`.
    ///
    /// # Errors
    ///
    /// Returns [`KeywordSetError`] if the file is unreadable, malformed, or
    /// contains no usable keywords.
    pub fn from_yaml_file(path: &Path) -> Result<Self, KeywordSetError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| KeywordSetError::Io {
            path: display.clone(),
            source,
        })?;
        let file: KeywordFile =
            serde_yaml::from_str(&raw).map_err(|source| KeywordSetError::Parse {
                path: display.clone(),
                source,
            })?;

        let set = Self::new(file.keywords);
        if set.keywords.is_empty() {
            return Err(KeywordSetError::Empty(display));
        }
        Ok(set)
    }

    /// Keywords in output order.
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Return the subset of keywords contained in `text`, in keyword-list
    /// order. `text` is expected to be already normalized (lowercase).
    #[must_use]
    pub fn tag(&self, text: &str) -> Vec<String> {
        self.keywords
            .iter()
            .filter(|keyword| text.contains(keyword.as_str()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_has_six_keywords_in_order() {
        let set = KeywordSet::default();
        assert_eq!(
            set.keywords(),
            &[
                "infertility",
                "haram",
                "paralysis",
                "dangerous",
                "fake",
                "side effect"
            ]
        );
    }

    #[test]
    fn tag_returns_matches_in_keyword_order() {
        let set = KeywordSet::default();
        // Text order is reversed relative to keyword order.
        let tags = set.tag("fake news about paralysis risks");
        assert_eq!(tags, vec!["paralysis".to_string(), "fake".to_string()]);
    }

    #[test]
    fn tag_matches_substrings_without_word_boundaries() {
        let set = KeywordSet::new(["ham"]);
        // Substring containment by contract, even mid-word.
        assert_eq!(set.tag("the hamlet town hall"), vec!["ham".to_string()]);
    }

    #[test]
    fn tag_returns_empty_for_clean_text() {
        let set = KeywordSet::default();
        assert!(set.tag("local council opens new clinic").is_empty());
    }

    #[test]
    fn new_lowercases_and_drops_blank_entries() {
        let set = KeywordSet::new(["  Infertility ", "", "HARAM"]);
        assert_eq!(set.keywords(), &["infertility", "haram"]);
    }

    fn write_temp_yaml(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("pris-keywords-{name}-{}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn from_yaml_file_loads_keywords_in_file_order() {
        let path = write_temp_yaml("ok", "keywords:\n  - Paralysis\n  - side effect\n  - haram\n");
        let set = KeywordSet::from_yaml_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(set.keywords(), &["paralysis", "side effect", "haram"]);
    }

    #[test]
    fn from_yaml_file_rejects_missing_file() {
        let path = std::env::temp_dir().join("pris-keywords-does-not-exist.yaml");
        let err = KeywordSet::from_yaml_file(&path).unwrap_err();
        assert!(matches!(err, KeywordSetError::Io { .. }));
    }

    #[test]
    fn from_yaml_file_rejects_malformed_yaml() {
        let path = write_temp_yaml("bad", "keywords: not-a-list\n");
        let err = KeywordSet::from_yaml_file(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(err, KeywordSetError::Parse { .. }));
    }

    #[test]
    fn from_yaml_file_rejects_empty_keyword_list() {
        let path = write_temp_yaml("empty", "keywords: []\n");
        let err = KeywordSet::from_yaml_file(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(err, KeywordSetError::Empty(_)));
    }
}

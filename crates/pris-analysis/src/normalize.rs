//! Free-text normalization ahead of keyword tagging.

use regex::Regex;

/// Normalize raw text: strip URL tokens, then every character that is not
/// an ASCII letter or whitespace, lowercase, and trim.
///
/// Empty input returns an empty string. Non-Latin scripts are stripped
/// entirely — a known information-loss edge case: such text becomes empty
/// and therefore tag-less.
#[must_use]
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    // Any whitespace-free token starting with "http" counts as a URL.
    let url_re = Regex::new(r"http\S+").expect("valid url regex");
    let without_urls = url_re.replace_all(text, "");

    let non_alpha_re = Regex::new(r"[^a-zA-Z\s]").expect("valid non-alpha regex");
    let alpha_only = non_alpha_re.replace_all(&without_urls, "");

    alpha_only.to_lowercase().trim().to_string()
}

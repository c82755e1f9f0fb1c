use regex::Regex;
use std::sync::LazyLock;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\p{L}\p{N}]+").unwrap());

/// Splits text into words. A word is a run of letters or digits; anything else
/// (spaces, dots, dashes, plus signs...) is a separator.
pub fn tokenize(text: &str) -> Vec<&str> {
    WORD.find_iter(text).map(|m| m.as_str()).collect()
}

/// Reduces a version label such as "Version BATV, 0.00 MBs" to "BATV".
pub fn clean_title(title: &str) -> String {
    let head = title.split(',').next().unwrap_or(title);
    let fields: Vec<&str> = head.split_whitespace().collect();
    match fields.as_slice() {
        [] => title.trim().to_string(),
        [only] => only.to_string(),
        [_, second, ..] => second.to_string(),
    }
}

//! Frequency-based keyword extraction from job descriptions.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static RE_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[a-zA-Z]{3,}\b").unwrap());

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should", "may", "might", "must", "can", "this", "that", "these", "those",
];

const MAX_KEYWORDS: usize = 20;

/// Words of three or more letters that repeat in the description, most
/// frequent first. Ties keep first-appearance order.
pub fn extract_keywords(job_description: &str) -> Vec<String> {
    let lowered = job_description.to_lowercase();

    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, m) in RE_WORD.find_iter(&lowered).enumerate() {
        let word = m.as_str();
        if STOP_WORDS.contains(&word) {
            continue;
        }
        counts.entry(word).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .filter(|(_, count, _)| *count > 1)
        .map(|(word, _, _)| word.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_words_ranked_by_frequency() {
        let jd = "Rust engineer. Rust services, Kubernetes services, Rust tooling and Kubernetes.";
        assert_eq!(extract_keywords(jd), vec!["rust", "services", "kubernetes"]);
    }

    #[test]
    fn test_stop_words_and_short_words_ignored() {
        let jd = "The the the and and go go go";
        assert!(extract_keywords(jd).is_empty());
    }

    #[test]
    fn test_single_occurrences_dropped() {
        assert!(extract_keywords("Python developer wanted").is_empty());
    }
}

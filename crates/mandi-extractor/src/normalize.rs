//! Candidate name clean-up

use std::collections::HashSet;

/// Capitalize the first letter of every word and collapse whitespace
///
/// The rest of each word is kept as written, so "MilkCo" stays "MilkCo"
/// while "green valley farms" becomes "Green Valley Farms".
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Rejects candidates that are too short or are bare filler words
#[derive(Debug, Clone)]
pub(crate) struct CandidateFilter {
    min_length: usize,
    stop_words: HashSet<String>,
}

impl CandidateFilter {
    pub fn new(min_length: usize, stop_words: &[String]) -> Self {
        Self {
            min_length,
            stop_words: stop_words.iter().map(|w| w.trim().to_lowercase()).collect(),
        }
    }

    /// Why a candidate is rejected, or `None` if it is acceptable
    pub fn rejection(&self, candidate: &str) -> Option<&'static str> {
        if candidate.chars().count() < self.min_length {
            return Some("too short");
        }
        if self.stop_words.contains(&candidate.to_lowercase()) {
            return Some("stop word");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("green valley farms"), "Green Valley Farms");
        assert_eq!(title_case("  azadpur   market "), "Azadpur Market");
        assert_eq!(title_case("MilkCo"), "MilkCo");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_filter_rejects_short_and_stop_words() {
        let filter = CandidateFilter::new(3, &["the".to_string(), "Fresh".to_string()]);

        assert_eq!(filter.rejection("AB"), Some("too short"));
        assert_eq!(filter.rejection("The"), Some("stop word"));
        assert_eq!(filter.rejection("fresh"), Some("stop word"));
        assert_eq!(filter.rejection("ABC"), None);
        assert_eq!(filter.rejection("Spice World"), None);
    }
}

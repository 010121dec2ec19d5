//! Author name keys and the author index.
//!
//! Users rarely type an author exactly as written in the corpus, so each quote is
//! indexed under several keys: the full lowercased name, the name with punctuation
//! stripped, and every word of the stripped name. Words are split on spaces and on
//! lower→upper case transitions, so fused names like `JohnSmith` still match
//! `john` and `smith`.

use std::collections::HashMap;
use std::sync::Arc;

use super::quote::Quote;

/// Remove everything that is not an ASCII letter or a space, then trim.
///
/// `"O'Brien."` becomes `"OBrien"`.
pub fn strip_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == ' ')
        .collect();
    kept.trim().to_string()
}

/// Compute the ordered, duplicate-free set of lookup keys for an author.
///
/// An empty author yields the single key `""`, which is how authorless quotes
/// end up in the index.
pub fn derive_keys(author: &str) -> Vec<String> {
    let full = author.to_lowercase();
    let stripped = strip_name(author);
    let stripped_lower = stripped.to_lowercase();

    let mut keys = vec![full];
    push_unique(&mut keys, &stripped_lower);

    let chars: Vec<char> = stripped.chars().collect();
    let mut last_split = 0;
    for i in 1..=chars.len() {
        let at_end = i == chars.len();
        let is_split = at_end || chars[i] == ' ' || {
            let current = chars[i];
            let next_is_letter = chars.get(i + 1).is_some_and(|c| c.is_ascii_alphabetic());
            current.is_ascii_uppercase() && chars[i - 1].is_ascii_lowercase() && next_is_letter
        };

        if is_split {
            let word: String = chars[last_split..i].iter().collect();
            let word = word.trim().to_lowercase();
            // The whole stripped name is already a key
            if !word.is_empty() && word != stripped_lower {
                push_unique(&mut keys, &word);
            }
            last_split = i;
        }
    }

    keys
}

fn push_unique(keys: &mut Vec<String>, key: &str) {
    if !keys.iter().any(|k| k == key) {
        keys.push(key.to_string());
    }
}

/// Lookup key → quotes indexed under it, each bucket in load order.
#[derive(Debug, Default)]
pub struct AuthorIndex {
    buckets: HashMap<String, Vec<Arc<Quote>>>,
}

impl AuthorIndex {
    /// Build the index for a freshly loaded corpus.
    pub fn build(quotes: &[Arc<Quote>]) -> Self {
        let mut index = Self::default();
        for quote in quotes {
            index.insert(quote);
        }
        index
    }

    fn insert(&mut self, quote: &Arc<Quote>) {
        for key in quote.derived_author_keys() {
            self.buckets.entry(key).or_default().push(Arc::clone(quote));
        }
    }

    /// Exact key lookup.
    pub fn get(&self, key: &str) -> Option<&[Arc<Quote>]> {
        self.buckets
            .get(key)
            .map(Vec::as_slice)
            .filter(|bucket| !bucket.is_empty())
    }

    /// Union of every bucket whose key satisfies `pred`, deduplicated and in load order.
    pub fn collect_where(&self, pred: impl Fn(&str) -> bool) -> Vec<Arc<Quote>> {
        let mut matched: Vec<Arc<Quote>> = self
            .buckets
            .iter()
            .filter(|(key, _)| pred(key))
            .flat_map(|(_, bucket)| bucket.iter().cloned())
            .collect();
        matched.sort_by_key(|q| q.index());
        matched.dedup_by_key(|q| q.index());
        matched
    }

    /// Number of distinct lookup keys.
    pub fn key_count(&self) -> usize {
        self.buckets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quotes(lines: &[&str]) -> Vec<Arc<Quote>> {
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| Arc::new(Quote::parse(line, i + 1)))
            .collect()
    }

    #[test]
    fn strip_name_removes_punctuation() {
        assert_eq!(strip_name("O'Brien."), "OBrien");
        assert_eq!(strip_name("  Dr. J. Smith, Jr.  "), "Dr J Smith Jr");
        assert_eq!(strip_name("R2-D2"), "RD");
        assert_eq!(strip_name("..."), "");
    }

    #[test]
    fn keys_for_spaced_name() {
        assert_eq!(derive_keys("John Smith"), vec!["john smith", "john", "smith"]);
    }

    #[test]
    fn keys_for_fused_name() {
        assert_eq!(derive_keys("JohnSmith"), vec!["johnsmith", "john", "smith"]);
    }

    #[test]
    fn keys_include_stripped_form_when_different() {
        assert_eq!(derive_keys("O'Brien"), vec!["o'brien", "obrien"]);
        assert_eq!(
            derive_keys("Mr. T-Bone"),
            vec!["mr. t-bone", "mr tbone", "mr", "tbone"]
        );
    }

    #[test]
    fn single_word_author_has_one_key() {
        assert_eq!(derive_keys("Alice"), vec!["alice"]);
    }

    #[test]
    fn case_split_needs_following_letter() {
        // "McD" ends on the capital, so no split before the final D
        assert_eq!(derive_keys("McD"), vec!["mcd"]);
        // all-caps runs are not split
        assert_eq!(derive_keys("NASA"), vec!["nasa"]);
        assert_eq!(derive_keys("McDonald"), vec!["mcdonald", "mc", "donald"]);
    }

    #[test]
    fn repeated_words_are_not_duplicated() {
        assert_eq!(derive_keys("John  John"), vec!["john  john", "john"]);
    }

    #[test]
    fn empty_author_indexes_under_empty_key() {
        assert_eq!(derive_keys(""), vec![""]);
    }

    #[test]
    fn index_buckets_keep_load_order() {
        let corpus = quotes(&["Bob Jones: one", "Alice: two", "Bob: three"]);
        let index = AuthorIndex::build(&corpus);

        let bob: Vec<usize> = index.get("bob").unwrap().iter().map(|q| q.index()).collect();
        assert_eq!(bob, vec![1, 3]);
        assert!(index.get("carol").is_none());
        assert_eq!(index.get("bob jones").unwrap().len(), 1);
    }

    #[test]
    fn collect_where_dedups_across_buckets() {
        let corpus = quotes(&["Bob Bobson: one", "Alice: two"]);
        let index = AuthorIndex::build(&corpus);

        // "bob bobson", "bob" and "bobson" all start with "bob"
        let matched = index.collect_where(|key| key.starts_with("bob"));
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].index(), 1);
    }
}

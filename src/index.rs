/*!
Searches over an inverted index built elsewhere.

The index maps every word to its postings, the number of times the word
occurs in each document. Regex searches test every distinct word of the index
against the pattern as a whole word, then rank documents by the summed counts
of the words that matched.
*/

use std::collections::{HashMap, HashSet};

use regex_automaton::{CompileError, Matcher, DFA};

use crate::searcher::{Config, Searcher};

/// Document ID to number of occurrences of a word in that document.
pub type Postings = HashMap<String, u64>;

/// Word to postings.
pub type InvertedIndex = HashMap<String, Postings>;

/// Document ID to the set of distinct words in that document.
pub type Vocabulary = HashMap<String, HashSet<String>>;

/// A document together with its score for a query.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScoredDoc {
    pub doc_id: String,
    pub score: u64,
}

/// The result of a regex search over an index.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RegexHits {
    /// Ranked by score descending, then by document ID ascending.
    pub documents: Vec<ScoredDoc>,
    /// Every index word accepted by the pattern, sorted.
    pub matched_words: Vec<String>,
}

/// Ranks every document of the index by the summed counts of the index words
/// accepted by `pattern`.
///
/// Literal patterns are looked up directly.
pub fn regex_search_index(
    pattern: &str,
    index: &InvertedIndex,
) -> Result<Vec<ScoredDoc>, CompileError> {
    Ok(IndexSearch::new(index).search_regex(pattern)?.documents)
}

/// Searches a borrowed index with a fixed configuration.
#[derive(Clone, Debug)]
pub struct IndexSearch<'i> {
    index: &'i InvertedIndex,
    config: Config,
}

impl<'i> IndexSearch<'i> {
    pub fn new(index: &'i InvertedIndex) -> IndexSearch<'i> {
        IndexSearch::with_config(index, Config::default())
    }

    pub fn with_config(
        index: &'i InvertedIndex,
        config: Config,
    ) -> IndexSearch<'i> {
        IndexSearch { index, config }
    }

    pub fn search_regex(
        &self,
        pattern: &str,
    ) -> Result<RegexHits, CompileError> {
        let searcher = Searcher::with_config(pattern, &self.config)?;

        let mut matched_words: Vec<String> = match searcher.dfa() {
            None => self
                .index
                .get_key_value(pattern)
                .map(|(word, _)| word.clone())
                .into_iter()
                .collect(),
            Some(dfa) => matching_words(dfa, self.index.keys())
                .map(|word| word.to_string())
                .collect(),
        };
        matched_words.sort();
        debug!("{:?} matched {} index words", pattern, matched_words.len());

        let mut scores: HashMap<&str, u64> = HashMap::new();
        for word in &matched_words {
            if let Some(postings) = self.index.get(word) {
                for (doc_id, count) in postings {
                    *scores.entry(doc_id.as_str()).or_insert(0) += count;
                }
            }
        }
        let documents = self.rank(scores);
        Ok(RegexHits { documents, matched_words })
    }

    /// Conjunctive keyword search over terms that are already normalized the
    /// way the index words are.
    ///
    /// Only documents containing every term are returned, scored by the sum
    /// of the terms' counts. A term missing from the index yields no
    /// documents.
    pub fn search_terms(&self, terms: &[&str]) -> Vec<ScoredDoc> {
        if terms.is_empty() {
            return vec![];
        }
        let mut scores: HashMap<&str, u64> = HashMap::new();
        let mut common: Option<HashSet<&str>> = None;
        for &term in terms {
            let postings = match self.index.get(term) {
                Some(postings) if !postings.is_empty() => postings,
                _ => {
                    debug!("{:?} is not in the index", term);
                    return vec![];
                }
            };
            let docs: HashSet<&str> =
                postings.keys().map(|doc_id| doc_id.as_str()).collect();
            common = Some(match common {
                None => docs,
                Some(common) => &common & &docs,
            });
            for (doc_id, count) in postings {
                *scores.entry(doc_id.as_str()).or_insert(0) += count;
            }
        }
        let common = common.unwrap_or_default();
        scores.retain(|doc_id, _| common.contains(doc_id));
        self.rank(scores)
    }

    fn rank(&self, scores: HashMap<&str, u64>) -> Vec<ScoredDoc> {
        let mut documents: Vec<ScoredDoc> = scores
            .into_iter()
            .map(|(doc_id, score)| ScoredDoc { doc_id: doc_id.to_string(), score })
            .collect();
        documents.sort_by(|a, b| {
            b.score.cmp(&a.score).then_with(|| a.doc_id.cmp(&b.doc_id))
        });
        if let Some(k) = self.config.get_top_k() {
            documents.truncate(k);
        }
        documents
    }
}

/// Every distinct word of the vocabulary, sorted.
pub fn distinct_words(vocabulary: &Vocabulary) -> Vec<&str> {
    let mut words: Vec<&str> = vocabulary
        .values()
        .flatten()
        .map(|word| word.as_str())
        .collect::<HashSet<&str>>()
        .into_iter()
        .collect();
    words.sort_unstable();
    words
}

/// The words accepted in full by `dfa`.
pub fn matching_words<'d, I, S>(
    dfa: &'d DFA,
    words: I,
) -> impl Iterator<Item = S> + 'd
where
    I: IntoIterator<Item = S>,
    I::IntoIter: 'd,
    S: AsRef<str> + 'd,
{
    let matcher = Matcher::new(dfa);
    words.into_iter().filter(move |word| matcher.is_match(word.as_ref()))
}

/// The number of distinct words in document `doc_id`, zero for an unknown
/// document.
pub fn vocabulary_size(vocabulary: &Vocabulary, doc_id: &str) -> usize {
    vocabulary.get(doc_id).map_or(0, |words| words.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex_automaton::ParseError;

    fn index() -> InvertedIndex {
        let mut index = InvertedIndex::new();
        let mut add = |word: &str, postings: &[(&str, u64)]| {
            index.insert(
                word.to_string(),
                postings.iter().map(|&(d, c)| (d.to_string(), c)).collect(),
            );
        };
        add("sargon", &[("1", 3), ("2", 1)]);
        add("sagon", &[("2", 4)]);
        add("salon", &[("3", 2)]);
        add("cat", &[("1", 1), ("3", 5)]);
        add("cot", &[("4", 5)]);
        index
    }

    fn ranked(docs: &[ScoredDoc]) -> Vec<(&str, u64)> {
        docs.iter().map(|d| (d.doc_id.as_str(), d.score)).collect()
    }

    #[test]
    fn regex_scores_are_summed() {
        let index = index();
        let docs = regex_search_index("sa(g|r)+on", &index).unwrap();
        assert_eq!(ranked(&docs), vec![("2", 5), ("1", 3)]);
    }

    #[test]
    fn ties_break_on_document_id() {
        let index = index();
        let docs = regex_search_index("c.t", &index).unwrap();
        assert_eq!(ranked(&docs), vec![("3", 5), ("4", 5), ("1", 1)]);
    }

    #[test]
    fn literal_patterns_look_up_postings() {
        let index = index();
        let docs = regex_search_index("cat", &index).unwrap();
        assert_eq!(ranked(&docs), vec![("3", 5), ("1", 1)]);
        assert!(regex_search_index("dog", &index).unwrap().is_empty());
    }

    #[test]
    fn matched_words_and_top_k() {
        let index = index();
        let search =
            IndexSearch::with_config(&index, Config::new().top_k(Some(1)));
        let hits = search.search_regex("s.*on").unwrap();
        assert_eq!(hits.matched_words, vec!["sagon", "salon", "sargon"]);
        assert_eq!(ranked(&hits.documents), vec![("2", 5)]);
    }

    #[test]
    fn no_word_matches() {
        let index = index();
        let hits = IndexSearch::new(&index).search_regex("x+").unwrap();
        assert_eq!(hits, RegexHits::default());
    }

    #[test]
    fn compile_errors_propagate() {
        let index = index();
        assert_eq!(
            regex_search_index("(sa", &index).unwrap_err(),
            CompileError::Parse(ParseError::UnbalancedParenthesis { offset: 0 })
        );
    }

    #[test]
    fn conjunctive_terms() {
        let index = index();
        let search = IndexSearch::new(&index);
        assert_eq!(ranked(&search.search_terms(&["sargon", "cat"])), vec![("1", 4)]);
        assert_eq!(
            ranked(&search.search_terms(&["sargon"])),
            vec![("1", 3), ("2", 1)]
        );
        assert!(search.search_terms(&["sargon", "dog"]).is_empty());
        assert!(search.search_terms(&["cot", "salon"]).is_empty());
        assert!(search.search_terms(&[]).is_empty());
    }

    #[test]
    fn vocabulary_helpers() {
        let mut vocabulary = Vocabulary::new();
        vocabulary.insert(
            "1".to_string(),
            ["cat", "sargon"].iter().map(|w| w.to_string()).collect(),
        );
        vocabulary.insert(
            "2".to_string(),
            ["sargon", "sagon"].iter().map(|w| w.to_string()).collect(),
        );
        assert_eq!(distinct_words(&vocabulary), vec!["cat", "sagon", "sargon"]);
        assert_eq!(vocabulary_size(&vocabulary, "2"), 2);
        assert_eq!(vocabulary_size(&vocabulary, "9"), 0);

        let searcher = Searcher::new("sa.+on").unwrap();
        let words: Vec<&str> = matching_words(
            searcher.dfa().unwrap(),
            distinct_words(&vocabulary),
        )
        .collect();
        assert_eq!(words, vec!["sagon", "sargon"]);
    }
}

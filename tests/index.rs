use automata_search::{
    distinct_words, matching_words, regex_search_index, vocabulary_size, Config,
    IndexSearch, InvertedIndex, Postings, ScoredDoc, Searcher, Vocabulary,
};
use once_cell::sync::Lazy;

// word -> [(document, count)]
const POSTINGS: &[(&str, &[(&str, u64)])] = &[
    ("sargon", &[("10", 4), ("11", 1)]),
    ("sagon", &[("11", 2), ("12", 7)]),
    ("saron", &[("13", 1)]),
    ("akkad", &[("10", 2), ("12", 1)]),
    ("king", &[("10", 3), ("12", 3), ("13", 9)]),
    ("kings", &[("12", 1)]),
];

static INDEX: Lazy<InvertedIndex> = Lazy::new(|| {
    POSTINGS
        .iter()
        .map(|&(word, postings)| {
            let postings: Postings =
                postings.iter().map(|&(doc, count)| (doc.to_string(), count)).collect();
            (word.to_string(), postings)
        })
        .collect()
});

static VOCABULARY: Lazy<Vocabulary> = Lazy::new(|| {
    let mut vocabulary = Vocabulary::new();
    for &(word, postings) in POSTINGS {
        for &(doc, _) in postings {
            vocabulary.entry(doc.to_string()).or_default().insert(word.to_string());
        }
    }
    vocabulary
});

fn ids(docs: &[ScoredDoc]) -> Vec<&str> {
    docs.iter().map(|d| d.doc_id.as_str()).collect()
}

#[test]
fn regex_over_index_words() -> anyhow::Result<()> {
    crate::init_logging();
    let docs = regex_search_index("S(a|g|r)+on", &INDEX)?;
    // Index words are lowercase.
    assert!(docs.is_empty());

    let docs = regex_search_index("s(a|g|r)+on", &INDEX)?;
    assert_eq!(ids(&docs), vec!["12", "10", "11", "13"]);
    assert_eq!(docs[0].score, 7);
    assert_eq!(docs[2].score, 3);
    Ok(())
}

#[test]
fn regex_hits_report_matched_words() -> anyhow::Result<()> {
    let search = IndexSearch::with_config(&INDEX, Config::new().top_k(Some(2)));
    let hits = search.search_regex("king.*")?;
    assert_eq!(hits.matched_words, vec!["king", "kings"]);
    assert_eq!(ids(&hits.documents), vec!["13", "12"]);
    assert_eq!(hits.documents[1].score, 4);
    Ok(())
}

#[test]
fn unminimized_search_ranks_the_same() -> anyhow::Result<()> {
    let raw = IndexSearch::with_config(&INDEX, Config::new().minimize(false));
    let min = IndexSearch::new(&INDEX);
    for pattern in ["s.*n", "(k|a)+.*", "sa(r|g)on", "kings"] {
        assert_eq!(raw.search_regex(pattern)?, min.search_regex(pattern)?);
    }
    Ok(())
}

#[test]
fn keyword_search_is_conjunctive() {
    let search = IndexSearch::new(&INDEX);
    let docs = search.search_terms(&["king", "akkad"]);
    assert_eq!(ids(&docs), vec!["10", "12"]);
    assert_eq!(docs[0].score, 5);
    assert!(search.search_terms(&["king", "babylon"]).is_empty());
}

#[test]
fn vocabulary_words() {
    let words = distinct_words(&VOCABULARY);
    assert_eq!(words.len(), POSTINGS.len());
    assert_eq!(vocabulary_size(&VOCABULARY, "12"), 4);

    let searcher = Searcher::new("sa.on").unwrap();
    let matched: Vec<&str> =
        matching_words(searcher.dfa().unwrap(), words).collect();
    assert_eq!(matched, vec!["sagon", "saron"]);
}

/*!
This crate searches text and inverted indexes with patterns written in a small
regular expression dialect.

Patterns support literal characters, the `.` wildcard, concatenation,
alternation with `|`, repetition with `*` and `+`, and grouping with
parentheses. There are no character classes, anchors or escapes.

A pattern without any metacharacter is searched with a Knuth-Morris-Pratt
scan ([`ExactMatcher`]). Every other pattern is compiled by the
[`regex_automaton`] crate into a Thompson NFA, determinized by subset
construction and minimized with Hopcroft's algorithm, then driven over the
text.

# Example: searching lines

```rust
use automata_search::Searcher;

let searcher = Searcher::new("S(a|g|r)+on").unwrap();
let found = searcher.grep("Sargon of Akkad\nSn\nthe Sagon");
assert_eq!(found.len(), 2);
assert_eq!((found[0].line_number, found[0].column), (1, 1));
assert_eq!((found[1].line_number, found[1].column), (3, 5));
```

# Example: whole-word acceptance

```rust
use automata_search::Searcher;

let searcher = Searcher::new("(a|b)*c").unwrap();
assert!(searcher.is_match("aabbac"));
assert!(!searcher.is_match("ab"));
```

# Example: searching an inverted index

```rust
use automata_search::{regex_search_index, InvertedIndex};

let mut index = InvertedIndex::new();
index.insert("cat".to_string(), [("7".to_string(), 2)].into_iter().collect());
index.insert("cot".to_string(), [("9".to_string(), 3)].into_iter().collect());

let docs = regex_search_index("c.t", &index).unwrap();
assert_eq!(docs[0].doc_id, "9");
assert_eq!(docs[1].doc_id, "7");
```

# Crate features

* **logging** (enabled by default) - Emits debug messages through the `log`
  crate while compiling patterns and searching indexes.
* **cli** (enabled by default) - Builds the `egrep` and `search-index`
  command line tools.
*/

#![deny(missing_debug_implementations)]

#[macro_use]
mod macros;

pub mod exact;
pub mod index;
pub mod searcher;

pub use crate::exact::{exact_search, ExactMatcher, FindIter};
pub use crate::index::{
    distinct_words, matching_words, regex_search_index, vocabulary_size,
    IndexSearch, InvertedIndex, Postings, RegexHits, ScoredDoc, Vocabulary,
};
pub use crate::searcher::{is_literal, Config, LineMatch, Searcher};

pub use regex_automaton::{
    accepts_word, search_line, CompileError, ParseError, Span, DFA,
};

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

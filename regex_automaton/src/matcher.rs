use crate::{dfa::DFA, nfa::StateId};

/// A half-open range of character offsets `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Span {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A matcher that drives a DFA over input text.
///
/// When the current character has no edge, the state's wildcard edge is
/// taken if it has one; otherwise the walk stops.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    dfa: &'a DFA,
}

impl<'a> Matcher<'a> {
    /// Create a new matcher for the given DFA
    pub fn new(dfa: &'a DFA) -> Self {
        Self { dfa }
    }

    /// Check if the entire input is accepted. Accepting a prefix is not
    /// enough.
    pub fn is_match(&self, word: &str) -> bool {
        let mut state = self.dfa.start();
        for ch in word.chars() {
            match self.dfa.next_state(state, ch) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.dfa.is_accepting(state)
    }

    /// Find every match in a line.
    ///
    /// Each start offset is tried independently, and every accepting state
    /// reached from it yields a span, so matches sharing a start and matches
    /// overlapping each other are all reported. Spans are ordered by start,
    /// then by end. Empty matches are never reported.
    pub fn find_all(&self, line: &str) -> Vec<Span> {
        let chars: Vec<char> = line.chars().collect();
        let mut matches = Vec::new();
        for start in 0..chars.len() {
            self.walk_from(&chars, start, |end| {
                matches.push(Span::new(start, end));
                true
            });
        }
        matches
    }

    /// Find the first match in a line: the shortest one at the leftmost
    /// start offset that has any.
    pub fn find(&self, line: &str) -> Option<Span> {
        let chars: Vec<char> = line.chars().collect();
        let mut found = None;
        for start in 0..chars.len() {
            self.walk_from(&chars, start, |end| {
                found = Some(Span::new(start, end));
                false
            });
            if found.is_some() {
                break;
            }
        }
        found
    }

    /// Walks from `start`, calling `on_match` with the end offset each time
    /// an accepting state is entered. The walk stops when `on_match`
    /// returns false or the DFA has nowhere to go.
    fn walk_from<F: FnMut(usize) -> bool>(
        &self,
        chars: &[char],
        start: usize,
        mut on_match: F,
    ) {
        let mut state: StateId = self.dfa.start();
        for (i, &ch) in chars.iter().enumerate().skip(start) {
            state = match self.dfa.next_state(state, ch) {
                Some(next) => next,
                None => return,
            };
            if self.dfa.is_accepting(state) && !on_match(i + 1) {
                return;
            }
        }
    }
}

/// Every match of `dfa` in `line`, as character offset spans.
pub fn search_line(dfa: &DFA, line: &str) -> Vec<Span> {
    Matcher::new(dfa).find_all(line)
}

/// Returns true if walking `dfa` over the whole of `word` ends in an
/// accepting state.
pub fn accepts_word(dfa: &DFA, word: &str) -> bool {
    Matcher::new(dfa).is_match(word)
}

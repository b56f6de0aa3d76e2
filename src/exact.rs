/*!
Exact matching of literal patterns with a Knuth-Morris-Pratt scan.

Patterns without any metacharacter never go through the automaton pipeline.
The text is scanned once, left to right, and the pattern is shifted using a
precomputed carry-over table instead of backtracking in the text.
*/

use regex_automaton::Span;

/// A literal pattern together with its carry-over table.
///
/// `carry_over[i]` is the length of the prefix of the pattern to resume
/// from after the first `i + 1` characters matched and the next one did not.
/// `None` means matching restarts from scratch.
///
/// The table skips borders that would fail again on the same text
/// character: if the character following a border equals the character that
/// just mismatched, the border's own fallback is used instead. The last
/// entry is used after a full match, so overlapping occurrences are found.
#[derive(Clone, Debug)]
pub struct ExactMatcher {
    pattern: Vec<char>,
    carry_over: Vec<Option<usize>>,
}

impl ExactMatcher {
    pub fn new(pattern: &str) -> ExactMatcher {
        let pattern: Vec<char> = pattern.chars().collect();
        let carry_over = carry_over_table(&pattern);
        ExactMatcher { pattern, carry_over }
    }

    /// The pattern's length in characters.
    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    pub fn carry_over(&self) -> &[Option<usize>] {
        &self.carry_over
    }

    /// Returns an iterator over every occurrence of the pattern in `text`,
    /// overlapping ones included, as character offset spans.
    ///
    /// An empty pattern has no occurrences.
    pub fn find_iter<'m, 't>(&'m self, text: &'t str) -> FindIter<'m, 't> {
        FindIter { matcher: self, chars: text.chars(), pos: 0, matched: 0 }
    }

    pub fn find_all(&self, text: &str) -> Vec<Span> {
        self.find_iter(text).collect()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.find_iter(text).next().is_some()
    }

    fn fallback(&self, matched: usize) -> usize {
        self.carry_over[matched - 1].unwrap_or(0)
    }
}

fn carry_over_table(pattern: &[char]) -> Vec<Option<usize>> {
    let m = pattern.len();
    if m == 0 {
        return vec![];
    }

    // Plain border lengths: border[i] is the longest proper border of
    // pattern[..=i].
    let mut border = vec![0; m];
    let mut k = 0;
    for i in 1..m {
        while k > 0 && pattern[i] != pattern[k] {
            k = border[k - 1];
        }
        if pattern[i] == pattern[k] {
            k += 1;
        }
        border[i] = k;
    }

    let mut carry_over = vec![None; m];
    for i in 0..m - 1 {
        let k = border[i];
        carry_over[i] = if pattern[k] != pattern[i + 1] {
            Some(k).filter(|&k| k > 0)
        } else if k > 0 {
            carry_over[k - 1]
        } else {
            None
        };
    }
    carry_over[m - 1] = Some(border[m - 1]).filter(|&k| k > 0);
    carry_over
}

/// An iterator over the occurrences of a literal pattern.
///
/// `'m` is the lifetime of the matcher and `'t` the lifetime of the text.
#[derive(Debug)]
pub struct FindIter<'m, 't> {
    matcher: &'m ExactMatcher,
    chars: std::str::Chars<'t>,
    pos: usize,
    matched: usize,
}

impl<'m, 't> Iterator for FindIter<'m, 't> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        let pattern = &self.matcher.pattern;
        let m = pattern.len();
        if m == 0 {
            return None;
        }
        for ch in self.chars.by_ref() {
            self.pos += 1;
            while self.matched > 0 && ch != pattern[self.matched] {
                self.matched = self.matcher.fallback(self.matched);
            }
            if ch == pattern[self.matched] {
                self.matched += 1;
            }
            if self.matched == m {
                self.matched = self.matcher.fallback(m);
                return Some(Span::new(self.pos - m, self.pos));
            }
        }
        None
    }
}

/// Every occurrence of the literal `pattern` in `text`.
pub fn exact_search(pattern: &str, text: &str) -> Vec<Span> {
    ExactMatcher::new(pattern).find_all(text)
}

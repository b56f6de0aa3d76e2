use regex_automaton::{Builder, CompileError, Matcher, ParseError, Span, DFA};

use crate::exact::ExactMatcher;

/// The configuration used for building a [`Searcher`] and running index
/// searches.
#[derive(Clone, Debug)]
pub struct Config {
    minimize: bool,
    top_k: Option<usize>,
    dfa_size_limit: Option<usize>,
    nest_limit: u32,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            minimize: true,
            top_k: None,
            dfa_size_limit: None,
            nest_limit: regex_automaton::DEFAULT_NEST_LIMIT,
        }
    }
}

impl Config {
    /// Return a new default configuration.
    ///
    /// Searches drive the minimal DFA and return every ranked document. The
    /// size of the DFA is not limited, the nesting depth of a pattern is.
    pub fn new() -> Config {
        Config::default()
    }

    /// Whether to search with the minimal DFA or with the DFA straight out of
    /// subset construction. Both accept the same words; turning this off is
    /// only useful to compare the two.
    pub fn minimize(mut self, yes: bool) -> Config {
        self.minimize = yes;
        self
    }

    /// Keep only the `k` best ranked documents of an index search.
    pub fn top_k(mut self, k: Option<usize>) -> Config {
        self.top_k = k;
        self
    }

    /// See [`regex_automaton::Config::dfa_size_limit`].
    pub fn dfa_size_limit(mut self, limit: Option<usize>) -> Config {
        self.dfa_size_limit = limit;
        self
    }

    /// See [`regex_automaton::Config::nest_limit`].
    pub fn nest_limit(mut self, limit: u32) -> Config {
        self.nest_limit = limit;
        self
    }

    pub fn get_minimize(&self) -> bool {
        self.minimize
    }

    pub fn get_top_k(&self) -> Option<usize> {
        self.top_k
    }

    pub fn get_dfa_size_limit(&self) -> Option<usize> {
        self.dfa_size_limit
    }

    pub fn get_nest_limit(&self) -> u32 {
        self.nest_limit
    }
}

/// Returns true when `pattern` contains none of the metacharacters
/// `. * + | ( )`, in which case it can only match itself.
pub fn is_literal(pattern: &str) -> bool {
    !pattern.chars().any(|ch| matches!(ch, '.' | '*' | '+' | '|' | '(' | ')'))
}

/// One match reported by [`Searcher::grep`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LineMatch {
    /// 1-based line number.
    pub line_number: usize,
    /// 1-based character column of the start of the match.
    pub column: usize,
    /// The line, without its terminator.
    pub text: String,
    /// The match, in character offsets within `text`.
    pub span: Span,
}

#[derive(Clone, Debug)]
enum Strategy {
    Exact(ExactMatcher),
    Automaton(DFA),
}

/// A compiled pattern, ready to search text.
///
/// Literal patterns are searched with [`ExactMatcher`]. Every other pattern
/// is compiled to a DFA.
#[derive(Clone, Debug)]
pub struct Searcher {
    pattern: String,
    strategy: Strategy,
}

impl Searcher {
    pub fn new(pattern: &str) -> Result<Searcher, CompileError> {
        Searcher::with_config(pattern, &Config::default())
    }

    pub fn with_config(
        pattern: &str,
        config: &Config,
    ) -> Result<Searcher, CompileError> {
        if pattern.is_empty() {
            return Err(CompileError::Parse(ParseError::EmptyPattern));
        }
        let strategy = if is_literal(pattern) {
            debug!("{:?} is literal, searching with KMP", pattern);
            Strategy::Exact(ExactMatcher::new(pattern))
        } else {
            let mut builder = Builder::new();
            builder.configure(
                regex_automaton::Config::new()
                    .dfa_size_limit(config.get_dfa_size_limit())
                    .nest_limit(config.get_nest_limit()),
            );
            let automata = builder.build(pattern)?;
            debug!(
                "{:?} compiled: {} NFA states, {} DFA states, {} minimal",
                pattern,
                automata.nfa.state_len(),
                automata.dfa.state_len(),
                automata.minimal.state_len(),
            );
            if config.get_minimize() {
                Strategy::Automaton(automata.minimal)
            } else {
                Strategy::Automaton(automata.dfa)
            }
        };
        Ok(Searcher { pattern: pattern.to_string(), strategy })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.strategy, Strategy::Exact(_))
    }

    /// The DFA driven by this searcher, if the pattern is not literal.
    pub fn dfa(&self) -> Option<&DFA> {
        match self.strategy {
            Strategy::Exact(_) => None,
            Strategy::Automaton(ref dfa) => Some(dfa),
        }
    }

    /// Returns true if the whole of `word` matches the pattern.
    pub fn is_match(&self, word: &str) -> bool {
        match self.strategy {
            Strategy::Exact(_) => word == self.pattern,
            Strategy::Automaton(ref dfa) => Matcher::new(dfa).is_match(word),
        }
    }

    /// Every match in `line`, as character offset spans.
    pub fn find_all(&self, line: &str) -> Vec<Span> {
        match self.strategy {
            Strategy::Exact(ref exact) => exact.find_all(line),
            Strategy::Automaton(ref dfa) => Matcher::new(dfa).find_all(line),
        }
    }

    /// Searches `text` line by line. Lines end at `\n`, and a `\r` right
    /// before it is not part of the line.
    pub fn grep(&self, text: &str) -> Vec<LineMatch> {
        let mut matches = vec![];
        for (i, line) in lines(text).enumerate() {
            for span in self.find_all(line) {
                matches.push(LineMatch {
                    line_number: i + 1,
                    column: span.start + 1,
                    text: line.to_string(),
                    span,
                });
            }
        }
        matches
    }
}

/// Splits `text` on `\n`. A final empty line after a trailing `\n` is not
/// yielded.
fn lines(text: &str) -> impl Iterator<Item = &str> {
    let bytes = text.as_bytes();
    let mut starts = std::iter::once(0)
        .chain(memchr::memchr_iter(b'\n', bytes).map(|i| i + 1))
        .peekable();
    std::iter::from_fn(move || {
        let start = starts.next()?;
        if start >= bytes.len() {
            return None;
        }
        let end = match starts.peek() {
            Some(&next) => next - 1,
            None => bytes.len(),
        };
        let line = &text[start..end];
        Some(line.strip_suffix('\r').unwrap_or(line))
    })
}

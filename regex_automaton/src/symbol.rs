use std::fmt;

/// An input symbol on an automaton edge.
///
/// `Any` is the wildcard written `.` in a pattern. On a DFA it acts as the
/// default edge: it is taken for a character that has no edge of its own.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    /// A concrete character.
    Char(char),
    /// Any character.
    Any,
}

impl Symbol {
    /// Returns true if this symbol accepts the given character.
    pub fn matches(&self, ch: char) -> bool {
        match *self {
            Symbol::Char(c) => c == ch,
            Symbol::Any => true,
        }
    }

    /// Returns true for the wildcard.
    pub fn is_any(&self) -> bool {
        matches!(self, Symbol::Any)
    }
}

impl From<char> for Symbol {
    fn from(ch: char) -> Symbol {
        Symbol::Char(ch)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Symbol::Char(c) => write!(f, "{}", c.escape_debug()),
            Symbol::Any => write!(f, "."),
        }
    }
}

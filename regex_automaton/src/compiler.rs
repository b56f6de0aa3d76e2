use crate::{
    nfa::{Fragment, NFA},
    parser::SyntaxNode,
    symbol::Symbol,
};

/// Compiler that converts a syntax tree to a Thompson NFA.
///
/// Every compilation owns its NFA, and with it the counter that hands out
/// state IDs, so independent compilations never share mutable state.
#[derive(Debug, Default)]
pub struct Compiler {
    nfa: NFA,
}

impl Compiler {
    /// Create a new compiler
    pub fn new() -> Self {
        Self { nfa: NFA::new() }
    }

    /// Compile a syntax tree to a Thompson NFA. The tree's entry and exit
    /// states become the NFA's start and accepting states.
    pub fn compile(mut self, node: &SyntaxNode) -> NFA {
        let fragment = self.compile_node(node);
        self.nfa.start = fragment.start;
        self.nfa.accept = fragment.end;
        debug!(
            "thompson NFA built with {} states (start={}, accept={})",
            self.nfa.state_len(),
            self.nfa.start,
            self.nfa.accept,
        );
        self.nfa
    }

    fn compile_node(&mut self, node: &SyntaxNode) -> Fragment {
        match node {
            SyntaxNode::Literal(symbol) => self.compile_literal(*symbol),
            SyntaxNode::Concat(left, right) => self.compile_concat(left, right),
            SyntaxNode::Alternation(left, right) => {
                self.compile_alternation(left, right)
            }
            SyntaxNode::Star(sub) => self.compile_star(sub),
            SyntaxNode::Plus(sub) => self.compile_plus(sub),
            SyntaxNode::Group(sub) => self.compile_node(sub),
        }
    }

    fn fresh(&mut self) -> Fragment {
        let start = self.nfa.add_state();
        let end = self.nfa.add_state();
        Fragment { start, end }
    }

    fn compile_literal(&mut self, symbol: Symbol) -> Fragment {
        let fragment = self.fresh();
        self.nfa.add_transition(fragment.start, symbol, fragment.end);
        fragment
    }

    fn compile_concat(&mut self, left: &SyntaxNode, right: &SyntaxNode) -> Fragment {
        let left = self.compile_node(left);
        let right = self.compile_node(right);
        self.nfa.connect(left.end, right.start);
        Fragment { start: left.start, end: right.end }
    }

    fn compile_alternation(
        &mut self,
        left: &SyntaxNode,
        right: &SyntaxNode,
    ) -> Fragment {
        let left = self.compile_node(left);
        let right = self.compile_node(right);
        let fragment = self.fresh();
        self.nfa.connect(fragment.start, left.start);
        self.nfa.connect(fragment.start, right.start);
        self.nfa.connect(left.end, fragment.end);
        self.nfa.connect(right.end, fragment.end);
        fragment
    }

    fn compile_star(&mut self, sub: &SyntaxNode) -> Fragment {
        let fragment = self.compile_repetition(sub);
        // zero repetitions
        self.nfa.connect(fragment.start, fragment.end);
        fragment
    }

    /// Like a star without the edge that skips the body, so the body is
    /// traversed at least once.
    fn compile_plus(&mut self, sub: &SyntaxNode) -> Fragment {
        self.compile_repetition(sub)
    }

    fn compile_repetition(&mut self, sub: &SyntaxNode) -> Fragment {
        let body = self.compile_node(sub);
        let fragment = self.fresh();
        self.nfa.connect(fragment.start, body.start);
        self.nfa.connect(body.end, body.start);
        self.nfa.connect(body.end, fragment.end);
        fragment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn build(pattern: &str) -> NFA {
        Compiler::new().compile(&parse(pattern).unwrap())
    }

    #[test]
    fn literal_is_two_states() {
        let nfa = build("a");
        assert_eq!(nfa.state_len(), 2);
        assert_eq!((nfa.start, nfa.accept), (0, 1));
        assert_eq!(nfa.states[0].transitions[0].symbol, Symbol::Char('a'));
    }

    #[test]
    fn concat_links_exit_to_entry() {
        let nfa = build("ab");
        assert_eq!(nfa.state_len(), 4);
        assert_eq!(nfa.states[1].epsilons, vec![2]);
        assert_eq!((nfa.start, nfa.accept), (0, 3));
    }

    #[test]
    fn star_edges() {
        let nfa = build("a*");
        // body 0 -> 1, wrapper 2 -> 3
        assert_eq!(nfa.state_len(), 4);
        assert_eq!((nfa.start, nfa.accept), (2, 3));
        assert_eq!(nfa.states[2].epsilons, vec![0, 3]);
        assert_eq!(nfa.states[1].epsilons, vec![0, 3]);
    }

    #[test]
    fn plus_has_no_skip_edge() {
        let nfa = build("a+");
        assert_eq!(nfa.states[2].epsilons, vec![0]);
        assert!(!nfa.is_match(""));
        assert!(nfa.is_match("a"));
        assert!(nfa.is_match("aaa"));
    }

    #[test]
    fn alternation_edges() {
        let nfa = build("a|b");
        assert_eq!(nfa.state_len(), 6);
        assert_eq!((nfa.start, nfa.accept), (4, 5));
        assert_eq!(nfa.states[4].epsilons, vec![0, 2]);
        assert_eq!(nfa.states[1].epsilons, vec![5]);
        assert_eq!(nfa.states[3].epsilons, vec![5]);
    }

    #[test]
    fn simulation_of_compiled_patterns() {
        let nfa = build("(a|b)*c");
        for word in ["c", "ac", "bc", "aabbac"] {
            assert!(nfa.is_match(word), "{}", word);
        }
        for word in ["", "ab", "ca"] {
            assert!(!nfa.is_match(word), "{}", word);
        }
        let nfa = build("a.c");
        assert!(nfa.is_match("abc"));
        assert!(nfa.is_match("a.c"));
        assert!(!nfa.is_match("ac"));
    }
}

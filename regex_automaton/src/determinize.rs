use std::collections::{HashMap, VecDeque};

use crate::{
    dfa::DFA,
    nfa::{StateId, StateSet, NFA},
    symbol::Symbol,
    CompileError,
};

/// Converts an NFA into an equivalent DFA by subset construction.
///
/// Every DFA state stands for the epsilon closure of a set of NFA states.
/// Sets are explored breadth first from the closure of the NFA start state,
/// so DFA state `0` is always the start state and IDs follow discovery
/// order.
///
/// The working alphabet is every symbol that labels an NFA edge. Moving on a
/// concrete character also follows the wildcard edges of the set; moving on
/// the wildcard follows only wildcard edges and yields the DFA's default edge
/// for characters outside the alphabet.
#[derive(Debug)]
pub struct Determinizer<'a> {
    nfa: &'a NFA,
    size_limit: Option<usize>,
}

impl<'a> Determinizer<'a> {
    pub fn new(nfa: &'a NFA) -> Determinizer<'a> {
        Determinizer { nfa, size_limit: None }
    }

    /// Fail instead of building a DFA with more than `limit` states.
    pub fn size_limit(mut self, limit: Option<usize>) -> Determinizer<'a> {
        self.size_limit = limit;
        self
    }

    pub fn build(self) -> Result<DFA, CompileError> {
        let nfa = self.nfa;
        let alphabet: Vec<Symbol> = nfa.alphabet().into_iter().collect();

        let mut dfa = DFA::new();
        let mut ids: HashMap<StateSet, StateId> = HashMap::new();
        let mut queue: VecDeque<(StateId, StateSet)> = VecDeque::new();

        let start = nfa.epsilon_closure(&StateSet::from([nfa.start]));
        if nfa.is_accepting(&start) {
            dfa.set_accepting(dfa.start());
        }
        ids.insert(start.clone(), dfa.start());
        queue.push_back((dfa.start(), start));

        while let Some((id, set)) = queue.pop_front() {
            for &symbol in &alphabet {
                let moved = nfa.step(&set, symbol);
                if moved.is_empty() {
                    continue;
                }
                let next = nfa.epsilon_closure(&moved);
                let next_id = match ids.get(&next) {
                    Some(&next_id) => next_id,
                    None => {
                        if let Some(limit) = self.size_limit {
                            if dfa.state_len() >= limit {
                                return Err(CompileError::TooManyStates { limit });
                            }
                        }
                        let next_id = dfa.add_state();
                        if nfa.is_accepting(&next) {
                            dfa.set_accepting(next_id);
                        }
                        ids.insert(next.clone(), next_id);
                        queue.push_back((next_id, next));
                        next_id
                    }
                };
                dfa.add_transition(id, symbol, next_id);
            }
        }
        debug!(
            "subset construction: {} NFA states -> {} DFA states",
            nfa.state_len(),
            dfa.state_len(),
        );
        Ok(dfa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compiler::Compiler, parser::parse};

    fn dfa(pattern: &str) -> DFA {
        let nfa = Compiler::new().compile(&parse(pattern).unwrap());
        Determinizer::new(&nfa).build().unwrap()
    }

    fn accepts(dfa: &DFA, word: &str) -> bool {
        let mut state = dfa.start();
        for ch in word.chars() {
            match dfa.next_state(state, ch) {
                Some(next) => state = next,
                None => return false,
            }
        }
        dfa.is_accepting(state)
    }

    #[test]
    fn star_then_literal() {
        let dfa = dfa("a*b");
        assert_eq!(dfa.state_len(), 3);
        assert_eq!(dfa.start(), 0);
        assert!(!dfa.is_accepting(0));
        for word in ["b", "ab", "aab"] {
            assert!(accepts(&dfa, word), "{}", word);
        }
        for word in ["", "a", "ba"] {
            assert!(!accepts(&dfa, word), "{}", word);
        }
    }

    #[test]
    fn start_accepts_when_closure_reaches_accept() {
        let dfa = dfa("a*");
        assert!(dfa.is_accepting(dfa.start()));
    }

    #[test]
    fn every_pair_has_one_destination() {
        let dfa = dfa("(a|b)*c");
        for id in 0..dfa.state_len() {
            let symbols: Vec<Symbol> = dfa.transitions(id).map(|(s, _)| s).collect();
            let mut deduped = symbols.clone();
            deduped.dedup();
            assert_eq!(symbols, deduped);
        }
        assert!(accepts(&dfa, "aabbac"));
        assert!(!accepts(&dfa, "ab"));
    }

    #[test]
    fn wildcard_becomes_default_edge() {
        let dfa = dfa("a.c");
        assert!(dfa.alphabet().contains(&Symbol::Any));
        assert!(accepts(&dfa, "abc"));
        assert!(accepts(&dfa, "aac"));
        assert!(accepts(&dfa, "acc"));
        assert!(accepts(&dfa, "a€c"));
        assert!(!accepts(&dfa, "ac"));
    }

    #[test]
    fn size_limit() {
        let nfa = Compiler::new().compile(&parse("(a|b)*abb").unwrap());
        let err = Determinizer::new(&nfa).size_limit(Some(2)).build().unwrap_err();
        assert_eq!(err, CompileError::TooManyStates { limit: 2 });
        assert!(Determinizer::new(&nfa).size_limit(Some(100)).build().is_ok());
    }
}

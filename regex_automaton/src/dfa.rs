use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::{nfa::StateId, symbol::Symbol};

/// A deterministic finite automaton.
///
/// States are numbered densely from zero. The transition function is
/// partial: a missing `(state, symbol)` pair rejects. A `Symbol::Any` edge is
/// the default edge of its state, followed by any character that has no edge
/// of its own (see [`DFA::next_state`]).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DFA {
    start: StateId,
    accepting: BTreeSet<StateId>,
    transitions: Vec<BTreeMap<Symbol, StateId>>,
}

impl DFA {
    /// A DFA with a single, non-accepting start state and no edges.
    pub fn new() -> DFA {
        DFA {
            start: 0,
            accepting: BTreeSet::new(),
            transitions: vec![BTreeMap::new()],
        }
    }

    pub fn add_state(&mut self) -> StateId {
        self.transitions.push(BTreeMap::new());
        self.transitions.len() - 1
    }

    fn ensure_state(&mut self, id: StateId) {
        if id >= self.transitions.len() {
            self.transitions.resize_with(id + 1, BTreeMap::new);
        }
    }

    pub fn set_start(&mut self, id: StateId) {
        self.ensure_state(id);
        self.start = id;
    }

    pub fn set_accepting(&mut self, id: StateId) {
        self.ensure_state(id);
        self.accepting.insert(id);
    }

    /// Records `from -symbol-> to`, replacing any previous destination for
    /// the same pair. States are allocated as needed.
    pub fn add_transition(&mut self, from: StateId, symbol: Symbol, to: StateId) {
        self.ensure_state(from.max(to));
        self.transitions[from].insert(symbol, to);
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn state_len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_accepting(&self, id: StateId) -> bool {
        self.accepting.contains(&id)
    }

    pub fn accepting(&self) -> impl Iterator<Item = StateId> + '_ {
        self.accepting.iter().copied()
    }

    /// The destination of the edge labeled exactly `symbol`, if any.
    pub fn transition(&self, id: StateId, symbol: Symbol) -> Option<StateId> {
        self.transitions.get(id)?.get(&symbol).copied()
    }

    /// The outgoing edges of a state in symbol order. An unknown state has
    /// none.
    pub fn transitions(
        &self,
        id: StateId,
    ) -> impl Iterator<Item = (Symbol, StateId)> + '_ {
        self.transitions
            .get(id)
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(&sym, &to)| (sym, to)))
    }

    pub fn transition_len(&self) -> usize {
        self.transitions.iter().map(BTreeMap::len).sum()
    }

    /// Where `ch` leads from `id`: its own edge if there is one, otherwise
    /// the state's wildcard edge.
    pub fn next_state(&self, id: StateId, ch: char) -> Option<StateId> {
        let edges = self.transitions.get(id)?;
        edges.get(&Symbol::Char(ch)).or_else(|| edges.get(&Symbol::Any)).copied()
    }

    /// Every symbol labeling at least one edge.
    pub fn alphabet(&self) -> BTreeSet<Symbol> {
        self.transitions.iter().flat_map(|edges| edges.keys().copied()).collect()
    }
}

impl Default for DFA {
    fn default() -> DFA {
        DFA::new()
    }
}

impl fmt::Display for DFA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "start: {}", self.start)?;
        writeln!(f, "finals: {:?}", self.accepting)?;
        write!(f, "transitions:")?;
        for (id, edges) in self.transitions.iter().enumerate() {
            for (sym, to) in edges {
                write!(f, "\n  {} -'{}'-> {}", id, sym, to)?;
            }
        }
        Ok(())
    }
}

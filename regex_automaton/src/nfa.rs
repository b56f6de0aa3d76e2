use std::collections::BTreeSet;
use std::fmt;

use crate::symbol::Symbol;

/// A state ID in an automaton
pub type StateId = usize;

/// A canonical, ordered set of NFA states.
///
/// Two sets holding the same states compare and hash equal no matter the
/// order in which the states were discovered.
pub type StateSet = BTreeSet<StateId>;

/// A transition that consumes one input symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub symbol: Symbol,
    pub target: StateId,
}

/// A Thompson NFA state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    /// Edges that consume a symbol
    pub transitions: Vec<Transition>,
    /// Edges taken without consuming input
    pub epsilons: Vec<StateId>,
}

/// Fragment of an NFA with entry and exit states
#[derive(Debug, Clone, Copy)]
pub struct Fragment {
    pub start: StateId,
    pub end: StateId,
}

/// A Thompson NFA with epsilon transitions and a single accepting state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NFA {
    /// All states in the NFA, indexed by their ID
    pub states: Vec<State>,
    /// Starting state
    pub start: StateId,
    /// Accepting state
    pub accept: StateId,
}

impl NFA {
    /// Create a new empty NFA
    pub fn new() -> Self {
        Self { states: Vec::new(), start: 0, accept: 0 }
    }

    /// Add a new state and return its ID. IDs are handed out densely in
    /// allocation order.
    pub fn add_state(&mut self) -> StateId {
        let id = self.states.len();
        self.states.push(State::default());
        id
    }

    /// Add an edge consuming `symbol`
    pub fn add_transition(&mut self, from: StateId, symbol: Symbol, to: StateId) {
        let transitions = &mut self.states[from].transitions;
        let transition = Transition { symbol, target: to };
        if !transitions.contains(&transition) {
            transitions.push(transition);
        }
    }

    /// Connect two states with an epsilon transition
    pub fn connect(&mut self, from: StateId, to: StateId) {
        let epsilons = &mut self.states[from].epsilons;
        if !epsilons.contains(&to) {
            epsilons.push(to);
        }
    }

    pub fn state_len(&self) -> usize {
        self.states.len()
    }

    /// Get epsilon closure of a set of states
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = states.clone();
        let mut stack: Vec<StateId> = states.iter().copied().collect();

        while let Some(state_id) = stack.pop() {
            let Some(state) = self.states.get(state_id) else {
                continue;
            };
            for &next in &state.epsilons {
                if closure.insert(next) {
                    stack.push(next);
                }
            }
        }

        closure
    }

    /// All states reachable from `states` by consuming `symbol`.
    ///
    /// A concrete character also follows every wildcard edge. The wildcard
    /// itself only follows wildcard edges.
    pub fn step(&self, states: &StateSet, symbol: Symbol) -> StateSet {
        let mut next = StateSet::new();
        for &state_id in states {
            let Some(state) = self.states.get(state_id) else {
                continue;
            };
            for t in &state.transitions {
                if t.symbol == symbol || t.symbol.is_any() {
                    next.insert(t.target);
                }
            }
        }
        next
    }

    /// Check if the set contains the accepting state
    pub fn is_accepting(&self, states: &StateSet) -> bool {
        states.contains(&self.accept)
    }

    /// Every symbol that labels at least one edge, in order.
    pub fn alphabet(&self) -> BTreeSet<Symbol> {
        self.states
            .iter()
            .flat_map(|s| s.transitions.iter().map(|t| t.symbol))
            .collect()
    }

    /// Returns true if the NFA accepts exactly `word`, by simulating every
    /// branch at once.
    pub fn is_match(&self, word: &str) -> bool {
        let mut current = self.epsilon_closure(&StateSet::from([self.start]));
        for ch in word.chars() {
            let next = self.step(&current, Symbol::Char(ch));
            if next.is_empty() {
                return false;
            }
            current = self.epsilon_closure(&next);
        }
        self.is_accepting(&current)
    }
}

impl Default for NFA {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NFA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "start: {}", self.start)?;
        writeln!(f, "accept: {}", self.accept)?;
        write!(f, "transitions:")?;
        for (id, state) in self.states.iter().enumerate() {
            for &next in &state.epsilons {
                write!(f, "\n  {} -ε-> {}", id, next)?;
            }
            for t in &state.transitions {
                write!(f, "\n  {} -'{}'-> {}", id, t.symbol, t.target)?;
            }
        }
        Ok(())
    }
}

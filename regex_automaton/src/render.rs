//! Graphviz renderings of automata, for `dot -Tpng`.
//!
//! Edge labels reuse the `Display` form of symbols, which escapes quotes and
//! backslashes.

use std::fmt;

use crate::{dfa::DFA, nfa::NFA};

/// The Graphviz form of an NFA. Epsilon edges are labelled `ε`.
#[derive(Debug)]
pub struct NfaDot<'a>(pub &'a NFA);

/// The Graphviz form of a DFA.
#[derive(Debug)]
pub struct DfaDot<'a>(pub &'a DFA);

fn header(f: &mut fmt::Formatter<'_>, name: &str, start: usize) -> fmt::Result {
    writeln!(f, "digraph {} {{", name)?;
    writeln!(f, "  rankdir=LR;")?;
    writeln!(f, "  node [shape=circle];")?;
    writeln!(f, "  _start [label=\"\", shape=point];")?;
    writeln!(f, "  _start -> {};", start)
}

impl<'a> fmt::Display for NfaDot<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nfa = self.0;
        header(f, "nfa", nfa.start)?;
        writeln!(f, "  {} [shape=doublecircle];", nfa.accept)?;
        for (id, state) in nfa.states.iter().enumerate() {
            // epsilon edges first
            for next in &state.epsilons {
                writeln!(f, "  {} -> {} [label=\"ε\"];", id, next)?;
            }
            for t in &state.transitions {
                writeln!(
                    f,
                    "  {} -> {} [label=\"{}\"];",
                    id, t.target, t.symbol
                )?;
            }
        }
        writeln!(f, "}}")
    }
}

impl<'a> fmt::Display for DfaDot<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dfa = self.0;
        header(f, "dfa", dfa.start())?;
        for id in dfa.accepting() {
            writeln!(f, "  {} [shape=doublecircle];", id)?;
        }
        for id in 0..dfa.state_len() {
            for (sym, next) in dfa.transitions(id) {
                writeln!(f, "  {} -> {} [label=\"{}\"];", id, next, sym)?;
            }
        }
        writeln!(f, "}}")
    }
}

pub fn nfa_to_dot(nfa: &NFA) -> String {
    NfaDot(nfa).to_string()
}

pub fn dfa_to_dot(dfa: &DFA) -> String {
    DfaDot(dfa).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::Symbol;

    #[test]
    fn dfa_dot() {
        let mut dfa = DFA::new();
        dfa.add_transition(0, Symbol::Char('"'), 1);
        dfa.add_transition(1, Symbol::Any, 1);
        dfa.set_accepting(1);
        let dot = dfa_to_dot(&dfa);
        assert!(dot.starts_with("digraph dfa {\n"));
        assert!(dot.contains("  _start -> 0;\n"));
        assert!(dot.contains("  1 [shape=doublecircle];\n"));
        assert!(dot.contains("  0 -> 1 [label=\"\\\"\"];\n"));
        assert!(dot.contains("  1 -> 1 [label=\".\"];\n"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn nfa_dot_marks_epsilons() {
        let mut nfa = NFA::new();
        let (a, b, c) = (nfa.add_state(), nfa.add_state(), nfa.add_state());
        nfa.connect(a, b);
        nfa.add_transition(b, Symbol::Char('x'), c);
        nfa.start = a;
        nfa.accept = c;
        let dot = nfa_to_dot(&nfa);
        assert!(dot.contains("  0 -> 1 [label=\"ε\"];\n"));
        assert!(dot.contains("  1 -> 2 [label=\"x\"];\n"));
        assert!(dot.contains("  2 [shape=doublecircle];\n"));
    }

    #[test]
    fn adapters_write_into_any_formatter() {
        let mut dfa = DFA::new();
        dfa.add_transition(0, Symbol::Char('a'), 0);
        let mut out = String::new();
        fmt::Write::write_fmt(&mut out, format_args!("{}", DfaDot(&dfa)))
            .unwrap();
        assert_eq!(out, dfa_to_dot(&dfa));
        assert_eq!(
            out,
            "digraph dfa {\n  rankdir=LR;\n  node [shape=circle];\n  \
             _start [label=\"\", shape=point];\n  _start -> 0;\n  \
             0 -> 0 [label=\"a\"];\n}\n"
        );
    }
}

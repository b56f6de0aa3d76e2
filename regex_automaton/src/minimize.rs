use std::collections::{BTreeMap, HashSet, VecDeque};
use std::fmt;

use crate::{dfa::DFA, nfa::StateId, symbol::Symbol};

/// Returns the minimal DFA recognizing the same language as `dfa`.
///
/// The result is numbered breadth first from its start state, following
/// edges in symbol order, so isomorphic automata minimize to identical
/// values.
pub fn minimize(dfa: &DFA) -> DFA {
    Minimizer::new(dfa).run()
}

/// An implementation of Hopcroft's partition refinement.
///
/// The DFA given to the minimizer may be partial. It is completed with one
/// extra dead state, `dead`, that receives every missing edge and loops on
/// every symbol. A concrete character without its own edge follows the
/// state's wildcard edge first, so only a state with neither sends it to
/// `dead`. Refinement then works on a total transition function, and the
/// block that ends up holding `dead` is the set of states that can never
/// accept.
///
/// Edges into that block are left out of the minimized DFA, except for
/// concrete characters leaving a state whose wildcard edge is live: dropping
/// those would send the character down the wildcard edge instead. They are
/// kept and lead to a single non-accepting sink.
///
/// The worklist holds `(block, symbol)` pairs. When a block splits, a pair
/// already waiting for it is replaced by both halves; otherwise only the
/// smaller half is queued.
struct Minimizer<'a> {
    dfa: &'a DFA,
    alphabet: Vec<Symbol>,
    dead: StateId,
    /// `incoming[state][symbol]` lists the predecessors of `state` on
    /// `alphabet[symbol]`.
    incoming: Vec<Vec<Vec<StateId>>>,
    /// Each block is kept sorted by state ID.
    partitions: Vec<Vec<StateId>>,
    waiting: Vec<(usize, usize)>,
    queued: HashSet<(usize, usize)>,
}

impl<'a> fmt::Debug for Minimizer<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Minimizer")
            .field("alphabet", &self.alphabet)
            .field("dead", &self.dead)
            .field("partitions", &self.partitions)
            .field("waiting", &self.waiting)
            .finish()
    }
}

impl<'a> Minimizer<'a> {
    fn new(dfa: &'a DFA) -> Minimizer<'a> {
        let alphabet: Vec<Symbol> = dfa.alphabet().into_iter().collect();
        let dead = dfa.state_len();
        let incoming = Minimizer::incoming_transitions(dfa, &alphabet, dead);
        let mut min = Minimizer {
            dfa,
            alphabet,
            dead,
            incoming,
            partitions: vec![],
            waiting: vec![],
            queued: HashSet::new(),
        };
        min.initial_partitions();
        min
    }

    fn incoming_transitions(
        dfa: &DFA,
        alphabet: &[Symbol],
        dead: StateId,
    ) -> Vec<Vec<Vec<StateId>>> {
        let mut incoming = vec![vec![vec![]; alphabet.len()]; dead + 1];
        for id in 0..=dead {
            for (k, &sym) in alphabet.iter().enumerate() {
                incoming[target(dfa, dead, id, sym)][k].push(id);
            }
        }
        incoming
    }

    fn initial_partitions(&mut self) {
        let (accepting, rejecting): (Vec<StateId>, Vec<StateId>) =
            (0..=self.dead).partition(|&id| self.dfa.is_accepting(id));
        self.partitions =
            [accepting, rejecting].into_iter().filter(|b| !b.is_empty()).collect();

        let smallest = (0..self.partitions.len())
            .min_by_key(|&b| self.partitions[b].len())
            .unwrap_or(0);
        if smallest < self.partitions.len() {
            for k in 0..self.alphabet.len() {
                self.enqueue(smallest, k);
            }
        }
    }

    fn enqueue(&mut self, block: usize, symbol: usize) {
        if self.queued.insert((block, symbol)) {
            self.waiting.push((block, symbol));
        }
    }

    fn run(mut self) -> DFA {
        let mut marked = vec![false; self.dead + 1];
        let mut predecessors: Vec<StateId> = vec![];

        while let Some((block, k)) = self.waiting.pop() {
            self.queued.remove(&(block, k));

            predecessors.clear();
            for &id in &self.partitions[block] {
                predecessors.extend_from_slice(&self.incoming[id][k]);
            }
            if predecessors.is_empty() {
                continue;
            }
            for &id in &predecessors {
                marked[id] = true;
            }

            // Halves created during this pass hold no predecessors, so they
            // never need to be split again by the same splitter.
            for b in 0..self.partitions.len() {
                let (inside, outside): (Vec<StateId>, Vec<StateId>) =
                    self.partitions[b].iter().partition(|&&id| marked[id]);
                if inside.is_empty() || outside.is_empty() {
                    continue;
                }
                trace!(
                    "split block {} on {} into {:?} and {:?}",
                    b,
                    self.alphabet[k],
                    inside,
                    outside,
                );
                let (small_is_inside, new) =
                    (inside.len() <= outside.len(), self.partitions.len());
                self.partitions[b] = inside;
                self.partitions.push(outside);
                for sym in 0..self.alphabet.len() {
                    if self.queued.contains(&(b, sym)) {
                        self.enqueue(new, sym);
                    } else if small_is_inside {
                        self.enqueue(b, sym);
                    } else {
                        self.enqueue(new, sym);
                    }
                }
            }

            for &id in &predecessors {
                marked[id] = false;
            }
        }
        self.quotient()
    }

    /// Builds the DFA whose states are the final blocks.
    fn quotient(&self) -> DFA {
        let mut block_of = vec![0; self.dead + 1];
        for (b, block) in self.partitions.iter().enumerate() {
            for &id in block {
                block_of[id] = b;
            }
        }
        let dead_block = block_of[self.dead];

        // Every state of a block has the same transitions up to blocks, so
        // the first one speaks for all of them. It is never `dead`, which
        // has the largest ID.
        let mut edges: Vec<BTreeMap<Symbol, usize>> =
            vec![BTreeMap::new(); self.partitions.len()];
        for (b, block) in self.partitions.iter().enumerate() {
            if b == dead_block {
                continue;
            }
            let id = block[0];
            let next_block = |sym| block_of[target(self.dfa, self.dead, id, sym)];
            let wildcard_is_live = next_block(Symbol::Any) != dead_block;
            for &sym in &self.alphabet {
                let to = next_block(sym);
                if to != dead_block || (wildcard_is_live && !sym.is_any()) {
                    edges[b].insert(sym, to);
                }
            }
        }

        let mut min = DFA::new();
        let mut new_ids: Vec<Option<StateId>> = vec![None; self.partitions.len()];
        let start_block = block_of[self.dfa.start()];
        new_ids[start_block] = Some(min.start());
        let mut queue = VecDeque::from([(start_block, min.start())]);
        while let Some((b, from)) = queue.pop_front() {
            if self.dfa.is_accepting(self.partitions[b][0]) {
                min.set_accepting(from);
            }
            for (&sym, &next_block) in &edges[b] {
                let to = match new_ids[next_block] {
                    Some(to) => to,
                    None => {
                        let to = min.add_state();
                        new_ids[next_block] = Some(to);
                        queue.push_back((next_block, to));
                        to
                    }
                };
                min.add_transition(from, sym, to);
            }
        }
        debug!(
            "hopcroft minimization: {} DFA states -> {} states",
            self.dfa.state_len(),
            min.state_len(),
        );
        min
    }
}

/// Where `sym` leads from `id` once the DFA is completed with `dead`.
fn target(dfa: &DFA, dead: StateId, id: StateId, sym: Symbol) -> StateId {
    if id == dead {
        return dead;
    }
    let wildcard = || match sym {
        Symbol::Char(_) => dfa.transition(id, Symbol::Any),
        Symbol::Any => None,
    };
    dfa.transition(id, sym).or_else(wildcard).unwrap_or(dead)
}

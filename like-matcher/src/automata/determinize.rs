use std::{collections::HashMap, rc::Rc};

use crate::automata::{
    nfa::{Nfa, StateId, Transition},
    sparse::SparseSet,
};

/// Id of the absorbing dead state every missing transition routes to.
pub(crate) const DEAD: usize = 0;

/// A deterministic automaton over the full 256-byte alphabet.
///
/// States sit in discovery order: the dead state is pinned at [`DEAD`],
/// the start state is the first one discovered after it. Edges are stored
/// sparsely; a byte without an edge goes to the dead state.
pub(crate) struct Dfa {
    states: Vec<State>,
    start: usize,
}

pub(crate) struct State {
    pub(crate) edges: Vec<(u8, usize)>,
    pub(crate) is_match: bool,
}

impl Dfa {
    pub(crate) fn len(&self) -> usize {
        self.states.len()
    }

    pub(crate) fn start(&self) -> usize {
        self.start
    }

    pub(crate) fn states(&self) -> &[State] {
        &self.states
    }
}

/// Convert `nfa` into an equivalent DFA by powerset construction.
pub(crate) fn determinize(nfa: &Nfa) -> Dfa {
    Determinizer::new(nfa).build()
}

struct Determinizer<'a> {
    nfa: &'a Nfa,
    dfa: Dfa,
    /// The ordered NFA-state set each DFA state stands for, parallel to
    /// `dfa.states`. Canonical (sorted) so subset-equivalent states merge.
    builder_states: Vec<Rc<Vec<StateId>>>,
    /// Already-built DFA states, looked up by their NFA-state set.
    cache: HashMap<Rc<Vec<StateId>>, usize>,
    /// Scratch stack for ε-closure traversal.
    stack: Vec<StateId>,
}

impl<'a> Determinizer<'a> {
    fn new(nfa: &'a Nfa) -> Determinizer<'a> {
        let dead = Rc::new(Vec::new());
        let mut cache = HashMap::new();
        cache.insert(Rc::clone(&dead), DEAD);

        Determinizer {
            nfa,
            dfa: Dfa {
                states: vec![State { edges: Vec::new(), is_match: false }],
                start: DEAD,
            },
            builder_states: vec![dead],
            cache,
            stack: Vec::new(),
        }
    }

    fn build(mut self) -> Dfa {
        let nfa = self.nfa;
        let mut closure = SparseSet::new(nfa.len());

        self.epsilon_closure(nfa.start(), &mut closure);
        let (start, _) = self.state_id(&closure);
        self.dfa.start = start;

        let mut uncompiled = vec![start];
        while let Some(id) = uncompiled.pop() {
            let set = Rc::clone(&self.builder_states[id]);
            for byte in 0..=255u8 {
                closure.clear();
                for &nfa_id in set.iter() {
                    for t in nfa.transitions(nfa_id) {
                        if let Some(target) = t.next_on(byte) {
                            self.epsilon_closure(target, &mut closure);
                        }
                    }
                }
                if closure.is_empty() {
                    continue;
                }
                let (next_id, is_new) = self.state_id(&closure);
                self.dfa.states[id].edges.push((byte, next_id));
                if is_new {
                    uncompiled.push(next_id);
                }
            }
        }
        self.dfa
    }

    /// Insert every state reachable from `from` through ε-transitions
    /// (including `from` itself) into `set`.
    fn epsilon_closure(&mut self, from: StateId, set: &mut SparseSet) {
        let nfa = self.nfa;
        self.stack.push(from);
        while let Some(id) = self.stack.pop() {
            if !set.insert(id) {
                continue;
            }
            for t in nfa.transitions(id) {
                if let Transition::Epsilon(next) = *t {
                    self.stack.push(next);
                }
            }
        }
    }

    /// The DFA state for the given NFA-state set, allocating a fresh one
    /// on a cache miss. The second value reports whether it is new.
    fn state_id(&mut self, set: &SparseSet) -> (usize, bool) {
        let mut key: Vec<StateId> = set.iter().collect();
        key.sort_unstable();
        if let Some(&id) = self.cache.get(&key) {
            return (id, false);
        }

        let id = self.dfa.states.len();
        self.dfa.states.push(State {
            edges: Vec::new(),
            is_match: set.contains(self.nfa.accept()),
        });
        let key = Rc::new(key);
        self.builder_states.push(Rc::clone(&key));
        self.cache.insert(key, id);
        (id, true)
    }
}

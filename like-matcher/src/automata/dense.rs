use crate::automata::determinize::Dfa;

/// A DFA flattened into a row-major `N × 256` transition table.
///
/// Each cell holds the target state's *row base* (`id * 256`) rather than
/// its id, so the scan loop's lookup result is directly the next lookup's
/// row base. The dead state's row base is 0 and row 0 is all zeros, so the
/// dead state absorbs. The accept bitmap is indexed by `row >> 8`.
pub(crate) struct DenseDfa {
    table: Vec<u32>,
    accept: Vec<bool>,
    start: u32,
    /// Whether the automaton must consume the whole region, or may stop at
    /// the first accepting state.
    exact: bool,
}

impl DenseDfa {
    pub(crate) fn from_dfa(dfa: &Dfa, exact: bool) -> DenseDfa {
        let mut table = vec![0u32; dfa.len() * 256];
        let mut accept = vec![false; dfa.len()];
        for (id, state) in dfa.states().iter().enumerate() {
            accept[id] = state.is_match;
            for &(byte, to) in &state.edges {
                table[id * 256 + byte as usize] = (to * 256) as u32;
            }
        }
        DenseDfa { table, accept, start: (dfa.start() * 256) as u32, exact }
    }

    /// Run the automaton over `region`.
    pub(crate) fn matches(&self, region: &[u8]) -> bool {
        let mut row = self.start as usize;
        if self.exact {
            for &b in region {
                row = self.table[row + b as usize] as usize;
                if row == 0 {
                    return false;
                }
            }
            self.accept[row >> 8]
        } else {
            if self.accept[row >> 8] {
                return true;
            }
            for &b in region {
                row = self.table[row + b as usize] as usize;
                if row == 0 {
                    return false;
                }
                if self.accept[row >> 8] {
                    return true;
                }
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        automata::{determinize::determinize, nfa::Nfa},
        syntax::Segment,
    };

    fn lower(segments: &[Segment], exact: bool) -> DenseDfa {
        DenseDfa::from_dfa(&determinize(&Nfa::build(segments)), exact)
    }

    #[test]
    fn exact_literal() {
        let dfa = lower(&[Segment::Literal(b"abc".to_vec())], true);
        assert!(dfa.matches(b"abc"));
        assert!(dfa.matches(b"ab") == false);
        assert!(dfa.matches(b"abcd") == false);
        assert!(dfa.matches(b"xbc") == false);
    }

    #[test]
    fn exact_empty_region() {
        let dfa = lower(&[], true);
        assert!(dfa.matches(b""));
        assert!(dfa.matches(b"a") == false);
    }

    #[test]
    fn stop_on_accept() {
        // "x" followed by an optional codepoint, scanned in stop-on-accept
        // mode: anything starting with "x" matches.
        let dfa = lower(
            &[
                Segment::Literal(b"x".to_vec()),
                Segment::Any { min: 0, unbounded: false },
            ],
            false,
        );
        assert!(dfa.matches(b"x"));
        assert!(dfa.matches(b"xyzzy"));
        assert!(dfa.matches(b"yx") == false);
    }

    #[test]
    fn stop_on_accept_empty_middle() {
        let dfa = lower(&[Segment::Any { min: 0, unbounded: false }], false);
        assert!(dfa.matches(b""));
        assert!(dfa.matches(b"anything at all"));
    }

    #[test]
    fn codepoint_boundaries() {
        let dfa = lower(&[Segment::Any { min: 1, unbounded: false }], true);
        assert!(dfa.matches("猫".as_bytes()));
        assert!(dfa.matches("🦀".as_bytes()));
        assert!(dfa.matches("ab".as_bytes()) == false);
        // Truncated multi-byte sequences dead-end.
        assert!(dfa.matches(&"猫".as_bytes()[..2]) == false);
    }
}

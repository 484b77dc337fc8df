//! Exact language inclusion between two patterns.
//!
//! Both patterns are compiled to dense DFAs with the same settings as
//! [`Pattern`] (bytes, Unicode off) and the product automaton is walked
//! breadth-first. The first reachable state pair where the inner pattern
//! accepts at end of input and the outer one does not gives the shortest
//! string in the difference.

use super::Pattern;
use regex_automata::dfa::dense::{self, BuildError, DFA};
use regex_automata::dfa::{Automaton, StartKind};
use regex_automata::nfa::thompson;
use regex_automata::util::primitives::StateID;
use regex_automata::util::syntax;
use regex_automata::{Anchored, Input, MatchError};
use std::collections::{HashSet, VecDeque};
use thiserror::Error;

/// Caps each DFA so one pathological pattern cannot stall table loading.
const DFA_SIZE_LIMIT: usize = 10 * (1 << 20);

#[derive(Error, Debug)]
pub enum InclusionError {
    #[error("cannot build automaton: {0}")]
    Build(#[from] BuildError),

    #[error("automaton has no anchored start state: {0}")]
    Start(#[from] MatchError),
}

/// Shortest input `inner` accepts and `outer` rejects, or `None` when every
/// input of `inner` is also an input of `outer`.
pub fn counterexample(inner: &Pattern, outer: &Pattern) -> Result<Option<Vec<u8>>, InclusionError> {
    let inner = build(inner.anchored())?;
    let outer = build(outer.anchored())?;
    let start = Input::new("").anchored(Anchored::Yes);
    let inner_start = inner.start_state_forward(&start)?;
    let outer_start = outer.start_state_forward(&start)?;

    let mut seen: HashSet<(StateID, StateID)> = HashSet::new();
    let mut queue = VecDeque::new();
    seen.insert((inner_start, outer_start));
    queue.push_back((inner_start, outer_start, Vec::new()));

    while let Some((i, o, path)) = queue.pop_front() {
        if accepts(&inner, i) && !accepts(&outer, o) {
            return Ok(Some(path));
        }

        for byte in 0..=u8::MAX {
            let next_i = inner.next_state(i, byte);
            if inner.is_dead_state(next_i) {
                continue;
            }
            let next_o = outer.next_state(o, byte);
            if seen.insert((next_i, next_o)) {
                let mut next_path = path.clone();
                next_path.push(byte);
                queue.push_back((next_i, next_o, next_path));
            }
        }
    }

    Ok(None)
}

fn build(anchored: &str) -> Result<DFA<Vec<u32>>, BuildError> {
    dense::Builder::new()
        .syntax(syntax::Config::new().unicode(false).utf8(false))
        .thompson(thompson::Config::new().utf8(false))
        .configure(
            dense::Config::new()
                .start_kind(StartKind::Anchored)
                .dfa_size_limit(Some(DFA_SIZE_LIMIT)),
        )
        .build(anchored)
}

/// Whether the input consumed so far is a full match. Dense DFAs report matches
/// one transition late, so the end-of-input transition decides.
fn accepts(dfa: &DFA<Vec<u32>>, state: StateID) -> bool {
    dfa.is_match_state(dfa.next_eoi_state(state))
}

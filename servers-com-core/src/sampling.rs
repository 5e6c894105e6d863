//! Uniform sampling of partner candidates.
//!
//! [`CandidatePool`] keeps candidates in a flat vector so a draw without
//! replacement is an index pick followed by `swap_remove`. Candidate order is
//! therefore not preserved once draws begin.

use rand::Rng;

use crate::node::NodeId;

/// Index-addressable set of eligible partners for one node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CandidatePool {
    candidates: Vec<NodeId>,
}

impl CandidatePool {
    pub(crate) fn from_candidates(candidates: impl IntoIterator<Item = NodeId>) -> Self {
        Self {
            candidates: candidates.into_iter().collect(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.candidates.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Removes and returns one candidate chosen uniformly at random.
    pub(crate) fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<NodeId> {
        if self.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.candidates.len());
        Some(self.candidates.swap_remove(index))
    }

    /// Removes and returns `count` distinct candidates chosen uniformly at
    /// random, or `None` without touching the pool when fewer remain.
    pub(crate) fn draw_distinct<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        count: usize,
    ) -> Option<Vec<NodeId>> {
        if count > self.candidates.len() {
            return None;
        }
        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            let index = rng.gen_range(0..self.candidates.len());
            drawn.push(self.candidates.swap_remove(index));
        }
        Some(drawn)
    }
}

//! Candidate itineraries ordered by total time.
//!
//! Every itinerary pushed stays in the frontier for the whole search, even
//! after it has been selected, because final result selection looks at all
//! of them. Several candidates may end at the same location at once.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::domain::{Itinerary, LocationCode};

/// Ordering key for a candidate: smaller is explored first.
fn priority(itinerary: &Itinerary) -> i64 {
    itinerary.total_minutes()
}

/// Heap entry pointing at a candidate.
///
/// Ordered so that `BinaryHeap` pops the smallest priority first, and among
/// equal priorities the earliest pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    priority: i64,
    seq: usize,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default)]
pub(super) struct Frontier {
    /// All candidates, indexed by push order.
    candidates: Vec<Itinerary>,
    /// Candidate indices by the location they end at.
    by_terminal: HashMap<LocationCode, Vec<usize>>,
    /// Candidates not yet selected.
    queue: BinaryHeap<Entry>,
}

impl Frontier {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn push(&mut self, itinerary: Itinerary) {
        let seq = self.candidates.len();
        self.queue.push(Entry {
            priority: priority(&itinerary),
            seq,
        });
        self.by_terminal
            .entry(itinerary.destination().clone())
            .or_default()
            .push(seq);
        self.candidates.push(itinerary);
    }

    /// Candidates ending at `location`, in push order.
    pub(super) fn ending_at<'f>(
        &'f self,
        location: &LocationCode,
    ) -> impl Iterator<Item = &'f Itinerary> + 'f {
        self.by_terminal
            .get(location)
            .into_iter()
            .flatten()
            .map(|&i| &self.candidates[i])
    }

    /// Select the cheapest candidate whose terminal is not settled.
    ///
    /// Entries ending at a settled location are discarded on the way: the
    /// settled set only grows, so they can never be selected later.
    pub(super) fn pop_unsettled(&mut self, settled: &HashSet<LocationCode>) -> Option<&Itinerary> {
        while let Some(entry) = self.queue.pop() {
            if !settled.contains(self.candidates[entry.seq].destination()) {
                return Some(&self.candidates[entry.seq]);
            }
        }
        None
    }

    /// The cheapest candidate from `origin` to `destination`. Ties go to the
    /// earliest pushed.
    pub(super) fn best_between(
        &self,
        origin: &LocationCode,
        destination: &LocationCode,
    ) -> Option<&Itinerary> {
        self.ending_at(destination)
            .filter(|it| it.origin() == origin)
            .min_by_key(|it| priority(it))
    }

    pub(super) fn len(&self) -> usize {
        self.candidates.len()
    }
}

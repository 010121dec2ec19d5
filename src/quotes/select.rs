//! Anti-repeat random selection.
//!
//! Every pick is remembered until all candidates of some lookup have been served,
//! at which point the history is wiped and the cycle starts again. History is
//! keyed by load index and tagged with the corpus generation it belongs to.

use std::collections::HashSet;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use super::quote::Quote;

/// Quotes served since the last reset, for one corpus generation.
#[derive(Debug, Default)]
pub struct RecentlyServed {
    generation: u64,
    served: HashSet<usize>,
}

impl RecentlyServed {
    /// Drop all history and bind to `generation`.
    pub fn reset(&mut self, generation: u64) {
        self.generation = generation;
        self.served.clear();
    }

    pub fn contains(&self, index: usize) -> bool {
        self.served.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.served.len()
    }

    pub fn is_empty(&self) -> bool {
        self.served.is_empty()
    }

    /// Shuffle `candidates` and return the first one not served yet, recording it.
    ///
    /// When every candidate has already been served the history is cleared and the
    /// first shuffled candidate is taken. Picks made for an older generation than
    /// the history belongs to are served but not recorded. Returns `None` only for
    /// an empty slice.
    pub fn pick<R: Rng + ?Sized>(
        &mut self,
        generation: u64,
        mut candidates: Vec<Arc<Quote>>,
        rng: &mut R,
    ) -> Option<Arc<Quote>> {
        if candidates.is_empty() {
            return None;
        }
        candidates.shuffle(rng);

        // Candidates from a snapshot that has since been replaced
        if generation < self.generation {
            return candidates.into_iter().next();
        }
        if generation > self.generation {
            self.reset(generation);
        }

        let position = match candidates.iter().position(|q| !self.contains(q.index())) {
            Some(position) => position,
            None => {
                self.served.clear();
                0
            }
        };

        let quote = candidates.swap_remove(position);
        self.served.insert(quote.index());
        Some(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn corpus(n: usize) -> Vec<Arc<Quote>> {
        (1..=n)
            .map(|i| Arc::new(Quote::parse(&format!("Author: quote {i}"), i)))
            .collect()
    }

    #[test]
    fn empty_candidates_pick_nothing() {
        let mut recent = RecentlyServed::default();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(recent.pick(0, Vec::new(), &mut rng).is_none());
        assert!(recent.is_empty());
    }

    #[test]
    fn serves_every_candidate_before_repeating() {
        let quotes = corpus(5);
        let mut recent = RecentlyServed::default();
        let mut rng = StdRng::seed_from_u64(42);

        let mut seen = HashSet::new();
        for _ in 0..5 {
            let quote = recent.pick(0, quotes.clone(), &mut rng).unwrap();
            assert!(seen.insert(quote.index()), "quote {} repeated early", quote.index());
        }
        assert_eq!(recent.len(), 5);

        // Exhausted: history resets and holds only the new pick
        recent.pick(0, quotes.clone(), &mut rng).unwrap();
        assert_eq!(recent.len(), 1);
    }

    #[test]
    fn history_is_shared_across_candidate_sets() {
        let quotes = corpus(3);
        let mut recent = RecentlyServed::default();
        let mut rng = StdRng::seed_from_u64(1);

        let first = recent.pick(0, vec![quotes[0].clone()], &mut rng).unwrap();
        assert_eq!(first.index(), 1);

        // Quote 1 was served via another lookup, so quote 2 must come first here
        let next = recent
            .pick(0, vec![quotes[0].clone(), quotes[1].clone()], &mut rng)
            .unwrap();
        assert_eq!(next.index(), 2);
    }

    #[test]
    fn new_generation_discards_history() {
        let quotes = corpus(2);
        let mut recent = RecentlyServed::default();
        let mut rng = StdRng::seed_from_u64(3);

        recent.pick(1, quotes.clone(), &mut rng).unwrap();
        recent.pick(1, quotes.clone(), &mut rng).unwrap();
        assert_eq!(recent.len(), 2);

        recent.pick(2, quotes, &mut rng).unwrap();
        assert_eq!(recent.len(), 1);
    }

    #[test]
    fn stale_generation_is_not_recorded() {
        let quotes = corpus(3);
        let mut recent = RecentlyServed::default();
        let mut rng = StdRng::seed_from_u64(9);

        recent.reset(4);
        assert!(recent.pick(3, quotes.clone(), &mut rng).is_some());
        assert!(recent.is_empty());

        recent.pick(4, quotes, &mut rng).unwrap();
        assert_eq!(recent.len(), 1);
    }
}

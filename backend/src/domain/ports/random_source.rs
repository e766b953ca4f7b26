//! Injectable randomness for reviewer selection.
//!
//! Selection must be unpredictable to anyone who can observe the candidate
//! pool, so production wires an entropy-seeded source; tests inject a
//! scripted sequence. Nothing in the domain reaches for a hidden
//! process-wide generator.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Port for uniform random draws.
pub trait RandomSource: Send + Sync {
    /// Uniform draw from `[0, bound)`.
    ///
    /// `bound` must be positive; callers guard against empty pools before
    /// drawing.
    fn pick_index(&self, bound: usize) -> usize;
}

/// Scripted [`RandomSource`] for tests.
///
/// Replays the configured draws in order (wrapping around when exhausted),
/// reduced modulo the requested bound so a script stays valid for any pool
/// size.
#[derive(Debug, Default)]
pub struct SequenceRandomSource {
    draws: Vec<usize>,
    cursor: AtomicUsize,
}

impl SequenceRandomSource {
    /// Create a source replaying `draws` in order.
    pub fn new(draws: impl Into<Vec<usize>>) -> Self {
        Self {
            draws: draws.into(),
            cursor: AtomicUsize::new(0),
        }
    }
}

impl RandomSource for SequenceRandomSource {
    fn pick_index(&self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        let position = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.draws
            .get(position % self.draws.len().max(1))
            .copied()
            .unwrap_or(0)
            % bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_replays_draws_in_order() {
        let source = SequenceRandomSource::new([2, 0, 1]);
        assert_eq!(source.pick_index(3), 2);
        assert_eq!(source.pick_index(3), 0);
        assert_eq!(source.pick_index(3), 1);
        // Wraps around once exhausted.
        assert_eq!(source.pick_index(3), 2);
    }

    #[test]
    fn draws_are_reduced_modulo_bound() {
        let source = SequenceRandomSource::new([5]);
        assert_eq!(source.pick_index(2), 1);
    }

    #[test]
    fn empty_script_draws_zero() {
        let source = SequenceRandomSource::default();
        assert_eq!(source.pick_index(4), 0);
    }
}

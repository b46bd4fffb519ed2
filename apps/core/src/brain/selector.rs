//! Uniform random choice over a reply pool.

use super::replies::ReplyCandidate;
use crate::models::OutboundMessage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Picks candidates uniformly from a pool.
///
/// The generator is injected: [`ReplySelector::from_entropy`] for production,
/// [`ReplySelector::seeded`] when a test needs a reproducible sequence.
#[derive(Debug)]
pub struct ReplySelector {
    rng: Mutex<StdRng>,
}

impl Default for ReplySelector {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl ReplySelector {
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Draws one candidate, `None` only for an empty pool.
    pub fn select<'a>(&self, pool: &'a [ReplyCandidate]) -> Option<&'a ReplyCandidate> {
        if pool.is_empty() {
            return None;
        }
        let index = self.draw_index(pool.len());
        pool.get(index)
    }

    /// Draws one candidate and turns it into a reply batch (empty for `Silent`).
    pub fn select_reply(&self, pool: &[ReplyCandidate]) -> Vec<OutboundMessage> {
        self.select(pool)
            .and_then(ReplyCandidate::to_message)
            .into_iter()
            .collect()
    }

    /// Uniform index in `0..len`.
    pub fn draw_index(&self, len: usize) -> usize {
        // A poisoned lock only means another draw panicked; the generator state is still usable.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..len)
    }

    /// Uniform integer in `min..=max`.
    pub fn draw_between(&self, min: u64, max: u64) -> u64 {
        if max <= min {
            return min;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(min..=max)
    }
}

use memfuzz_core::traits::DrawSource;

/// Replays a fixed list of words.
///
/// Without cycling the source is exhausted after the last word, which makes the engine return
/// `ExhaustedRandomSource`. This is handy to reproduce a recorded pass or to drive the engine
/// through one specific path.
#[derive(Debug, Clone, Default)]
pub struct ReplayDraws {
    words: Vec<u32>,
    next: usize,
    cycle: bool,
}

impl ReplayDraws {
    /// Replays `words` once.
    #[must_use]
    pub fn new(words: Vec<u32>) -> Self {
        Self {
            words,
            next: 0,
            cycle: false,
        }
    }

    /// Replays `words` over and over. An empty list is exhausted right away.
    #[must_use]
    pub fn cycling(words: Vec<u32>) -> Self {
        Self {
            cycle: true,
            ..Self::new(words)
        }
    }

    /// Takes up to `count` words from `source` so they can be replayed later. Stops early if the
    /// source runs dry.
    pub fn record<S: DrawSource + ?Sized>(source: &mut S, count: usize) -> Self {
        let words: Vec<u32> = std::iter::from_fn(|| source.draw()).take(count).collect();
        if words.len() < count {
            tracing::warn!("Recorded only {} of {count} words", words.len());
        }
        Self::new(words)
    }

    /// Words that are left before the source is exhausted, `None` if it cycles.
    #[must_use]
    pub fn remaining(&self) -> Option<usize> {
        if self.cycle && !self.words.is_empty() {
            return None;
        }
        Some(self.words.len() - self.next)
    }

    /// Rewinds to the first word.
    pub fn rewind(&mut self) {
        self.next = 0;
    }

    /// The full script
    #[must_use]
    pub fn words(&self) -> &[u32] {
        &self.words
    }
}

impl DrawSource for ReplayDraws {
    fn draw(&mut self) -> Option<u32> {
        if self.next >= self.words.len() && self.cycle {
            self.next = 0;
        }
        let word = self.words.get(self.next).copied()?;
        self.next += 1;
        Some(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memfuzz_core::error::MemFuzzError;
    use memfuzz_core::mutator::fuzz;
    use memfuzz_core::POOL_CAPACITY;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    #[test]
    fn test_replay_once() {
        let mut draws = ReplayDraws::new(vec![1, 2, 3]);
        assert_eq!(draws.remaining(), Some(3));
        assert_eq!(draws.draw(), Some(1));
        assert_eq!(draws.draw(), Some(2));
        assert_eq!(draws.draw(), Some(3));
        assert_eq!(draws.draw(), None);
        assert_eq!(draws.remaining(), Some(0));
        draws.rewind();
        assert_eq!(draws.draw(), Some(1));
    }

    #[test]
    fn test_replay_cycling() {
        let mut draws = ReplayDraws::cycling(vec![7, 8]);
        let drawn: Vec<u32> = (0..5).filter_map(|_| draws.draw()).collect();
        assert_eq!(drawn, vec![7, 8, 7, 8, 7]);
        assert_eq!(draws.remaining(), None);

        let mut empty = ReplayDraws::cycling(vec![]);
        assert_eq!(empty.draw(), None);
    }

    #[test]
    fn test_recorded_pass_replays_identically() {
        let mut rng = ChaChaRng::seed_from_u64(99);
        let mut recorded = ReplayDraws::record(&mut rng, 40 * POOL_CAPACITY);
        assert_eq!(recorded.words().len(), 40 * POOL_CAPACITY);

        let mut original = vec![0x5au8; 64];
        let mut replayed = original.clone();
        let report = fuzz(&mut original, 30, &mut ChaChaRng::seed_from_u64(99)).expect("");
        let replay_report = fuzz(&mut replayed, 30, &mut recorded).expect("");
        assert_eq!(original, replayed);
        assert_eq!(report, replay_report);
        // entry pool plus one pool per applied mutation
        assert_eq!(
            recorded.remaining(),
            Some((40 - 1 - report.mutations.len()) * POOL_CAPACITY)
        );
    }

    #[test]
    fn test_short_recording_exhausts() {
        let mut short = ReplayDraws::record(&mut ReplayDraws::new(vec![0; 20]), 100);
        assert_eq!(short.words().len(), 20);

        let mut buf = vec![0u8; 32];
        let err = fuzz(&mut buf, 10, &mut short).expect_err("");
        assert!(matches!(
            err,
            MemFuzzError::ExhaustedRandomSource {
                drawn: 4,
                required: 16
            }
        ));
    }
}

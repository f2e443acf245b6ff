use crate::error::{MemFuzzError, MemFuzzResult};
use crate::traits::DrawSource;

/// Number of words drawn into a pool, whatever the step ends up using.
pub const POOL_CAPACITY: usize = 16;

/// A fixed block of draws consumed strictly in order.
///
/// Filling always takes exactly `POOL_CAPACITY` words from the source, so the position in the
/// source stream only depends on how many pools were filled and never on which branches the
/// engine took while consuming one.
#[derive(Debug)]
pub(crate) struct DrawPool {
    words: [u32; POOL_CAPACITY],
    next: usize,
}

impl DrawPool {
    pub(crate) fn fill<S: DrawSource + ?Sized>(source: &mut S) -> MemFuzzResult<Self> {
        let mut words = [0; POOL_CAPACITY];
        for (drawn, word) in words.iter_mut().enumerate() {
            *word = source.draw().ok_or(MemFuzzError::ExhaustedRandomSource {
                drawn,
                required: POOL_CAPACITY,
            })?;
        }
        Ok(Self { words, next: 0 })
    }

    pub(crate) fn take(&mut self) -> MemFuzzResult<u32> {
        let word = *self
            .words
            .get(self.next)
            .ok_or(MemFuzzError::DrawPoolOverrun {
                capacity: POOL_CAPACITY,
            })?;
        self.next += 1;
        Ok(word)
    }

    /// Takes one word and keeps only its low bit.
    pub(crate) fn take_flag(&mut self) -> MemFuzzResult<bool> {
        Ok(self.take()? & 1 == 1)
    }

    pub(crate) fn consumed(&self) -> usize {
        self.next
    }
}

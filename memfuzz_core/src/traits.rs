use rand::RngCore;

/// Source of the 32-bit words the mutation engine consumes.
///
/// Every `rand::RngCore` is a source that never runs dry. Finite sources (a recorded stream, a
/// script in a test) return `None` once they are exhausted, which the engine reports as
/// `MemFuzzError::ExhaustedRandomSource`.
pub trait DrawSource {
    /// Returns the next word or `None` if the source is exhausted.
    fn draw(&mut self) -> Option<u32>;
}

impl<R: RngCore + ?Sized> DrawSource for R {
    fn draw(&mut self) -> Option<u32> {
        Some(self.next_u32())
    }
}

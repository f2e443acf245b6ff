//! The additive feedback generator behind glibc's `random()` (and `rand()`, which forwards to
//! it) in its default `TYPE_3` configuration: 31 words of state, taps at 3 and 31.

use rand::RngCore;

const DEGREE: usize = 31;
const SEPARATION: usize = 3;
/// The state window plus the three words the first outputs read ahead
const WINDOW: usize = DEGREE + SEPARATION;
/// glibc throws away the first 310 outputs after seeding
const DISCARD: usize = 310;

/// glibc compatible `rand()`.
///
/// `GlibcRand::srand(1).rand()` returns `1804289383` exactly like the first `rand()` of a C
/// program does. Every output is 31 bits wide, so the top bit of each draw is always clear.
#[derive(Debug, Clone)]
pub struct GlibcRand {
    state: [u32; WINDOW],
    pos: usize,
}

impl GlibcRand {
    /// Seeds the generator like `srand(seed)`; a seed of 0 is treated as 1.
    #[must_use]
    pub fn srand(seed: u32) -> Self {
        let seed = if seed == 0 { 1 } else { seed };
        let mut state = [0u32; WINDOW];
        state[0] = seed;

        // Schrage's method for 16807 * word mod (2^31 - 1), on the seed read as a signed int
        #[allow(clippy::cast_possible_wrap)]
        let mut word = i64::from(seed as i32);
        for slot in state.iter_mut().take(DEGREE).skip(1) {
            let hi = word / 127_773;
            let lo = word % 127_773;
            word = 16_807 * lo - 2_836 * hi;
            if word < 0 {
                word += 2_147_483_647;
            }
            *slot = u32::try_from(word).unwrap_or_default();
        }
        for i in DEGREE..WINDOW {
            state[i] = state[i - DEGREE];
        }

        let mut rng = Self { state, pos: 0 };
        for _ in 0..DISCARD {
            rng.step();
        }
        rng
    }

    /// Seeds from a 64-bit value by keeping its low 32 bits, like passing it to `srand` in C.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_u64(seed: u64) -> Self {
        Self::srand(seed as u32)
    }

    /// Next 31-bit value.
    pub fn rand(&mut self) -> u32 {
        self.step() >> 1
    }

    fn step(&mut self) -> u32 {
        // `pos` is the slot of the word that leaves the window, i.e. r[i - 34]
        let value = self.state[(self.pos + SEPARATION) % WINDOW]
            .wrapping_add(self.state[(self.pos + DEGREE) % WINDOW]);
        self.state[self.pos] = value;
        self.pos = (self.pos + 1) % WINDOW;
        value
    }
}

impl RngCore for GlibcRand {
    fn next_u32(&mut self) -> u32 {
        self.rand()
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.rand()) << 32) | u64::from(self.rand())
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.rand().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

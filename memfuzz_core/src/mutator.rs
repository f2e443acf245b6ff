use crate::config::FuzzConfig;
use crate::dangerous_numbers::DangerousNumber;
use crate::error::{MemFuzzError, MemFuzzResult};
use crate::pool::DrawPool;
use crate::traits::DrawSource;
use crate::types::{Mutation, MutationReport, ValueSource};
use crate::width::Width;

/// The start offset is optionally rounded down to this boundary.
const WORD_ALIGN: usize = 4;

#[derive(Debug)]
/// Owns a draw source and a config so repeated passes continue the same random stream.
///
/// ```rs
/// let mut mutator = Mutator::new(ChaChaRng::seed_from_u64(1337));
/// let mut snapshot = std::fs::read("rom.bin")?;
/// let report = mutator.fuzz(&mut snapshot, 32)?;
/// ```
pub struct Mutator<S: DrawSource> {
    source: S,
    config: FuzzConfig,
}

impl<S: DrawSource> Mutator<S> {
    /// creates a new Mutator with the default config
    pub fn new(source: S) -> Mutator<S> {
        Self::with_config(source, FuzzConfig::default())
    }

    /// creates a new Mutator
    pub fn with_config(source: S, config: FuzzConfig) -> Mutator<S> {
        Mutator { source, config }
    }

    /// Mutates `buf` in place, see [`fuzz_with_config`].
    /// # Errors
    pub fn fuzz(&mut self, buf: &mut [u8], max_changes: usize) -> MemFuzzResult<MutationReport> {
        fuzz_with_config(buf, max_changes, &mut self.source, &self.config)
    }

    /// Returns the config used for every pass
    pub fn config(&self) -> &FuzzConfig {
        &self.config
    }

    /// Gives access to the draw source, e.g. to skip ahead in a recorded stream.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Returns the draw source
    pub fn into_inner(self) -> S {
        self.source
    }
}

/// Mutates `buf` in place with the default config, see [`fuzz_with_config`].
/// # Errors
pub fn fuzz<S: DrawSource + ?Sized>(
    buf: &mut [u8],
    max_changes: usize,
    source: &mut S,
) -> MemFuzzResult<MutationReport> {
    fuzz_with_config(buf, max_changes, source, &FuzzConfig::default())
}

/// Overwrites values in `buf` with dangerous numbers or random bits.
///
/// `max_changes` is reduced modulo the buffer length, so the pass applies at most
/// `buf.len() - 1` mutations. Starting at a random offset, each step picks a width, narrows it
/// until the write fits the remaining bytes and is aligned to its own size (relative to the
/// buffer start), then writes either a catalog entry or random bits.
///
/// Every step draws exactly one pool of words from `source`, which keeps a pass reproducible
/// for a given seed independent of the branches taken.
///
/// Mutation is not transactional: if the source runs dry halfway, the writes done so far stay
/// in the buffer.
///
/// # Errors
/// - `InvalidBuffer` if `buf` is empty
/// - `ExhaustedRandomSource` if `source` stops yielding words
pub fn fuzz_with_config<S: DrawSource + ?Sized>(
    buf: &mut [u8],
    max_changes: usize,
    source: &mut S,
    config: &FuzzConfig,
) -> MemFuzzResult<MutationReport> {
    let len = buf.len();
    if len == 0 {
        return Err(MemFuzzError::InvalidBuffer);
    }
    let mut budget = max_changes % len;

    let mut pool = DrawPool::fill(source)?;
    let mut offset = pool.take()? as usize % len;
    let rounded = pool.take_flag()?;
    if rounded {
        let from = offset;
        offset -= offset % WORD_ALIGN;
        tracing::debug!("Rounding offset down from {from} to {offset}");
    }
    tracing::debug!("Buffer is {len} bytes, starting at offset {offset} with {budget} changes");

    let mut report = MutationReport {
        buffer_len: len,
        start_offset: offset,
        rounded,
        budget,
        mutations: Vec::new(),
    };

    let mut cursor = offset;
    while cursor < len && budget > 0 {
        let mut pool = DrawPool::fill(source)?;
        let r = pool.take()?;
        let s = pool.take()?;
        let selected = config.distribution.decide(pool.take()?, pool.take()?);

        // a single byte always fits, so this only ends the loop if the cursor is past the end
        let Some(width) = selected.narrow_to_fit(cursor, len - cursor) else {
            break;
        };

        let (bits, value_source) = if s & 1 == 1 {
            random_bits(width, r, &mut pool)?
        } else {
            catalog_bits(width, r)
        };
        config.byte_order.store(&mut buf[cursor..], width, bits);

        let mutation = Mutation {
            offset: cursor,
            width,
            selected,
            bits,
            source: value_source,
        };
        tracing::trace!("{mutation:?} ({} draws used)", pool.consumed());
        report.mutations.push(mutation);

        cursor += width.size();
        budget -= 1;
    }

    tracing::debug!(
        "Applied {} mutations covering {} bytes",
        report.mutations.len(),
        report.bytes_written()
    );
    Ok(report)
}

/// Random bits for `width` taken from `r`. The next pool word decides if the sign bit is forced;
/// quads take one more word for their low half.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn random_bits(width: Width, r: u32, pool: &mut DrawPool) -> MemFuzzResult<(u64, ValueSource)> {
    let high_bit = pool.take_flag()?;
    let sign = |bits: u32| if high_bit { 1u64 << (bits - 1) } else { 0 };
    let bits = match width {
        Width::Byte => u64::from(r as u8) | sign(8),
        Width::Half => u64::from(r as u16) | sign(16),
        Width::Word => u64::from(r) | sign(32),
        Width::Quad => (u64::from(r) << 32) | u64::from(pool.take()?) | sign(64),
        Width::Float => {
            let int = r | if high_bit { 0x8000_0000 } else { 0 };
            u64::from((int as f32).to_bits())
        }
    };
    Ok((bits, ValueSource::Random { high_bit }))
}

fn catalog_bits(width: Width, r: u32) -> (u64, ValueSource) {
    let (index, bits) = match width {
        Width::Byte => {
            let (index, value) = u8::dangerous_number(r);
            (index, u64::from(value))
        }
        Width::Half => {
            let (index, value) = u16::dangerous_number(r);
            (index, u64::from(value))
        }
        Width::Word | Width::Float => {
            let (index, value) = u32::dangerous_number(r);
            (index, u64::from(value))
        }
        Width::Quad => u64::dangerous_number(r),
    };
    (bits, ValueSource::Catalog { index })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ByteOrder;
    use crate::width::WidthDistribution;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    const BYTE: (u32, u32) = (0, 0);
    const WORD: (u32, u32) = (u32::MAX, 0);
    const QUAD: (u32, u32) = (u32::MAX, u32::MAX);

    /// Replays a fixed list of words.
    struct Script {
        words: Vec<u32>,
        next: usize,
    }

    impl Script {
        fn new(pools: Vec<Vec<u32>>) -> Self {
            Self {
                words: pools.concat(),
                next: 0,
            }
        }
    }

    impl DrawSource for Script {
        fn draw(&mut self) -> Option<u32> {
            let word = self.words.get(self.next).copied()?;
            self.next += 1;
            Some(word)
        }
    }

    fn entry(offset: u32, round: bool) -> Vec<u32> {
        let mut pool = vec![0; 16];
        pool[0] = offset;
        pool[1] = u32::from(round);
        pool
    }

    fn step(r: u32, s: u32, decide: (u32, u32), extra: &[u32]) -> Vec<u32> {
        let mut pool = vec![0; 16];
        pool[0] = r;
        pool[1] = s;
        pool[2] = decide.0;
        pool[3] = decide.1;
        pool[4..4 + extra.len()].copy_from_slice(extra);
        pool
    }

    #[allow(clippy::cast_possible_truncation)]
    fn in_catalog(mutation: &Mutation) -> bool {
        match mutation.width {
            Width::Byte => u8::is_dangerous_number(mutation.bits as u8),
            Width::Half => u16::is_dangerous_number(mutation.bits as u16),
            Width::Word | Width::Float => u32::is_dangerous_number(mutation.bits as u32),
            Width::Quad => u64::is_dangerous_number(mutation.bits),
        }
    }

    #[test]
    fn test_empty_buffer_is_rejected() {
        let mut buf: [u8; 0] = [];
        let mut rng = ChaChaRng::seed_from_u64(1);
        assert!(matches!(
            fuzz(&mut buf, 3, &mut rng),
            Err(MemFuzzError::InvalidBuffer)
        ));
    }

    #[test]
    fn test_single_byte_budget_is_zero() {
        for seed in 0..50 {
            let mut buf = [0x41u8];
            let mut rng = ChaChaRng::seed_from_u64(seed);
            let report = fuzz(&mut buf, 5, &mut rng).expect("");
            assert_eq!(report.budget, 0);
            assert!(report.mutations.is_empty());
            assert_eq!(buf, [0x41]);
        }
    }

    #[test]
    fn test_unaligned_cursor_falls_back_to_byte() {
        let mut buf = [0u8; 4];
        let mut script = Script::new(vec![entry(3, false), step(0x1234, 1, QUAD, &[1])]);
        let report = fuzz(&mut buf, 1, &mut script).expect("");
        assert_eq!(report.start_offset, 3);
        assert_eq!(report.mutations.len(), 1);
        let mutation = report.mutations[0];
        assert_eq!(mutation.selected, Width::Quad);
        assert_eq!(mutation.width, Width::Byte);
        assert_eq!(mutation.source, ValueSource::Random { high_bit: true });
        assert_eq!(buf, [0, 0, 0, 0xb4]);
    }

    #[test]
    fn test_offset_rounded_down() {
        let mut buf = [0u8; 16];
        let mut script = Script::new(vec![entry(7, true), step(5, 0, WORD, &[])]);
        let report = fuzz(&mut buf, 1, &mut script).expect("");
        assert!(report.rounded);
        assert_eq!(report.start_offset, 4);
        assert_eq!(
            report.mutations[0].source,
            ValueSource::Catalog { index: 5 }
        );
        // word table entry 5 is 0x100
        assert_eq!(buf[4..8], [0x00, 0x01, 0x00, 0x00]);
        assert!(buf[..4].iter().chain(&buf[8..]).all(|b| *b == 0));
    }

    #[test]
    fn test_byte_bucket_scenario() {
        let mut pools = vec![entry(0, false)];
        let mut expected = vec![];
        for i in 0..15u32 {
            let r = i * 37 + 3;
            let high = u32::from(i % 3 == 0);
            pools.push(step(r, i, BYTE, &[high]));
            #[allow(clippy::cast_possible_truncation)]
            let value = if i & 1 == 1 {
                r as u8 | if high == 1 { 0x80 } else { 0 }
            } else {
                u8::dangerous_number(r).1
            };
            expected.push(value);
        }
        expected.push(0);

        let mut buf = [0u8; 16];
        let mut script = Script::new(pools);
        // 16 % 16 would leave no budget at all
        let report = fuzz(&mut buf, 15, &mut script).expect("");
        assert_eq!(report.mutations.len(), 15);
        assert!(report.mutations.iter().all(|m| m.width == Width::Byte));
        assert_eq!(buf.to_vec(), expected);
    }

    #[test]
    fn test_random_quad() {
        let mut buf = [0u8; 16];
        let mut script = Script::new(vec![
            entry(0, false),
            step(0x0102_0304, 1, QUAD, &[1, 0x0506_0708]),
        ]);
        let report = fuzz(&mut buf, 1, &mut script).expect("");
        assert_eq!(report.mutations[0].bits, 0x8102_0304_0506_0708);
        assert_eq!(buf[..8], [0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x81]);
        assert!(buf[8..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_catalog_quad_big_endian() {
        let config = FuzzConfig {
            byte_order: ByteOrder::Big,
            ..FuzzConfig::default()
        };
        let mut buf = [0u8; 8];
        let mut script = Script::new(vec![entry(0, false), step(203, 0, QUAD, &[])]);
        let report = fuzz_with_config(&mut buf, 1, &mut script, &config).expect("");
        assert_eq!(report.mutations[0].bits, 0x8000_0000_0000_0000);
        assert_eq!(buf, [0x80, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_float_uses_budget() {
        let config = FuzzConfig {
            distribution: WidthDistribution::LinearWithFloat,
            ..FuzzConfig::default()
        };
        let mut buf = [0u8; 8];
        let mut script = Script::new(vec![entry(0, false), step(3, 1, QUAD, &[0])]);
        let report = fuzz_with_config(&mut buf, 1, &mut script, &config).expect("");
        assert_eq!(report.mutations.len(), 1);
        assert_eq!(report.mutations[0].width, Width::Float);
        assert_eq!(report.mutations[0].bits, u64::from(3.0f32.to_bits()));
        assert_eq!(buf, [0, 0, 0x40, 0x40, 0, 0, 0, 0]);

        let mut buf = [0u8; 8];
        let mut script = Script::new(vec![entry(0, false), step(3, 1, QUAD, &[1])]);
        let report = fuzz_with_config(&mut buf, 1, &mut script, &config).expect("");
        #[allow(clippy::cast_precision_loss)]
        let expected = (0x8000_0003u32 as f32).to_bits();
        assert_eq!(report.mutations[0].bits, u64::from(expected));
    }

    #[test]
    fn test_exhausted_source_keeps_earlier_writes() {
        let mut buf = [0u8; 8];
        let mut script = Script::new(vec![entry(0, false), step(0x41, 1, BYTE, &[0])]);
        let err = fuzz(&mut buf, 3, &mut script).expect_err("");
        assert!(matches!(
            err,
            MemFuzzError::ExhaustedRandomSource {
                drawn: 0,
                required: 16
            }
        ));
        assert_eq!(buf, [0x41, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_writes_stay_in_bounds_and_aligned() {
        for distribution in [WidthDistribution::Linear, WidthDistribution::LinearWithFloat] {
            let config = FuzzConfig {
                distribution,
                ..FuzzConfig::default()
            };
            for seed in 0..500u64 {
                let len = (seed % 67 + 1) as usize;
                let original: Vec<u8> = (0..len).map(|i| (i as u8).wrapping_mul(31)).collect();
                let mut buf = original.clone();
                let mut rng = ChaChaRng::seed_from_u64(seed);
                let max_changes = (seed * 7) as usize;
                let report = fuzz_with_config(&mut buf, max_changes, &mut rng, &config).expect("");

                assert!(report.budget < len);
                assert_eq!(report.budget, max_changes % len);
                assert!(report.mutations.len() <= report.budget);

                let mut touched = vec![false; len];
                for mutation in &report.mutations {
                    let size = mutation.width.size();
                    assert!(mutation.offset + size <= len, "seed {seed}: {mutation:?}");
                    assert_eq!(mutation.offset % size, 0, "seed {seed}: {mutation:?}");
                    assert_eq!(
                        buf[mutation.offset..mutation.offset + size],
                        mutation.bits.to_le_bytes()[..size]
                    );
                    if matches!(mutation.source, ValueSource::Catalog { .. }) {
                        assert!(in_catalog(mutation), "seed {seed}: {mutation:?}");
                    }
                    touched[mutation.offset..mutation.offset + size].fill(true);
                }
                for (i, touched) in touched.iter().enumerate() {
                    if !touched {
                        assert_eq!(buf[i], original[i], "seed {seed}: byte {i} changed");
                    }
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        for seed in 0..100u64 {
            let mut first = vec![0u8; 48];
            let mut second = vec![0u8; 48];
            let first_report =
                fuzz(&mut first, 40, &mut ChaChaRng::seed_from_u64(seed)).expect("");
            let second_report =
                fuzz(&mut second, 40, &mut ChaChaRng::seed_from_u64(seed)).expect("");
            assert_eq!(first, second);
            assert_eq!(first_report, second_report);
        }
    }

    #[test]
    fn test_report_grows_with_applied_mutations() {
        let len = 1 << 20;
        let mut buf = vec![0u8; len];
        let last = u32::try_from(len - 1).expect("");
        let mut script = Script::new(vec![entry(last, false), step(0x41, 1, BYTE, &[0])]);
        let report = fuzz(&mut buf, len - 1, &mut script).expect("");
        assert_eq!(report.budget, len - 1);
        assert_eq!(report.mutations.len(), 1);
        assert!(report.mutations.capacity() < 64);
        assert_eq!(buf[len - 1], 0x41);
    }

    #[test]
    fn test_mutator_continues_stream() {
        let mut mutator = Mutator::new(ChaChaRng::seed_from_u64(7));
        let mut replay = Mutator::new(ChaChaRng::seed_from_u64(7));
        let mut buf = vec![0xaau8; 32];
        let mut other = vec![0xaau8; 32];
        for _ in 0..10 {
            let report = mutator.fuzz(&mut buf, 9).expect("");
            assert_eq!(report, replay.fuzz(&mut other, 9).expect(""));
        }
        assert_eq!(buf, other);
        assert_eq!(mutator.config(), &FuzzConfig::default());
        // both consumed the same number of words
        assert_eq!(mutator.source_mut().draw(), replay.into_inner().draw());
    }
}

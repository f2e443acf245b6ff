use crate::width::Width;
use serde::{Deserialize, Serialize};

/// Where the written value came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    /// Entry of the dangerous number table of the written width (the word table for floats).
    Catalog {
        /// Position in the table
        index: usize,
    },
    /// Random bits.
    Random {
        /// Whether the sign bit was forced on
        high_bit: bool,
    },
}

/// A single write applied to the buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mutation {
    /// Offset relative to the buffer start
    pub offset: usize,
    /// Width that was actually written, after falling through misaligned or too wide tiers
    pub width: Width,
    /// The width chosen by the distribution before falling through
    pub selected: Width,
    /// Written bits, zero extended. For floats this is the `f32` bit pattern.
    pub bits: u64,
    /// Catalog entry or random bits
    pub source: ValueSource,
}

/// Describes one pass of the mutation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationReport {
    /// Length of the mutated buffer
    pub buffer_len: usize,
    /// Where the first mutation was placed
    pub start_offset: usize,
    /// True if the start offset was rounded down to a multiple of four
    pub rounded: bool,
    /// The requested change count reduced modulo the buffer length
    pub budget: usize,
    /// Applied writes in the order they happened
    pub mutations: Vec<Mutation>,
}

impl MutationReport {
    /// Number of bytes covered by all mutations.
    #[must_use]
    pub fn bytes_written(&self) -> usize {
        self.mutations.iter().map(|m| m.width.size()).sum()
    }
}

use serde::{Deserialize, Serialize};

/// Size class of a single mutation write.
///
/// The discriminants follow the fallthrough order: a tier that does not fit hands over to the
/// next higher discriminant, ending at `Byte`.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Width {
    /// IEEE-754 single precision stored in a 4 byte slot.
    Float = 0,
    /// 8 bytes
    Quad = 1,
    /// 4 bytes
    Word = 2,
    /// 2 bytes
    Half = 3,
    /// 1 byte, never misaligned
    Byte = 4,
}

const TIERS: [Width; 5] = [Width::Float, Width::Quad, Width::Word, Width::Half, Width::Byte];

impl Width {
    /// Number of bytes written.
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            Width::Byte => 1,
            Width::Half => 2,
            Width::Word | Width::Float => 4,
            Width::Quad => 8,
        }
    }

    /// Returns true if a write of this width fits at `cursor` with `remaining` bytes left. The
    /// cursor has to be a multiple of the width's size relative to the buffer start.
    #[must_use]
    pub const fn fits(self, cursor: usize, remaining: usize) -> bool {
        remaining >= self.size() && cursor % self.size() == 0
    }

    /// The tiers to try when `self` was selected, widest first.
    pub fn fallthrough(self) -> impl Iterator<Item = Width> {
        TIERS[self as usize..].iter().copied()
    }

    /// Picks the first tier, starting at `self`, that fits at `cursor`.
    #[must_use]
    pub fn narrow_to_fit(self, cursor: usize, remaining: usize) -> Option<Width> {
        self.fallthrough().find(|width| width.fits(cursor, remaining))
    }
}

/// Maps the bit population of two random words onto a [`Width`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidthDistribution {
    /// Four equal buckets of 16: `[0,16)` byte, `[16,32)` half, `[32,48)` word, `[48,64]` quad.
    #[default]
    Linear,
    /// Five buckets that also produce floats: `[0,12)` byte, `[12,25)` half, `[25,38)` word,
    /// `[38,51)` quad, `[51,64]` float.
    LinearWithFloat,
}

impl WidthDistribution {
    /// Selects the width for one mutation step. The bucket boundaries are load-bearing: changing
    /// them changes every mutated buffer for a given seed.
    #[must_use]
    pub fn decide(self, draw: u32, draw2: u32) -> Width {
        let population = draw.count_ones() + draw2.count_ones();
        match self {
            WidthDistribution::Linear => match population {
                0..16 => Width::Byte,
                16..32 => Width::Half,
                32..48 => Width::Word,
                _ => Width::Quad,
            },
            WidthDistribution::LinearWithFloat => match population {
                0..12 => Width::Byte,
                12..25 => Width::Half,
                25..38 => Width::Word,
                38..51 => Width::Quad,
                _ => Width::Float,
            },
        }
    }
}

//! Values that historically trip integer boundary bugs: off-by-one around `2^n`, sign bit
//! flips, all zeros and all ones. The tables are heuristic, duplicates included, and are never
//! regenerated at runtime.

static DANGEROUS_NUMBERS_U8: &[u8] = &[
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0e, 0x0f, 0x10, 0x1e,
    0x1f, 0x20, 0x21, 0x22, 0x3e, 0x3f, 0x40, 0x41, 0x42, 0x62, 0x63, 0x64, 0x65, 0x66, 0x7e,
    0x7f, 0x80, 0x81, 0x82, 0xc6, 0xc7, 0xc8, 0xc9, 0xca, 0xfa, 0xfb, 0xfc, 0xfd, 0xfe, 0xff,
];

static DANGEROUS_NUMBERS_U16: &[u16] = &[
    // powers of two +-2
    0x0000, 0x0001, 0x0002, 0x00fe, 0x00ff, 0x0100, 0x0101, 0x0102, 0x01fe, 0x01ff, 0x0200,
    0x0201, 0x0202, 0x03fe, 0x03ff, 0x0400, 0x0401, 0x0402, 0x07fe, 0x07ff, 0x0800, 0x0801,
    0x0802, 0x0ffe, 0x0fff, 0x1000, 0x1001, 0x1002, 0x1ffe, 0x1fff, 0x2000, 0x2001, 0x2002,
    0x3ffe, 0x3fff, 0x4000, 0x4001, 0x4002, 0x7ffe, 0x7fff, 0x8000, 0x8001, 0x8002, 0xfffe,
    0xffff,
    // byte boundaries
    0x0006, 0x0007, 0x0008, 0x0009, 0x000a, 0x000e, 0x000f, 0x0010, 0x0011, 0x0012, 0x001e,
    0x001f, 0x0020, 0x0021, 0x0022, 0x003e, 0x003f, 0x0040, 0x0041, 0x0042, 0x0062, 0x0063,
    0x0064, 0x0065, 0x0066, 0x007e, 0x007f, 0x0080, 0x0081, 0x0082, 0x00c6, 0x00c7, 0x00c8,
    0x00c9, 0x00ca,
    // decimal-ish high bytes
    0x08fd, 0x08fe, 0x08ff, 0x0900, 0x0901, 0x0afd, 0x0afe, 0x0aff, 0x0b00, 0x0b01, 0x10fd,
    0x10fe, 0x10ff, 0x1100, 0x1101, 0x14fd, 0x14fe, 0x14ff, 0x1500, 0x1501, 0x20fd, 0x20fe,
    0x20ff, 0x2100, 0x2101, 0x40fd, 0x40fe, 0x40ff, 0x4100, 0x4101, 0x64fd, 0x64fe, 0x64ff,
    0x6500, 0x6501, 0xc7fe, 0xc7ff, 0xc800, 0xc801, 0xc802, 0xfefe, 0xfeff, 0xff00, 0xff01,
    0xff02,
];

static DANGEROUS_NUMBERS_U32: &[u32] = &[
    0x0000_0000, 0x0000_0001, 0x0000_0002, 0x0001_0000, 0x0001_0001,
    // powers of two +-2
    0x0100, 0x0101, 0x0102, 0x01fe, 0x01ff, 0x0200, 0x0201, 0x0202, 0x03fe, 0x03ff, 0x0400,
    0x0401, 0x0402, 0x07fe, 0x07ff, 0x0800, 0x0801, 0x0802, 0x0ffe, 0x0fff, 0x1000, 0x1001,
    0x1002, 0x1ffe, 0x1fff, 0x2000, 0x2001, 0x2002, 0x3ffe, 0x3fff, 0x4000, 0x4001, 0x4002,
    0x7ffe, 0x7fff, 0x8000, 0x8001, 0x8002, 0xfffe, 0xffff,
    // byte boundaries
    0x06, 0x07, 0x08, 0x09, 0x0a, 0x0e, 0x0f, 0x10, 0x11, 0x12, 0x1e, 0x1f, 0x20, 0x21, 0x22,
    0x3e, 0x3f, 0x40, 0x41, 0x42, 0x62, 0x63, 0x64, 0x65, 0x66, 0x7e, 0x7f, 0x80, 0x81, 0x82,
    0xc6, 0xc7, 0xc8, 0xc9, 0xca,
    // decimal-ish high bytes of a half
    0x08fd, 0x08fe, 0x08ff, 0x0900, 0x0901, 0x0afd, 0x0afe, 0x0aff, 0x0b00, 0x0b01, 0x10fd,
    0x10fe, 0x10ff, 0x1100, 0x1101, 0x14fd, 0x14fe, 0x14ff, 0x1500, 0x1501, 0x20fd, 0x20fe,
    0x20ff, 0x2100, 0x2101, 0x40fd, 0x40fe, 0x40ff, 0x4100, 0x4101, 0x64fd, 0x64fe, 0x64ff,
    0x6500, 0x6501, 0xc7fe, 0xc7ff, 0xc800, 0xc801, 0xc802, 0xfefe, 0xfeff, 0xff00, 0xff01,
    0xff02,
    // decimal-ish third bytes
    0x0008_fffd, 0x0008_fffe, 0x0008_ffff, 0x0009_0000, 0x0009_0001, 0x000a_fffd, 0x000a_fffe,
    0x000a_ffff, 0x000b_0000, 0x000b_0001, 0x0010_fffd, 0x0010_fffe, 0x0010_ffff, 0x0011_0000,
    0x0011_0001, 0x0000_0014, 0x0014_fffd, 0x0014_fffe, 0x0014_ffff, 0x0015_0000, 0x0015_0001,
    0x0020_fffd, 0x0020_fffe, 0x0020_ffff, 0x0021_0000, 0x0021_0001, 0x0040_fffd, 0x0040_fffe,
    0x0040_ffff, 0x0041_0000, 0x0041_0001, 0x0064_fffd, 0x0064_fffe, 0x0064_ffff, 0x0065_0000,
    0x0065_0001, 0x0080_fffd, 0x0080_fffe, 0x0080_ffff, 0x0081_0000, 0x0081_0001, 0x00c8_fffd,
    0x00c8_fffe, 0x00c8_ffff, 0x00c9_0000, 0x00c9_0001, 0x00ff_fffd, 0x00ff_fffe, 0x00ff_ffff,
    0x0100_0000, 0x0100_0001,
    // sign bit
    0x7fff_fffe, 0x7fff_ffff, 0x8000_0000, 0x8000_0001, 0xffff_fffe, 0xffff_ffff,
];

static DANGEROUS_NUMBERS_U64: &[u64] = &[
    0x0, 0x1, 0x2,
    // powers of two +-2
    0x100, 0x101, 0x102, 0x1fe, 0x1ff, 0x200, 0x201, 0x202, 0x3fe, 0x3ff, 0x400, 0x401, 0x402,
    0x7fe, 0x7ff, 0x800, 0x801, 0x802, 0xffe, 0xfff, 0x1000, 0x1001, 0x1002, 0x1ffe, 0x1fff,
    0x2000, 0x2001, 0x2002, 0x3ffe, 0x3fff, 0x4000, 0x4001, 0x4002, 0x7ffe, 0x7fff, 0x8000,
    0x8001, 0x8002, 0xfffe, 0xffff,
    // byte boundaries
    0x06, 0x07, 0x08, 0x09, 0x0a, 0x0e, 0x0f, 0x10, 0x11, 0x12, 0x1e, 0x1f, 0x20, 0x21, 0x22,
    0x3e, 0x3f, 0x40, 0x41, 0x42, 0x62, 0x63, 0x64, 0x65, 0x66, 0x7e, 0x7f, 0x80, 0x81, 0x82,
    0xc6, 0xc7, 0xc8, 0xc9, 0xca,
    // decimal-ish high bytes of a half
    0x08fd, 0x08fe, 0x08ff, 0x0900, 0x0901, 0x0afd, 0x0afe, 0x0aff, 0x0b00, 0x0b01, 0x10fd,
    0x10fe, 0x10ff, 0x1100, 0x1101, 0x14fd, 0x14fe, 0x14ff, 0x1500, 0x1501, 0x20fd, 0x20fe,
    0x20ff, 0x2100, 0x2101, 0x40fd, 0x40fe, 0x40ff, 0x4100, 0x4101, 0x64fd, 0x64fe, 0x64ff,
    0x6500, 0x6501, 0xc7fe, 0xc7ff, 0xc800, 0xc801, 0xc802, 0xfefe, 0xfeff, 0xff00, 0xff01,
    0xff02,
    // repeated on purpose, these bias the table towards small lengths
    0x100, 0x101, 0x102, 0x1fe, 0x1ff, 0x200, 0x201, 0x202, 0x3fe, 0x3ff, 0x400, 0x401, 0x402,
    0x7fe, 0x7ff, 0x800, 0x801, 0x802, 0xffe, 0xfff, 0x1000, 0x1001,
    // word boundary and the bytes above it
    0x0000_0000_ffff_fffd, 0x0000_0000_ffff_fffe, 0x0000_0000_ffff_ffff, 0x0000_0001_0000_0000,
    0x0000_0001_0000_0001, 0x0000_0008_ffff_fffd, 0x0000_0008_ffff_fffe, 0x0000_0008_ffff_ffff,
    0x0000_0009_0000_0000, 0x0000_0009_0000_0001, 0x0000_000a_ffff_fffd, 0x0000_000a_ffff_fffe,
    0x0000_000a_ffff_ffff, 0x0000_000b_0000_0000, 0x0000_000b_0000_0001, 0x0000_0010_ffff_fffd,
    0x0000_0010_ffff_fffe, 0x0000_0010_ffff_ffff, 0x0000_0011_0000_0000, 0x0000_0011_0000_0001,
    0x0000_0014_ffff_fffd, 0x0000_0014_ffff_fffe, 0x0000_0014_ffff_ffff, 0x0000_0015_0000_0000,
    0x0000_0015_0000_0001, 0x0000_0020_ffff_fffd, 0x0000_0020_ffff_fffe, 0x0000_0020_ffff_ffff,
    0x0000_0021_0000_0000, 0x0000_0021_0000_0001, 0x0000_0040_ffff_fffd, 0x0000_0040_ffff_fffe,
    0x0000_0040_ffff_ffff, 0x0000_0041_0000_0000, 0x0000_0041_0000_0001, 0x0000_0064_ffff_fffd,
    0x0000_0064_ffff_fffe, 0x0000_0064_ffff_ffff, 0x0000_0065_0000_0000, 0x0000_0065_0000_0001,
    0x0000_0080_ffff_fffd, 0x0000_0080_ffff_fffe, 0x0000_0080_ffff_ffff, 0x0000_0081_0000_0000,
    0x0000_0081_0000_0001, 0x0000_00c8_ffff_fffd, 0x0000_00c8_ffff_fffe, 0x0000_00c8_ffff_ffff,
    0x0000_00c9_0000_0000, 0x0000_00c9_0000_0001, 0x0000_00ff_ffff_fffd, 0x0000_00ff_ffff_fffe,
    0x0000_00ff_ffff_ffff, 0x0000_0100_0000_0000, 0x0000_0100_0000_0001,
    // sign bit
    0x7fff_ffff_ffff_fffd, 0x7fff_ffff_ffff_fffe, 0x7fff_ffff_ffff_ffff, 0x8000_0000_0000_0000,
    0x8000_0000_0000_0001, 0xffff_ffff_ffff_fffd, 0xffff_ffff_ffff_fffe, 0xffff_ffff_ffff_ffff,
];

/// Access to the dangerous value table of one integer width.
///
/// Lookups never fail: any draw is reduced modulo the table length, so a raw random word can
/// be used as index directly.
pub trait DangerousNumber<T> {
    /// Returns the table entry selected by `draw mod len` together with the index used.
    fn dangerous_number(draw: u32) -> (usize, T) {
        let idx = draw as usize % Self::dangerous_numbers_len();
        (idx, Self::dangerous_number_at_index(idx))
    }

    /// Returns the entry at `idx`, wrapping around the end of the table.
    fn dangerous_number_at_index(idx: usize) -> T;

    /// Number of entries in the table, duplicates included.
    fn dangerous_numbers_len() -> usize;

    /// True if `value` has the same bit pattern as one of the table entries.
    fn is_dangerous_number(value: T) -> bool;
}

macro_rules! dangerous_number {
    ( $ty:ident, $nums:ident ) => {
        impl DangerousNumber<$ty> for $ty {
            #[allow(clippy::cast_possible_truncation)]
            fn dangerous_number_at_index(idx: usize) -> $ty {
                $nums[idx % $nums.len()] as $ty
            }

            fn dangerous_numbers_len() -> usize {
                $nums.len()
            }

            #[allow(clippy::cast_possible_truncation)]
            fn is_dangerous_number(value: $ty) -> bool {
                $nums.iter().any(|num| *num as $ty == value)
            }
        }
    };
}

dangerous_number!(u8, DANGEROUS_NUMBERS_U8);
dangerous_number!(u16, DANGEROUS_NUMBERS_U16);
dangerous_number!(u32, DANGEROUS_NUMBERS_U32);
dangerous_number!(u64, DANGEROUS_NUMBERS_U64);

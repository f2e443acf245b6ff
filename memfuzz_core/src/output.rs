//! Human readable rendering of a mutated buffer: a hex dump with the changed bytes marked, the
//! dangerous value tables and a one line verdict.

use crate::dangerous_numbers::DangerousNumber;
use crate::width::Width;
use std::fmt::Write;

/// Bytes per hex dump line
const LINE_WIDTH: usize = 10;

pub(crate) trait Colored {
    fn yellow(&self) -> String;
}

impl Colored for String {
    fn yellow(&self) -> String {
        format!("\x1b[33;1m{self}\x1b[0m")
    }
}

/// Dumps `mutated` as hex, ten bytes per line. Bytes that differ from `original` are highlighted.
#[must_use]
pub fn hex_dump(original: &[u8], mutated: &[u8]) -> String {
    let mut result = String::new();
    for (line, chunk) in mutated.chunks(LINE_WIDTH).enumerate() {
        let _ = write!(result, "{:08x}:", line * LINE_WIDTH);
        for (i, byte) in chunk.iter().enumerate() {
            let hex = format!("{byte:02x}");
            if original.get(line * LINE_WIDTH + i) == Some(byte) {
                let _ = write!(result, " {hex}");
            } else {
                let _ = write!(result, " {}", hex.yellow());
            }
        }
        result.push('\n');
    }
    result
}

/// Counts the bits that differ between the two buffers, `None` if their lengths differ.
pub(crate) fn hamming_distance(vec1: &[u8], vec2: &[u8]) -> Option<usize> {
    if vec1.len() != vec2.len() {
        return None;
    }
    Some(
        vec1.iter()
            .zip(vec2)
            .map(|(byte1, byte2)| (byte1 ^ byte2).count_ones() as usize)
            .sum(),
    )
}

/// One line summary of what a pass did to the buffer.
#[must_use]
pub fn verdict(original: &[u8], mutated: &[u8]) -> String {
    match hamming_distance(original, mutated) {
        Some(0) => "Fuzz changed nothing.".to_owned(),
        Some(bits) => {
            let bytes = original.iter().zip(mutated).filter(|(a, b)| a != b).count();
            format!("Fuzz changed {bytes} of {} bytes ({bits} bits).", original.len())
        }
        None => "Fuzz changed the buffer length.".to_owned(),
    }
}

/// Lists the dangerous value table used for `width`, one `index: value` pair per line.
#[must_use]
pub fn catalog_listing(width: Width) -> String {
    fn listing<T: DangerousNumber<T> + std::fmt::LowerHex>(digits: usize) -> String {
        let mut result = String::new();
        for idx in 0..T::dangerous_numbers_len() {
            let value = T::dangerous_number_at_index(idx);
            let _ = writeln!(result, "{idx:>3}: 0x{value:0digits$x}");
        }
        result
    }
    match width {
        Width::Byte => listing::<u8>(2),
        Width::Half => listing::<u16>(4),
        Width::Word | Width::Float => listing::<u32>(8),
        Width::Quad => listing::<u64>(16),
    }
}

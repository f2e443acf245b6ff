//!
//! `memfuzz` corrupts raw memory buffers with values that are known to break integer handling.
//!
//! The buffers usually come from the low level tooling around it: a physical memory snapshot,
//! an option ROM read out of a PCI BAR, a captured packet. `memfuzz_core` does not care where the
//! bytes come from. It takes a `&mut [u8]`, picks a random start offset and then overwrites
//! bytes, halves, words, quads (and optionally floats) with either random bits or entries from a
//! table of dangerous numbers (`0`, `0x7f`, `0x80`, `0xffff`, `2^n - 1`, ...).
//!
//! A write is only done when it fits into the remaining bytes and is aligned to its own size,
//! otherwise the next narrower width is tried, down to a single byte.
//!
//! Every mutation step draws a fixed block of words from the random source, so a pass is fully
//! reproducible from its seed.
//!
//! ```rs
//! use memfuzz_core::mutator::Mutator;
//! use rand::SeedableRng;
//! use rand_chacha::ChaChaRng;
//!
//! fn main() -> Result<(), memfuzz_core::error::MemFuzzError> {
//!     let mut rom = std::fs::read("option_rom.bin")?;
//!     let mut mutator = Mutator::new(ChaChaRng::seed_from_u64(1337));
//!     let report = mutator.fuzz(&mut rom, 64)?;
//!     println!("{} mutations", report.mutations.len());
//!     Ok(())
//! }
//! ```
//!
//! Draw sources other than the `rand` generators can be found in the `memfuzz_common` crate.
//!

#![deny(missing_docs)]
#![deny(unsafe_code, clippy::unwrap_used)]
#![warn(clippy::pedantic)]

/// Contains the `DrawSource` trait which feeds random words into the engine.
pub mod traits;

/// The mutation engine.
pub mod mutator;

/// Tables of dangerous numbers per integer width.
pub mod dangerous_numbers;

/// Width of a single mutation and how it is selected.
pub mod width;

/// Settings of the mutation engine.
pub mod config;

/// Result types returned by the mutation engine.
pub mod types;

/// Manage the logger. This can be used to initialize the `tracing_subscriber` in case
/// `memfuzz_core` is used outside of the CLI.
pub mod log;

/// Renders mutated buffers for humans.
pub mod output;

/// Contains all the different errors `memfuzz_core` can return.
pub mod error;

/// Contains the `MemFuzzBuilder` to start `memfuzz_core` in CLI mode.
pub mod cli;

mod pool;

pub use pool::POOL_CAPACITY;

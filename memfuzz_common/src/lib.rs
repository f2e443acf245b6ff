//! Collection of common implementations for `memfuzz_core`
//!
//! `memfuzz_core` only needs a `DrawSource` to run. Every `rand::RngCore` already is one, this
//! crate adds the sources that are not random number generators in the `rand` sense.
//!
//! Currently there are the following common implementations:
//!
//! - `DrawSource`
//!     - `ReplayDraws`: Replays recorded or hand written words, e.g. to reproduce a pass.
//!     - `GlibcRand`: The glibc `srand`/`rand` generator, for buffers that have to be mutated
//!       exactly like a C harness seeded with the same value would.
//!
#![deny(missing_docs)]
#![deny(unsafe_code, clippy::unwrap_used)]
#![warn(clippy::pedantic)]

/// A collection of different `DrawSource` implementations
pub mod draws;

/// Implements `DrawSource` by replaying a fixed list of words
pub mod replay;

/// Implements the glibc `rand()` generator as `rand::RngCore`
pub mod glibc;

//! Command line front end of memfuzz.
//!
//! By default the engine is driven by glibc's `rand()` seeded with `--seed`, so a buffer
//! mutated here matches what a C harness calling `srand(seed)` would see draw for draw. Set
//! `MEMFUZZ_CHACHA=1` to use a `ChaChaRng` instead.
//!
//! ```sh
//! memfuzz mutate --input "GET / HTTP/1.0" --max-changes 5 --seed 1
//! memfuzz mutate --file rom.bin -m 64 --rounds 4 --json
//! memfuzz catalog half
//! ```

use memfuzz_common::draws::glibc::GlibcRand;
use memfuzz_core::cli::MemFuzzBuilder;
use memfuzz_core::config::FuzzConfig;

fn main() {
    let config = FuzzConfig::default();
    let result = if std::env::var_os("MEMFUZZ_CHACHA").is_some() {
        MemFuzzBuilder::chacha().with_config(config).start_cli()
    } else {
        MemFuzzBuilder::new(GlibcRand::from_u64)
            .with_config(config)
            .start_cli()
    };
    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

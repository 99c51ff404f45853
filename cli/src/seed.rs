use core::hash::Hasher;

use fnv::FnvHasher;
use rand::prelude::*;

/// Stable 64-bit FNV-1a of the seed text, so the same text always gives the same board.
pub fn seed_from_text(text: &str) -> u64 {
    let mut hasher = FnvHasher::default();
    hasher.write(text.as_bytes());
    hasher.finish()
}

pub fn resolve_seed(text: Option<&str>) -> u64 {
    match text {
        Some(text) => seed_from_text(text),
        None => SmallRng::from_os_rng().random(),
    }
}

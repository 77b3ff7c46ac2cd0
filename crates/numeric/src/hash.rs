// Seed-combining hash for map keys.
//
// Not cryptographic. The solver's trap table only needs a deterministic,
// well-mixed hash over limb sequences and curve points.

use std::hash::{BuildHasherDefault, Hasher};

/// Fixed odd multiplier for the combining step.
const MIX_MULTIPLIER: u64 = 0x9e37_79b9_7f4a_7c15;

/// Fold one word into an accumulated seed.
#[inline]
pub fn mix(h: u64, v: u64) -> u64 {
    (h.rotate_left(5) ^ v).wrapping_mul(MIX_MULTIPLIER)
}

/// A `Hasher` built on [`mix`], deterministic across runs and processes.
#[derive(Default)]
pub struct MixHasher {
    state: u64,
}

impl Hasher for MixHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for chunk in bytes.chunks(8) {
            let mut word = [0u8; 8];
            word[..chunk.len()].copy_from_slice(chunk);
            self.state = mix(self.state, u64::from_le_bytes(word));
        }
    }

    #[inline]
    fn write_u8(&mut self, v: u8) {
        self.state = mix(self.state, v as u64);
    }

    #[inline]
    fn write_u64(&mut self, v: u64) {
        self.state = mix(self.state, v);
    }
}

/// Build-hasher for maps keyed by big integers or points.
pub type MixState = BuildHasherDefault<MixHasher>;

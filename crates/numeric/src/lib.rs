// Numeric building blocks: machine limbs, fixed-width big integers, and the
// combining hash used for deterministic map keys.

pub mod hash;
pub mod limb;
pub mod uint;

pub use hash::{mix, MixHasher, MixState};
pub use limb::Limb;
pub use uint::Uint;

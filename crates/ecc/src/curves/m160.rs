// A 160-bit prime used throughout the field test suite, in two limb
// layouts:
//
//   M = 0xb77902ab_d8db9627_f5d7ceca_5c17ef6c_5e3b0969
//
// `Fp160` stores it as five 32-bit limbs with no spare top bit, so the
// carry-tracking reduction paths run. `Fp160W` stores the same modulus as
// three 64-bit limbs; the 32 spare top bits select the carry-free paths.
// `M ≡ 1 (mod 4)`, which forces the randomized Tonelli–Shanks branch of
// the square root.

use crate::fields::fp::Fp;
use crate::fields::params::{FieldParams, GroupParams};

pub struct Fp160Params;

impl GroupParams<5> for Fp160Params {
    type Limb = u32;
    const MODULUS: [u32; 5] = [0x5e3b0969, 0x5c17ef6c, 0xf5d7ceca, 0xd8db9627, 0xb77902ab];
    const HAS_SPARE_BIT: bool = false;
}

impl FieldParams<5> for Fp160Params {
    const NEG_INV: u32 = 0x96c9e927;
    const R_SQUARED: [u32; 5] = [0x61260cf2, 0x399ce6a5, 0x46c1c15a, 0x8aec7519, 0x7cd393b3];
    const ONE_R: [u32; 5] = [0xa1c4f697, 0xa3e81093, 0x0a283135, 0x272469d8, 0x4886fd54];
}

pub type Fp160 = Fp<Fp160Params, 5>;

pub struct Fp160WParams;

impl GroupParams<3> for Fp160WParams {
    type Limb = u64;
    const MODULUS: [u64; 3] = [
        0x5c17ef6c_5e3b0969,
        0xd8db9627_f5d7ceca,
        0x00000000_b77902ab,
    ];
    const HAS_SPARE_BIT: bool = true;
}

impl FieldParams<3> for Fp160WParams {
    const NEG_INV: u64 = 0x1c23727c_96c9e927;
    const R_SQUARED: [u64; 3] = [
        0x87ada0ed_26f392f0,
        0xcf41f1cd_75ad34a8,
        0x00000000_158d01ed,
    ];
    const ONE_R: [u64; 3] = [
        0xad68a50f_4a90f52a,
        0x73a54262_8a520aee,
        0x00000000_3e45aeb8,
    ];
}

pub type Fp160W = Fp<Fp160WParams, 3>;

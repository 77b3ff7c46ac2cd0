// SEC2 secp160r1: y² = x³ − 3x + b over p = 2^160 − 2^31 − 1.
//
// The base field has no spare top bit, so the carry-tracking reduction runs
// on every operation. The 161-bit group order is carried as a six-limb
// add-group for scalar arithmetic; the order is prime, so every finite
// point of the curve generates the full group.

use crate::fields::fp::Fp;
use crate::fields::params::{FieldParams, GroupParams};
use crate::groups::affine::Affine;
use crate::groups::curve_params::CurveParams;
use crate::groups::jacobian::Jacobian;
use crate::groups::projective::Projective;

pub struct Secp160r1FqParams;

impl GroupParams<5> for Secp160r1FqParams {
    type Limb = u32;
    const MODULUS: [u32; 5] = [0x7fffffff, 0xffffffff, 0xffffffff, 0xffffffff, 0xffffffff];
    const HAS_SPARE_BIT: bool = false;
}

impl FieldParams<5> for Secp160r1FqParams {
    const NEG_INV: u32 = 0x80000001;
    const R_SQUARED: [u32; 5] = [0x00000001, 0x40000001, 0x00000000, 0x00000000, 0x00000000];
    const ONE_R: [u32; 5] = [0x80000001, 0x00000000, 0x00000000, 0x00000000, 0x00000000];
}

pub type Secp160r1Fq = Fp<Secp160r1FqParams, 5>;

/// The group order `n = 0x0100000000000000000001f4c8f927aed3ca752257` as a
/// six-limb add-group.
pub struct Secp160r1OrderParams;

impl GroupParams<6> for Secp160r1OrderParams {
    type Limb = u32;
    const MODULUS: [u32; 6] = [
        0xca752257, 0xf927aed3, 0x0001f4c8, 0x00000000, 0x00000000, 0x00000001,
    ];
    const HAS_SPARE_BIT: bool = true;
}

pub type Secp160r1Scalar = Fp<Secp160r1OrderParams, 6>;

pub struct Secp160r1Params;

impl CurveParams<5> for Secp160r1Params {
    type FieldParams = Secp160r1FqParams;

    /// a = −3, Montgomery form.
    const A: [u32; 5] = [0xfffffffc, 0xfffffffd, 0xffffffff, 0xffffffff, 0xffffffff];
    /// b = 0x1c97befc54bd7a8b65acf89f81d4d4adc565fa45, Montgomery form.
    const B: [u32; 5] = [0x53b1d9c3, 0x6badc18f, 0x269762f6, 0x0793f6db, 0x46f67c42];
    /// Gx = 0x4a96b5688ef573284664698968c38bb913cbfc82, Montgomery form.
    const GENERATOR_X: [u32; 5] = [0x39175736, 0x054f3754, 0xfac62f66, 0xb227a7ec, 0x92116efc];
    /// Gy = 0x23a628553168947d59dcc912042351377ac5fb32, Montgomery form.
    const GENERATOR_Y: [u32; 5] = [0x8c990f5c, 0xca6fd8e5, 0x5bee71ad, 0xde56f906, 0xbc5a7293];
}

pub type Secp160r1Affine = Affine<Secp160r1Params, 5>;
pub type Secp160r1Jacobian = Jacobian<Secp160r1Params, 5>;
pub type Secp160r1Projective = Projective<Secp160r1Params, 5>;

// A deliberately small solver fixture: the supersingular curve
// y² = x³ + x over p = 0x2001eb (p ≡ 3 mod 4), with group order
// p + 1 = 4·q for the 20-bit prime q = 0x8007b. The generator below has
// order exactly q, so discrete logs live in a 20-bit interval and the
// kangaroo tests finish in well under a second per attempt.

use crate::fields::fp::Fp;
use crate::fields::params::{FieldParams, GroupParams};
use crate::groups::affine::Affine;
use crate::groups::curve_params::CurveParams;
use crate::groups::jacobian::Jacobian;
use crate::groups::projective::Projective;

pub struct TinyFpParams;

impl GroupParams<1> for TinyFpParams {
    type Limb = u32;
    const MODULUS: [u32; 1] = [0x002001eb];
    const HAS_SPARE_BIT: bool = true;
}

impl FieldParams<1> for TinyFpParams {
    const NEG_INV: u32 = 0x2810e13d;
    const R_SQUARED: [u32; 1] = [0x00047515];
    const ONE_R: [u32; 1] = [0x0010a9eb];
}

pub type TinyFp = Fp<TinyFpParams, 1>;

/// The subgroup order q = 0x8007b as a one-limb add-group.
pub struct TinyOrderParams;

impl GroupParams<1> for TinyOrderParams {
    type Limb = u32;
    const MODULUS: [u32; 1] = [0x0008007b];
    const HAS_SPARE_BIT: bool = true;
}

pub type TinyScalar = Fp<TinyOrderParams, 1>;

pub struct TinyCurveParams;

impl CurveParams<1> for TinyCurveParams {
    type FieldParams = TinyFpParams;

    /// a = 1, Montgomery form.
    const A: [u32; 1] = [0x0010a9eb];
    /// b = 0.
    const B: [u32; 1] = [0x00000000];
    /// Gx = 0xb3871, Montgomery form; (Gx, Gy) has order q.
    const GENERATOR_X: [u32; 1] = [0x000b2f2a];
    /// Gy = 0x1e51a0, Montgomery form.
    const GENERATOR_Y: [u32; 1] = [0x001151d7];
}

pub type TinyAffine = Affine<TinyCurveParams, 1>;
pub type TinyJacobian = Jacobian<TinyCurveParams, 1>;
pub type TinyProjective = Projective<TinyCurveParams, 1>;

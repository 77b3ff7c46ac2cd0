use kanga_numeric::Uint;

use crate::fields::fp::Fp;
use crate::fields::params::{FieldParams, GroupParams};

/// A short-Weierstrass curve `y² = x³ + A·x + B` over a prime base field.
///
/// The coefficient and generator constants are raw Montgomery-form limbs, so
/// the accessors are plain loads with no conversion work.
pub trait CurveParams<const N: usize>: 'static + Send + Sync + Sized {
    type FieldParams: FieldParams<N>;

    /// `A` in Montgomery form.
    const A: [<Self::FieldParams as GroupParams<N>>::Limb; N];
    /// `B` in Montgomery form.
    const B: [<Self::FieldParams as GroupParams<N>>::Limb; N];
    /// Generator x coordinate in Montgomery form.
    const GENERATOR_X: [<Self::FieldParams as GroupParams<N>>::Limb; N];
    /// Generator y coordinate in Montgomery form.
    const GENERATOR_Y: [<Self::FieldParams as GroupParams<N>>::Limb; N];

    fn coeff_a() -> CurveFp<Self, N> {
        Fp::new(Uint::new(Self::A))
    }

    fn coeff_b() -> CurveFp<Self, N> {
        Fp::new(Uint::new(Self::B))
    }

    fn generator_x() -> CurveFp<Self, N> {
        Fp::new(Uint::new(Self::GENERATOR_X))
    }

    fn generator_y() -> CurveFp<Self, N> {
        Fp::new(Uint::new(Self::GENERATOR_Y))
    }
}

/// Base-field element of curve `C`.
pub type CurveFp<C, const N: usize> = Fp<<C as CurveParams<N>>::FieldParams, N>;

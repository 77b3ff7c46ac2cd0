pub mod affine;
pub mod curve_params;
pub mod jacobian;
pub mod projective;

pub use affine::Affine;
pub use curve_params::{CurveFp, CurveParams};
pub use jacobian::Jacobian;
pub use projective::Projective;

use kanga_numeric::{Limb, Uint};

use crate::workspace::workspace;

/// Value-style view of a curve point, implemented by every coordinate
/// system over stack-allocated workspaces.
///
/// Generic consumers (the discrete-log solvers, cross-coordinate tests) are
/// written once against this trait; performance-sensitive callers use the
/// inherent workspace-threaded operations directly.
pub trait CurvePoint<const N: usize>: Copy + Send + Sync {
    type Curve: CurveParams<N>;

    fn identity() -> Self;
    fn is_identity(&self) -> bool;
    fn generator() -> Self;

    fn from_affine_point(p: &Affine<Self::Curve, N>) -> Self;
    fn to_affine_point(&self) -> Affine<Self::Curve, N>;

    fn add_full(&self, rhs: &Self) -> Self;
    fn double_point(&self) -> Self;
    fn negate_point(&self) -> Self;
    fn eq_point(&self, rhs: &Self) -> bool;
    fn is_on_curve(&self) -> bool;
    fn mul_uint<LS: Limb, const NS: usize>(&self, k: &Uint<LS, NS>) -> Self;

    /// Rewrite into the canonical representation of the point's equivalence
    /// class (`z = 1` for the projective systems; the identity on affine
    /// points).
    ///
    /// The solvers normalize after every walk step: the walk index must be a
    /// function of the point, not of whichever representation the addition
    /// happened to produce.
    fn normalize(&self) -> Self {
        Self::from_affine_point(&self.to_affine_point())
    }

    /// Least significant word of the stored x coordinate; drives the
    /// pseudo-random walk indexing in the solvers.
    fn x_word(&self) -> u64;
}

impl<C: CurveParams<N>, const N: usize> CurvePoint<N> for Jacobian<C, N> {
    type Curve = C;

    fn identity() -> Self {
        Self::infinity()
    }

    fn is_identity(&self) -> bool {
        self.is_inf()
    }

    fn generator() -> Self {
        Jacobian::generator()
    }

    fn from_affine_point(p: &Affine<C, N>) -> Self {
        Self::from_affine(p)
    }

    fn to_affine_point(&self) -> Affine<C, N> {
        self.to_affine(&mut workspace())
    }

    fn add_full(&self, rhs: &Self) -> Self {
        let mut out = Self::infinity();
        Self::add(&mut out, self, rhs, &mut workspace());
        out
    }

    fn double_point(&self) -> Self {
        let mut out = Self::infinity();
        Self::add_self(&mut out, self, &mut workspace());
        out
    }

    fn negate_point(&self) -> Self {
        self.negate()
    }

    fn eq_point(&self, rhs: &Self) -> bool {
        self.eq(rhs, &mut workspace())
    }

    fn is_on_curve(&self) -> bool {
        self.on_curve(&mut workspace())
    }

    fn mul_uint<LS: Limb, const NS: usize>(&self, k: &Uint<LS, NS>) -> Self {
        let mut out = Self::infinity();
        Self::scalar_mul(&mut out, k, self, &mut workspace());
        out
    }

    fn x_word(&self) -> u64 {
        self.x.as_uint().limbs[0].as_u64()
    }
}

impl<C: CurveParams<N>, const N: usize> CurvePoint<N> for Projective<C, N> {
    type Curve = C;

    fn identity() -> Self {
        Self::infinity()
    }

    fn is_identity(&self) -> bool {
        self.is_inf()
    }

    fn generator() -> Self {
        Projective::generator()
    }

    fn from_affine_point(p: &Affine<C, N>) -> Self {
        Self::from_affine(p)
    }

    fn to_affine_point(&self) -> Affine<C, N> {
        self.to_affine(&mut workspace())
    }

    fn add_full(&self, rhs: &Self) -> Self {
        let mut out = Self::infinity();
        Self::add(&mut out, self, rhs, &mut workspace());
        out
    }

    fn double_point(&self) -> Self {
        let mut out = Self::infinity();
        Self::add_self(&mut out, self, &mut workspace());
        out
    }

    fn negate_point(&self) -> Self {
        self.negate()
    }

    fn eq_point(&self, rhs: &Self) -> bool {
        self.eq(rhs, &mut workspace())
    }

    fn is_on_curve(&self) -> bool {
        self.on_curve(&mut workspace())
    }

    fn mul_uint<LS: Limb, const NS: usize>(&self, k: &Uint<LS, NS>) -> Self {
        let mut out = Self::infinity();
        Self::scalar_mul(&mut out, k, self, &mut workspace());
        out
    }

    fn x_word(&self) -> u64 {
        self.x.as_uint().limbs[0].as_u64()
    }
}

impl<C: CurveParams<N>, const N: usize> CurvePoint<N> for Affine<C, N> {
    type Curve = C;

    fn identity() -> Self {
        Self::infinity()
    }

    fn is_identity(&self) -> bool {
        self.is_inf()
    }

    fn generator() -> Self {
        Affine::generator()
    }

    fn from_affine_point(p: &Affine<C, N>) -> Self {
        *p
    }

    fn to_affine_point(&self) -> Affine<C, N> {
        *self
    }

    fn add_full(&self, rhs: &Self) -> Self {
        let mut out = Self::infinity();
        Self::add(&mut out, self, rhs);
        out
    }

    fn double_point(&self) -> Self {
        let mut out = Self::infinity();
        Self::add_self(&mut out, self);
        out
    }

    fn negate_point(&self) -> Self {
        self.negate()
    }

    fn eq_point(&self, rhs: &Self) -> bool {
        self == rhs
    }

    fn is_on_curve(&self) -> bool {
        self.on_curve()
    }

    fn mul_uint<LS: Limb, const NS: usize>(&self, k: &Uint<LS, NS>) -> Self {
        let mut out = Self::infinity();
        Self::scalar_mul(&mut out, k, self);
        out
    }

    fn x_word(&self) -> u64 {
        self.x.as_uint().limbs[0].as_u64()
    }
}

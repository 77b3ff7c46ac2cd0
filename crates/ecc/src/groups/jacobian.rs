use std::fmt;
use std::marker::PhantomData;

use kanga_numeric::{Limb, Uint};

use crate::groups::affine::Affine;
use crate::groups::curve_params::{CurveFp, CurveParams};
use crate::workspace::{narrow, workspace, Workspace};

/// A curve point in Jacobian coordinates `(X : Y : Z)`, representing the
/// affine point `(X/Z², Y/Z³)`; `Z = 0` encodes infinity.
///
/// The default backend for scalar multiplication: doubling avoids the field
/// inversion of the affine formulas entirely.
pub struct Jacobian<C: CurveParams<N>, const N: usize> {
    pub x: CurveFp<C, N>,
    pub y: CurveFp<C, N>,
    pub z: CurveFp<C, N>,
    _curve: PhantomData<C>,
}

impl<C: CurveParams<N>, const N: usize> Clone for Jacobian<C, N> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: CurveParams<N>, const N: usize> Copy for Jacobian<C, N> {}

impl<C: CurveParams<N>, const N: usize> fmt::Debug for Jacobian<C, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_inf() {
            write!(f, "Jacobian(infinity)")
        } else {
            write!(f, "Jacobian({:?}, {:?}, {:?})", self.x, self.y, self.z)
        }
    }
}

impl<C: CurveParams<N>, const N: usize> Jacobian<C, N> {
    #[inline]
    pub fn new(x: CurveFp<C, N>, y: CurveFp<C, N>, z: CurveFp<C, N>) -> Self {
        Self { x, y, z, _curve: PhantomData }
    }

    #[inline]
    pub fn infinity() -> Self {
        Self::new(
            CurveFp::<C, N>::zero(),
            CurveFp::<C, N>::zero(),
            CurveFp::<C, N>::zero(),
        )
    }

    #[inline]
    pub fn generator() -> Self {
        Self::from_affine(&Affine::generator())
    }

    #[inline]
    pub fn is_inf(&self) -> bool {
        self.z.is_zero()
    }

    #[inline]
    pub fn set_inf(&mut self) {
        *self = Self::infinity();
    }

    pub fn from_affine(p: &Affine<C, N>) -> Self {
        if p.is_inf() {
            return Self::infinity();
        }
        Self::new(p.x, p.y, CurveFp::<C, N>::one())
    }

    /// Normalize to affine coordinates; one field inversion.
    pub fn to_affine(&self, ws: &mut Workspace<CurveFp<C, N>, 2>) -> Affine<C, N> {
        if self.is_inf() {
            return Affine::infinity();
        }
        if self.z == CurveFp::<C, N>::one() {
            return Affine::new(self.x, self.y);
        }
        let z_inv = self
            .z
            .inv()
            .expect("finite point has a non-zero z coordinate");
        ws[0] = z_inv.sqr();
        ws[1] = ws[0] * z_inv;
        Affine::new(self.x * ws[0], self.y * ws[1])
    }

    /// Curve membership: `y² = x³ + A·x·z⁴ + B·z⁶`. Infinity is on the
    /// curve.
    pub fn on_curve(&self, ws: &mut Workspace<CurveFp<C, N>, 4>) -> bool {
        if self.is_inf() {
            return true;
        }
        ws[2] = self.z * self.z; // z²
        ws[3] = ws[2] * ws[2]; // z⁴
        ws[1] = ws[2] * ws[3]; // z⁶
        ws[0] = self.x * ws[3]; // x z⁴
        ws[3] = C::coeff_a() * ws[0]; // A x z⁴
        ws[2] = C::coeff_b() * ws[1]; // B z⁶
        ws[0] = self.x * self.x; // x²
        ws[1] = ws[0] * self.x; // x³
        ws[1] += ws[3];
        ws[1] += ws[2]; // x³ + A x z⁴ + B z⁶
        ws[0] = self.y * self.y; // y²
        ws[0] == ws[1]
    }

    /// Equality over the Jacobian equivalence classes:
    /// `x₁·z₂² = x₂·z₁²` and `y₁·z₂³ = y₂·z₁³`.
    pub fn eq(&self, rhs: &Self, ws: &mut Workspace<CurveFp<C, N>, 4>) -> bool {
        let self_inf = self.is_inf();
        let rhs_inf = rhs.is_inf();
        if self_inf || rhs_inf {
            return self_inf == rhs_inf;
        }
        if self.z == rhs.z {
            return self.x == rhs.x && self.y == rhs.y;
        }
        ws[2] = self.z * self.z; // z₁²
        ws[3] = rhs.z * rhs.z; // z₂²
        ws[0] = self.x * ws[3]; // x₁ z₂²
        ws[1] = rhs.x * ws[2]; // x₂ z₁²
        if ws[0] != ws[1] {
            return false;
        }
        ws[0] = ws[2] * self.z; // z₁³
        ws[1] = ws[3] * rhs.z; // z₂³
        ws[2] = self.y * ws[1]; // y₁ z₂³
        ws[3] = rhs.y * ws[0]; // y₂ z₁³
        ws[2] == ws[3]
    }

    #[inline]
    pub fn negate(&self) -> Self {
        Self::new(self.x, self.y.negate(), self.z)
    }

    /// Chord addition in the 12M+4S form, with the premultiplications
    /// `a = x₁z₂²`, `b = x₂z₁²`, `c = y₁z₂³`, `d = y₂z₁³` already in
    /// `ws[0..4]`.
    fn add_distinct_inner(
        out: &mut Self,
        p: &Self,
        q: &Self,
        ws: &mut Workspace<CurveFp<C, N>, 5>,
    ) {
        ws[1] -= ws[0]; // e = b − a
        ws[3] -= ws[2]; // f = d − c
        out.z = ws[1] * ws[1]; // e²
        out.y = ws[0] * out.z; // a e²
        ws[0] = out.z * ws[1]; // e³
        out.z = ws[2] * ws[0]; // c e³
        ws[2] = out.y + out.y; // 2 a e²
        out.x = ws[3] * ws[3]; // f²
        out.x -= ws[2];
        out.x -= ws[0]; // x = f² − 2ae² − e³
        ws[0] = out.y - out.x; // a e² − x
        out.y = ws[3] * ws[0]; // f (a e² − x)
        out.y -= out.z; // y = f (a e² − x) − c e³
        ws[0] = p.z * q.z; // z₁ z₂
        out.z = ws[0] * ws[1]; // z = z₁ z₂ e
    }

    /// Load the shared premultiplications into `ws[0..4]`.
    fn premultiply(p: &Self, q: &Self, ws: &mut Workspace<CurveFp<C, N>, 5>) {
        ws[2] = q.z * q.z; // z₂²
        ws[4] = ws[2] * q.z; // z₂³
        ws[0] = ws[2] * p.x; // a = x₁ z₂²
        ws[2] = ws[4] * p.y; // c = y₁ z₂³
        ws[3] = p.z * p.z; // z₁²
        ws[4] = ws[3] * p.z; // z₁³
        ws[1] = ws[3] * q.x; // b = x₂ z₁²
        ws[3] = ws[4] * q.y; // d = y₂ z₁³
    }

    /// Chord addition. The caller guarantees `p ≠ ±q` and neither is
    /// infinity.
    pub fn add_distinct(out: &mut Self, p: &Self, q: &Self, ws: &mut Workspace<CurveFp<C, N>, 5>) {
        debug_assert!(!p.is_inf() && !q.is_inf());
        Self::premultiply(p, q, ws);
        Self::add_distinct_inner(out, p, q, ws);
    }

    /// Tangent doubling: `a = 4xy²`, `b = 3x² + A·z⁴`, `x' = b² − 2a`,
    /// `y' = b(a − x') − 8y⁴`, `z' = 2yz`.
    pub fn add_self(out: &mut Self, p: &Self, ws: &mut Workspace<CurveFp<C, N>, 2>) {
        ws[1] = p.z * p.z; // z²
        ws[0] = ws[1] * ws[1]; // z⁴
        ws[1] = C::coeff_a() * ws[0]; // A z⁴
        ws[0] = p.x * p.x; // x²
        ws[1] += ws[0];
        ws[1] += ws[0];
        ws[1] += ws[0]; // b = 3x² + A z⁴
        out.z = p.y * p.y; // y²
        ws[0] = p.x * out.z; // x y²
        ws[0].mul_pow2::<2>(); // a = 4 x y²
        out.y = ws[0] + ws[0]; // 2a
        out.x = ws[1] * ws[1]; // b²
        out.x -= out.y; // x' = b² − 2a
        ws[0] -= out.x; // a − x'
        out.y = ws[1] * ws[0]; // b (a − x')
        ws[0] = out.z * out.z; // y⁴
        ws[0].mul_pow2::<3>(); // 8 y⁴
        out.y -= ws[0]; // y' = b(a − x') − 8y⁴
        out.z = p.y * p.z; // y z
        out.z.mul_pow2::<1>(); // z' = 2 y z
    }

    /// General addition: handles infinity on either side, dispatches to
    /// doubling when `p = q`, and reuses the shared premultiplications for
    /// the distinct case.
    pub fn add(out: &mut Self, p: &Self, q: &Self, ws: &mut Workspace<CurveFp<C, N>, 5>) {
        if p.is_inf() {
            *out = *q;
            return;
        }
        if q.is_inf() {
            *out = *p;
            return;
        }
        Self::premultiply(p, q, ws);
        if ws[0] == ws[1] {
            if ws[2] == ws[3] {
                Self::add_self(out, p, narrow(ws));
            } else {
                // same x, opposite y
                out.set_inf();
            }
            return;
        }
        Self::add_distinct_inner(out, p, q, ws);
    }

    /// Left-to-right double-and-add; `k = 0` yields infinity.
    pub fn scalar_mul<LS: Limb, const NS: usize>(
        out: &mut Self,
        k: &Uint<LS, NS>,
        p: &Self,
        ws: &mut Workspace<CurveFp<C, N>, 5>,
    ) {
        if k.is_zero() {
            out.set_inf();
            return;
        }
        let mut acc = *p;
        for i in (0..k.bit_length() - 1).rev() {
            let mut doubled = Self::infinity();
            Self::add_self(&mut doubled, &acc, narrow(ws));
            if k.bit(i) {
                let mut sum = Self::infinity();
                Self::add(&mut sum, &doubled, p, ws);
                acc = sum;
            } else {
                acc = doubled;
            }
        }
        *out = acc;
    }
}

impl<C: CurveParams<N>, const N: usize> PartialEq for Jacobian<C, N> {
    fn eq(&self, rhs: &Self) -> bool {
        let mut ws = workspace();
        Jacobian::eq(self, rhs, &mut ws)
    }
}

impl<C: CurveParams<N>, const N: usize> Eq for Jacobian<C, N> {}

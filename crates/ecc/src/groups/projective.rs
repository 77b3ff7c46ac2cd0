use std::fmt;
use std::marker::PhantomData;

use kanga_numeric::{Limb, Uint};

use crate::groups::affine::Affine;
use crate::groups::curve_params::{CurveFp, CurveParams};
use crate::workspace::{workspace, Workspace};

/// A curve point in homogeneous projective coordinates `(X : Y : Z)`,
/// representing the affine point `(X/Z, Y/Z)`; `Z = 0` encodes infinity.
pub struct Projective<C: CurveParams<N>, const N: usize> {
    pub x: CurveFp<C, N>,
    pub y: CurveFp<C, N>,
    pub z: CurveFp<C, N>,
    _curve: PhantomData<C>,
}

impl<C: CurveParams<N>, const N: usize> Clone for Projective<C, N> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: CurveParams<N>, const N: usize> Copy for Projective<C, N> {}

impl<C: CurveParams<N>, const N: usize> fmt::Debug for Projective<C, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_inf() {
            write!(f, "Projective(infinity)")
        } else {
            write!(f, "Projective({:?}, {:?}, {:?})", self.x, self.y, self.z)
        }
    }
}

impl<C: CurveParams<N>, const N: usize> Projective<C, N> {
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
    pub fn to_affine(&self, ws: &mut Workspace<CurveFp<C, N>, 1>) -> Affine<C, N> {
        if self.is_inf() {
            return Affine::infinity();
        }
        if self.z == CurveFp::<C, N>::one() {
            return Affine::new(self.x, self.y);
        }
        ws[0] = self
            .z
            .inv()
            .expect("finite point has a non-zero z coordinate");
        Affine::new(self.x * ws[0], self.y * ws[0])
    }

    /// Curve membership: `y²·z = x³ + A·x·z² + B·z³`. Infinity is on the
    /// curve.
    pub fn on_curve(&self, ws: &mut Workspace<CurveFp<C, N>, 4>) -> bool {
        if self.is_inf() {
            return true;
        }
        ws[0] = self.z * self.z; // z²
        ws[1] = ws[0] * self.z; // z³
        ws[2] = C::coeff_b() * ws[1]; // B z³
        ws[3] = C::coeff_a() * self.x; // A x
        ws[3] *= ws[0]; // A x z²
        ws[2] += ws[3];
        ws[0] = self.x * self.x; // x²
        ws[1] = ws[0] * self.x; // x³
        ws[1] += ws[2]; // x³ + A x z² + B z³
        ws[0] = self.y * self.y;
        ws[0] *= self.z; // y² z
        ws[0] == ws[1]
    }

    /// Equality over the projective equivalence classes:
    /// `x₁·z₂ = x₂·z₁` and `y₁·z₂ = y₂·z₁`.
    pub fn eq(&self, rhs: &Self, ws: &mut Workspace<CurveFp<C, N>, 2>) -> bool {
        let self_inf = self.is_inf();
        let rhs_inf = rhs.is_inf();
        if self_inf || rhs_inf {
            return self_inf == rhs_inf;
        }
        if self.z == rhs.z {
            return self.x == rhs.x && self.y == rhs.y;
        }
        ws[0] = self.x * rhs.z;
        ws[1] = rhs.x * self.z;
        if ws[0] != ws[1] {
            return false;
        }
        ws[0] = self.y * rhs.z;
        ws[1] = rhs.y * self.z;
        ws[0] == ws[1]
    }

    #[inline]
    pub fn negate(&self) -> Self {
        Self::new(self.x, self.y.negate(), self.z)
    }

    /// Chord addition with `u = y₂z₁ − y₁z₂` and `v = x₂z₁ − x₁z₂` already
    /// in `ws[3]` and `ws[4]`, and the products `y₁z₂`, `x₁z₂`, `z₁z₂` in
    /// `ws[0..3]`.
    fn add_distinct_inner(out: &mut Self, ws: &mut Workspace<CurveFp<C, N>, 6>) {
        out.y = ws[4] * ws[4]; // v²
        out.z = out.y * ws[4]; // v³
        out.y *= ws[1]; // r = v² x₁z₂
        out.x = ws[3] * ws[3]; // u²
        out.x *= ws[2]; // u² z₁z₂
        out.x -= out.z;
        ws[5] = out.y + out.y;
        out.x -= ws[5]; // a = u²z₁z₂ − v³ − 2r
        ws[5] = out.y - out.x; // r − a
        ws[1] = out.z * ws[0]; // v³ y₁z₂
        out.y = ws[3] * ws[5]; // u (r − a)
        out.y -= ws[1]; // y = u(r − a) − v³ y₁z₂
        out.x = ws[4] * out.x; // x = v a
        out.z *= ws[2]; // z = v³ z₁z₂
    }

    /// Load `y₁z₂`, `x₁z₂`, `z₁z₂`, `u`, `v` into `ws[0..5]`.
    fn premultiply(p: &Self, q: &Self, ws: &mut Workspace<CurveFp<C, N>, 6>) {
        ws[0] = p.y * q.z; // y₁ z₂
        ws[1] = p.x * q.z; // x₁ z₂
        ws[2] = p.z * q.z; // z₁ z₂
        ws[5] = q.y * p.z;
        ws[3] = ws[5] - ws[0]; // u = y₂z₁ − y₁z₂
        ws[5] = q.x * p.z;
        ws[4] = ws[5] - ws[1]; // v = x₂z₁ − x₁z₂
    }

    /// Chord addition. The caller guarantees `p ≠ ±q` and neither is
    /// infinity.
    pub fn add_distinct(out: &mut Self, p: &Self, q: &Self, ws: &mut Workspace<CurveFp<C, N>, 6>) {
        debug_assert!(!p.is_inf() && !q.is_inf());
        Self::premultiply(p, q, ws);
        Self::add_distinct_inner(out, ws);
    }

    /// Tangent doubling: `w = A·z² + 3x²`, `s = 2yz`, `r = ys`,
    /// `b = (x + r)² − x² − r²`, `h = w² − 2b`, `x' = hs`,
    /// `y' = w(b − h) − 2r²`, `z' = s³`.
    pub fn add_self(out: &mut Self, p: &Self, ws: &mut Workspace<CurveFp<C, N>, 6>) {
        ws[0] = p.x * p.x; // x²
        ws[1] = p.z * p.z; // z²
        ws[2] = C::coeff_a() * ws[1]; // A z²
        ws[3] = ws[0] + ws[0];
        ws[3] += ws[0];
        ws[2] += ws[3]; // w = A z² + 3x²
        ws[3] = p.y * p.z;
        ws[3] += ws[3]; // s = 2 y z
        ws[4] = ws[3] * ws[3]; // s²
        out.z = ws[3] * ws[4]; // z' = s³
        ws[4] = p.y * ws[3]; // r = y s
        ws[5] = ws[4] * ws[4]; // r²
        ws[1] = p.x + ws[4]; // x + r
        ws[1] = ws[1] * ws[1];
        ws[1] -= ws[0];
        ws[1] -= ws[5]; // b = (x+r)² − x² − r²
        ws[0] = ws[2] * ws[2]; // w²
        ws[4] = ws[1] + ws[1];
        ws[0] -= ws[4]; // h = w² − 2b
        out.x = ws[0] * ws[3]; // x' = h s
        out.y = ws[1] - ws[0]; // b − h
        out.y *= ws[2]; // w (b − h)
        ws[4] = ws[5] + ws[5];
        out.y -= ws[4]; // y' = w(b − h) − 2r²
    }

    /// General addition: handles infinity on either side, dispatches to
    /// doubling when `p = q`, and reuses the shared premultiplications for
    /// the distinct case.
    pub fn add(out: &mut Self, p: &Self, q: &Self, ws: &mut Workspace<CurveFp<C, N>, 6>) {
        if p.is_inf() {
            *out = *q;
            return;
        }
        if q.is_inf() {
            *out = *p;
            return;
        }
        Self::premultiply(p, q, ws);
        if ws[4].is_zero() {
            if ws[3].is_zero() {
                Self::add_self(out, p, ws);
            } else {
                // same x, opposite y
                out.set_inf();
            }
            return;
        }
        Self::add_distinct_inner(out, ws);
    }

    /// Left-to-right double-and-add; `k = 0` yields infinity.
    pub fn scalar_mul<LS: Limb, const NS: usize>(
        out: &mut Self,
        k: &Uint<LS, NS>,
        p: &Self,
        ws: &mut Workspace<CurveFp<C, N>, 6>,
    ) {
        if k.is_zero() {
            out.set_inf();
            return;
        }
        let mut acc = *p;
        for i in (0..k.bit_length() - 1).rev() {
            let mut doubled = Self::infinity();
            Self::add_self(&mut doubled, &acc, ws);
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

impl<C: CurveParams<N>, const N: usize> PartialEq for Projective<C, N> {
    fn eq(&self, rhs: &Self) -> bool {
        let mut ws = workspace();
        Projective::eq(self, rhs, &mut ws)
    }
}

impl<C: CurveParams<N>, const N: usize> Eq for Projective<C, N> {}

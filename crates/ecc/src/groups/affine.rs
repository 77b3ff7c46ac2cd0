use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use rand::Rng;

use kanga_numeric::{Limb, Uint};

use crate::groups::curve_params::{CurveFp, CurveParams};

/// Domain-separation tag folded into point hashes ahead of the coordinates.
const AFFINE_HASH_TAG: u8 = 0x01;

/// A curve point in affine coordinates `(x, y)` with an explicit
/// point-at-infinity flag.
///
/// This is the canonical point form: it is the only one implementing
/// `Hash`, so maps keyed by points cannot accidentally use a non-canonical
/// projective representation.
pub struct Affine<C: CurveParams<N>, const N: usize> {
    pub x: CurveFp<C, N>,
    pub y: CurveFp<C, N>,
    infinity: bool,
    _curve: PhantomData<C>,
}

impl<C: CurveParams<N>, const N: usize> Clone for Affine<C, N> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: CurveParams<N>, const N: usize> Copy for Affine<C, N> {}

impl<C: CurveParams<N>, const N: usize> fmt::Debug for Affine<C, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.infinity {
            write!(f, "Affine(infinity)")
        } else {
            write!(f, "Affine({:?}, {:?})", self.x, self.y)
        }
    }
}

impl<C: CurveParams<N>, const N: usize> PartialEq for Affine<C, N> {
    fn eq(&self, rhs: &Self) -> bool {
        if self.infinity || rhs.infinity {
            return self.infinity == rhs.infinity;
        }
        self.x == rhs.x && self.y == rhs.y
    }
}

impl<C: CurveParams<N>, const N: usize> Eq for Affine<C, N> {}

impl<C: CurveParams<N>, const N: usize> Hash for Affine<C, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(AFFINE_HASH_TAG);
        state.write_u8(self.infinity as u8);
        if !self.infinity {
            self.x.hash(state);
            self.y.hash(state);
        }
    }
}

impl<C: CurveParams<N>, const N: usize> Affine<C, N> {
    #[inline]
    pub fn new(x: CurveFp<C, N>, y: CurveFp<C, N>) -> Self {
        Self { x, y, infinity: false, _curve: PhantomData }
    }

    #[inline]
    pub fn infinity() -> Self {
        Self {
            x: CurveFp::<C, N>::zero(),
            y: CurveFp::<C, N>::zero(),
            infinity: true,
            _curve: PhantomData,
        }
    }

    #[inline]
    pub fn generator() -> Self {
        Self::new(C::generator_x(), C::generator_y())
    }

    #[inline]
    pub fn is_inf(&self) -> bool {
        self.infinity
    }

    #[inline]
    pub fn set_inf(&mut self) {
        *self = Self::infinity();
    }

    /// Curve membership: `y² = x³ + A·x + B`. Infinity is on the curve.
    pub fn on_curve(&self) -> bool {
        if self.infinity {
            return true;
        }
        let rhs = (self.x.sqr() + C::coeff_a()) * self.x + C::coeff_b();
        self.y.sqr() == rhs
    }

    #[inline]
    pub fn negate(&self) -> Self {
        if self.infinity {
            return *self;
        }
        Self::new(self.x, self.y.negate())
    }

    /// Chord addition. The caller guarantees `p ≠ ±q` and neither is
    /// infinity; a violated precondition degrades to infinity in release
    /// builds.
    pub fn add_distinct(out: &mut Self, p: &Self, q: &Self) {
        debug_assert!(!p.infinity && !q.infinity);
        debug_assert!(p.x != q.x);
        let Ok(slope_den) = (q.x - p.x).inv() else {
            out.set_inf();
            return;
        };
        let lambda = (q.y - p.y) * slope_den;
        let x = lambda.sqr() - p.x - q.x;
        let y = lambda * (p.x - x) - p.y;
        *out = Self::new(x, y);
    }

    /// Tangent doubling. Doubling a 2-torsion point (`y = 0`) or infinity
    /// yields infinity.
    pub fn add_self(out: &mut Self, p: &Self) {
        if p.infinity || p.y.is_zero() {
            out.set_inf();
            return;
        }
        let Ok(tangent_den) = (p.y + p.y).inv() else {
            out.set_inf();
            return;
        };
        let mut numerator = p.x.sqr();
        let double = numerator;
        numerator += double;
        numerator += double;
        let lambda = (numerator + C::coeff_a()) * tangent_den;
        let x = lambda.sqr() - p.x - p.x;
        let y = lambda * (p.x - x) - p.y;
        *out = Self::new(x, y);
    }

    /// General addition with all point-at-infinity and doubling edge cases.
    pub fn add(out: &mut Self, p: &Self, q: &Self) {
        if p.infinity {
            *out = *q;
            return;
        }
        if q.infinity {
            *out = *p;
            return;
        }
        if p.x == q.x {
            if p.y == q.y {
                Self::add_self(out, p);
            } else {
                out.set_inf();
            }
            return;
        }
        Self::add_distinct(out, p, q);
    }

    /// Left-to-right double-and-add; `k = 0` yields infinity.
    pub fn scalar_mul<LS: Limb, const NS: usize>(out: &mut Self, k: &Uint<LS, NS>, p: &Self) {
        if k.is_zero() {
            out.set_inf();
            return;
        }
        let mut acc = *p;
        for i in (0..k.bit_length() - 1).rev() {
            let mut doubled = Self::infinity();
            Self::add_self(&mut doubled, &acc);
            if k.bit(i) {
                let mut sum = Self::infinity();
                Self::add(&mut sum, &doubled, p);
                acc = sum;
            } else {
                acc = doubled;
            }
        }
        *out = acc;
    }

    /// Recover a point from an x coordinate and the parity of `y`; `None`
    /// if `x³ + A·x + B` is a non-residue.
    pub fn from_x_coordinate<R: Rng + ?Sized>(
        x: CurveFp<C, N>,
        y_is_odd: bool,
        rng: &mut R,
    ) -> Option<Self> {
        let rhs = (x.sqr() + C::coeff_a()) * x + C::coeff_b();
        let (is_residue, y) = rhs.sqrt(rng);
        if !is_residue {
            return None;
        }
        let parity = y.from_montgomery().as_uint().bit(0);
        let y = if parity == y_is_odd { y } else { y.negate() };
        Some(Self::new(x, y))
    }
}

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand::Rng;

use kanga_numeric::{Limb, Uint};

use crate::error::FieldError;
use crate::fields::params::{FieldParams, GroupParams};

/// An element of the additive group modulo `P::MODULUS` and, when `P` also
/// supplies Montgomery constants, of the prime field.
///
/// The value is kept fully reduced to `[0, M)` by every operation, so limb
/// comparison is value comparison. Field multiplication expects both
/// operands in Montgomery form; conversion in and out is explicit via
/// [`to_montgomery`](Self::to_montgomery) and
/// [`from_montgomery`](Self::from_montgomery).
pub struct Fp<P: GroupParams<N>, const N: usize> {
    uint: Uint<P::Limb, N>,
    _params: PhantomData<P>,
}

impl<P: GroupParams<N>, const N: usize> Clone for Fp<P, N> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: GroupParams<N>, const N: usize> Copy for Fp<P, N> {}

impl<P: GroupParams<N>, const N: usize> PartialEq for Fp<P, N> {
    #[inline]
    fn eq(&self, rhs: &Self) -> bool {
        self.uint == rhs.uint
    }
}

impl<P: GroupParams<N>, const N: usize> Eq for Fp<P, N> {}

impl<P: GroupParams<N>, const N: usize> Ord for Fp<P, N> {
    #[inline]
    fn cmp(&self, rhs: &Self) -> Ordering {
        self.uint.cmp(&rhs.uint)
    }
}

impl<P: GroupParams<N>, const N: usize> PartialOrd for Fp<P, N> {
    #[inline]
    fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}

impl<P: GroupParams<N>, const N: usize> Hash for Fp<P, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uint.hash(state);
    }
}

impl<P: GroupParams<N>, const N: usize> Default for Fp<P, N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<P: GroupParams<N>, const N: usize> fmt::Debug for Fp<P, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fp({:?})", self.uint)
    }
}

// ---------------------------------------------------------------------------
// Add-group operations
// ---------------------------------------------------------------------------

impl<P: GroupParams<N>, const N: usize> Fp<P, N> {
    #[inline]
    const fn wrap(uint: Uint<P::Limb, N>) -> Self {
        Self { uint, _params: PhantomData }
    }

    /// The modulus as a plain integer.
    #[inline]
    pub fn modulus() -> Uint<P::Limb, N> {
        Uint::new(P::MODULUS)
    }

    #[inline]
    pub fn zero() -> Self {
        Self::wrap(Uint::zero())
    }

    /// Wrap a reduced value. The value must already be below the modulus.
    pub fn new(uint: Uint<P::Limb, N>) -> Self {
        debug_assert!(uint < Self::modulus(), "value not reduced");
        debug_assert_eq!(
            P::HAS_SPARE_BIT,
            !Self::modulus().bit(Uint::<P::Limb, N>::BITS - 1),
            "HAS_SPARE_BIT contradicts the modulus"
        );
        Self::wrap(uint)
    }

    /// Construct from limbs spelled most-significant first.
    pub fn from_be(limbs: [P::Limb; N]) -> Self {
        Self::new(Uint::from_be(limbs))
    }

    /// Construct from a small integer; must be below the modulus.
    pub fn from_u64(v: u64) -> Self {
        Self::new(Uint::from_u64(v))
    }

    /// The value `2^e`; must be below the modulus.
    pub fn pow2(e: u32) -> Self {
        let mut uint = Uint::zero();
        uint.set_pow2(e);
        Self::new(uint)
    }

    #[inline]
    pub fn as_uint(&self) -> &Uint<P::Limb, N> {
        &self.uint
    }

    #[inline]
    pub fn into_uint(self) -> Uint<P::Limb, N> {
        self.uint
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.uint.is_zero()
    }

    #[inline]
    pub fn bit_length(&self) -> u32 {
        self.uint.bit_length()
    }

    /// `(self + rhs) mod M`.
    pub fn add(&self, rhs: &Self) -> Self {
        let modulus = Self::modulus();
        let (mut sum, carry) = self.uint.carrying_add(&rhs.uint);
        if (!P::HAS_SPARE_BIT && carry) || sum >= modulus {
            sum.sub_assign_borrow(&modulus);
        }
        Self::wrap(sum)
    }

    /// `(self − rhs) mod M`.
    pub fn sub(&self, rhs: &Self) -> Self {
        let (mut diff, borrow) = self.uint.borrowing_sub(&rhs.uint);
        if borrow {
            diff.add_assign_carry(&Self::modulus());
        }
        Self::wrap(diff)
    }

    /// `−self mod M`.
    pub fn negate(&self) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        let (diff, borrow) = Self::modulus().borrowing_sub(&self.uint);
        debug_assert!(!borrow);
        Self::wrap(diff)
    }

    /// `self · 2^K mod M`, one shift-and-reduce step per bit.
    ///
    /// With a spare top bit the shifted-out carry cannot occur and the check
    /// folds away; otherwise the carry participates in the reduction test.
    pub fn mul_pow2<const K: u32>(&mut self) {
        let modulus = Self::modulus();
        for _ in 0..K {
            let carry = self.uint.shl1();
            if (!P::HAS_SPARE_BIT && carry) || self.uint >= modulus {
                self.uint.sub_assign_borrow(&modulus);
            }
        }
    }

    /// Double in place; same as `mul_pow2::<1>`.
    #[inline]
    pub fn double_in_place(&mut self) {
        self.mul_pow2::<1>();
    }
}

// ---------------------------------------------------------------------------
// Sampling
// ---------------------------------------------------------------------------

impl<P: GroupParams<N>, const N: usize> Fp<P, N> {
    /// A uniformly random element of `[0, M)`.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::wrap(Uint::sample_below(&Self::modulus(), rng))
    }

    /// A uniformly random element of `[1, M)`.
    pub fn sample_non_zero<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let candidate = Self::sample(rng);
            if !candidate.is_zero() {
                return candidate;
            }
        }
    }

    /// A uniformly random element of `[0, upper)`.
    pub fn sample_below<R: Rng + ?Sized>(upper: &Self, rng: &mut R) -> Self {
        Self::wrap(Uint::sample_below(&upper.uint, rng))
    }

    /// A uniformly random element of `[0, upper]`.
    pub fn sample_below_inclusive<R: Rng + ?Sized>(upper: &Self, rng: &mut R) -> Self {
        Self::wrap(Uint::sample_below_inclusive(&upper.uint, rng))
    }

    /// A uniformly random element of `[lower, upper)`.
    pub fn sample_range<R: Rng + ?Sized>(lower: &Self, upper: &Self, rng: &mut R) -> Self {
        Self::wrap(Uint::sample_range(&lower.uint, &upper.uint, rng))
    }

    /// A uniformly random element of `[lower, upper]`.
    pub fn sample_range_inclusive<R: Rng + ?Sized>(
        lower: &Self,
        upper: &Self,
        rng: &mut R,
    ) -> Self {
        Self::wrap(Uint::sample_range_inclusive(&lower.uint, &upper.uint, rng))
    }
}

// ---------------------------------------------------------------------------
// Montgomery field operations
// ---------------------------------------------------------------------------

impl<P: FieldParams<N>, const N: usize> Fp<P, N> {
    /// One in Montgomery form.
    #[inline]
    pub fn one() -> Self {
        Self::new(Uint::new(P::ONE_R))
    }

    /// Montgomery multiplication: `self · rhs · R⁻¹ mod M`, interleaved
    /// multiply-reduce (CIOS). For operands below `M` the result is below
    /// `M`.
    pub fn mont_mul(&self, rhs: &Self) -> Self {
        let m = P::MODULUS;
        debug_assert!(
            m[0] & P::Limb::ONE == P::Limb::ONE,
            "Montgomery arithmetic requires an odd modulus"
        );
        let mut t = [P::Limb::ZERO; N];
        let mut t_hi = P::Limb::ZERO;
        let mut t_top = P::Limb::ZERO;

        for i in 0..N {
            let a_i = self.uint.limbs[i];

            let mut carry = P::Limb::ZERO;
            for j in 0..N {
                let (lo, hi) = t[j].mac(a_i, rhs.uint.limbs[j], carry);
                t[j] = lo;
                carry = hi;
            }
            let (lo, overflow) = t_hi.adc(carry, false);
            t_hi = lo;
            t_top = if overflow { P::Limb::ONE } else { P::Limb::ZERO };

            let q = t[0].wrapping_mul(P::NEG_INV);
            let (_, mut carry) = t[0].mac(q, m[0], P::Limb::ZERO);
            for j in 1..N {
                let (lo, hi) = t[j].mac(q, m[j], carry);
                t[j - 1] = lo;
                carry = hi;
            }
            let (lo, overflow) = t_hi.adc(carry, false);
            t[N - 1] = lo;
            t_hi = if overflow { t_top.adc(P::Limb::ONE, false).0 } else { t_top };
        }

        let mut out = Uint::new(t);
        let modulus = Self::modulus();
        if t_hi != P::Limb::ZERO || out >= modulus {
            out.sub_assign_borrow(&modulus);
        }
        Self::wrap(out)
    }

    /// Montgomery squaring.
    #[inline]
    pub fn sqr(&self) -> Self {
        self.mont_mul(self)
    }

    /// `self · R mod M`.
    pub fn to_montgomery(&self) -> Self {
        self.mont_mul(&Self::new(Uint::new(P::R_SQUARED)))
    }

    /// `self · R⁻¹ mod M`.
    pub fn from_montgomery(&self) -> Self {
        self.mont_mul(&Self::wrap(Uint::one()))
    }

    /// Square-and-multiply exponentiation, most significant bit first.
    /// `pow(b, 0)` is one in Montgomery form; `pow(b, 1)` is `b`.
    pub fn pow(&self, exp: &Uint<P::Limb, N>) -> Self {
        if exp.is_zero() {
            return Self::one();
        }
        if self.is_zero() {
            return Self::zero();
        }
        let mut acc = *self;
        for i in (0..exp.bit_length() - 1).rev() {
            acc = acc.sqr();
            if exp.bit(i) {
                acc = acc.mont_mul(self);
            }
        }
        acc
    }

    /// Exponentiation by a small exponent.
    pub fn pow_u64(&self, exp: u64) -> Self {
        if exp == 0 {
            return Self::one();
        }
        if self.is_zero() {
            return Self::zero();
        }
        let mut acc = *self;
        for i in (0..63 - exp.leading_zeros()).rev() {
            acc = acc.sqr();
            if (exp >> i) & 1 == 1 {
                acc = acc.mont_mul(self);
            }
        }
        acc
    }

    /// Montgomery inversion via Kaliski's almost-inverse:
    /// `inv(a·R) = a⁻¹·R`.
    ///
    /// Phase 1 computes `(a·R)⁻¹ · 2^k mod M` for some `k ∈ [n, 2·N·W]`;
    /// the intermediate `r` and `s` stay below `2M`, which can exceed the
    /// limb width for full-width moduli, so each carries an explicit
    /// overflow bit. Phase 2 multiplies by `2^(2·N·W − k)` through modular
    /// doubling.
    pub fn inv(&self) -> Result<Self, FieldError> {
        if self.is_zero() {
            return Err(FieldError::UndefinedInverse);
        }
        let modulus = Self::modulus();
        let full_width = 2 * Uint::<P::Limb, N>::BITS;

        let mut u = modulus;
        let mut v = self.uint;
        let mut r = Uint::zero();
        let mut r_hi = false;
        let mut s = Uint::one();
        let mut s_hi = false;
        let mut k = 0u32;

        while !v.is_zero() {
            if !u.bit(0) {
                u.shr1();
                debug_assert!(!s_hi);
                s_hi = s.shl1();
            } else if !v.bit(0) {
                v.shr1();
                debug_assert!(!r_hi);
                r_hi = r.shl1();
            } else if u > v {
                u.sub_assign_borrow(&v);
                u.shr1();
                let carry = r.add_assign_carry(&s);
                let hi = r_hi as u8 + s_hi as u8 + carry as u8;
                debug_assert!(hi <= 1);
                r_hi = hi == 1;
                debug_assert!(!s_hi);
                s_hi = s.shl1();
            } else {
                v.sub_assign_borrow(&u);
                v.shr1();
                let carry = s.add_assign_carry(&r);
                let hi = s_hi as u8 + r_hi as u8 + carry as u8;
                debug_assert!(hi <= 1);
                s_hi = hi == 1;
                debug_assert!(!r_hi);
                r_hi = r.shl1();
            }
            k += 1;
        }
        debug_assert!(u == Uint::one(), "input not coprime with the modulus");
        debug_assert!(k <= full_width);

        if r_hi || r >= modulus {
            let borrow = r.sub_assign_borrow(&modulus);
            debug_assert_eq!(borrow, r_hi);
        }
        debug_assert!(!r.is_zero());
        let (diff, borrow) = modulus.borrowing_sub(&r);
        debug_assert!(!borrow);

        let mut out = Self::wrap(diff);
        for _ in 0..full_width - k {
            out.double_in_place();
        }
        Ok(out)
    }

    /// Modular square root of a Montgomery-form element.
    ///
    /// Returns `(true, r)` with `r² = self` for residues and `(false, 0)`
    /// otherwise. When `M ≡ 3 (mod 4)` the root is a single exponentiation;
    /// the general Tonelli–Shanks branch draws non-residue candidates from
    /// `rng`.
    pub fn sqrt<R: Rng + ?Sized>(&self, rng: &mut R) -> (bool, Self) {
        if self.is_zero() {
            return (true, Self::zero());
        }
        let modulus = Self::modulus();

        if modulus.bit(0) && modulus.bit(1) {
            let mut exp = modulus;
            exp.shr1();
            exp.shr1();
            let carry = exp.add_assign_carry(&Uint::one());
            debug_assert!(!carry);
            let root = self.pow(&exp);
            return if root.sqr() == *self {
                (true, root)
            } else {
                (false, Self::zero())
            };
        }

        let mut half = modulus;
        half.shr1();
        if self.pow(&half) != Self::one() {
            return (false, Self::zero());
        }

        // M − 1 = Q · 2^S with Q odd
        let mut q = modulus;
        q.sub_assign_borrow(&Uint::one());
        let mut s = 0u32;
        while !q.bit(0) {
            q.shr1();
            s += 1;
        }

        let neg_one = Self::one().negate();
        let z = loop {
            let candidate = Self::sample_non_zero(rng).to_montgomery();
            if candidate.pow(&half) == neg_one {
                break candidate;
            }
        };

        let mut m = s;
        let mut c = z.pow(&q);
        let mut t = self.pow(&q);
        let mut r = {
            let mut exp = q;
            exp.shr1();
            let carry = exp.add_assign_carry(&Uint::one());
            debug_assert!(!carry);
            self.pow(&exp)
        };

        loop {
            if t == Self::one() {
                return (true, r);
            }
            let mut i = 1u32;
            let mut probe = t.sqr();
            while probe != Self::one() {
                probe = probe.sqr();
                i += 1;
                if i >= m {
                    return (false, Self::zero());
                }
            }
            let mut b = c;
            for _ in 0..m - i - 1 {
                b = b.sqr();
            }
            m = i;
            c = b.sqr();
            t = t.mont_mul(&c);
            r = r.mont_mul(&b);
        }
    }
}

// ---------------------------------------------------------------------------
// Operator impls
// ---------------------------------------------------------------------------

impl<P: GroupParams<N>, const N: usize> Add for Fp<P, N> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Fp::add(&self, &rhs)
    }
}

impl<P: GroupParams<N>, const N: usize> AddAssign for Fp<P, N> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = Fp::add(self, &rhs);
    }
}

impl<P: GroupParams<N>, const N: usize> Sub for Fp<P, N> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Fp::sub(&self, &rhs)
    }
}

impl<P: GroupParams<N>, const N: usize> SubAssign for Fp<P, N> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = Fp::sub(self, &rhs);
    }
}

impl<P: GroupParams<N>, const N: usize> Neg for Fp<P, N> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.negate()
    }
}

impl<P: FieldParams<N>, const N: usize> Mul for Fp<P, N> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mont_mul(&rhs)
    }
}

impl<P: FieldParams<N>, const N: usize> MulAssign for Fp<P, N> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.mont_mul(&rhs);
    }
}

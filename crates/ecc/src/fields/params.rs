use kanga_numeric::Limb;

/// Parameters of an additive group modulo `M`, stored as `N` limbs.
///
/// Implementations are zero-sized marker types; all data lives in associated
/// constants so the compiler can fold the modulus into each operation.
pub trait GroupParams<const N: usize>: 'static + Send + Sync + Sized {
    type Limb: Limb;

    /// The modulus, little-endian limbs.
    const MODULUS: [Self::Limb; N];

    /// True iff `M < 2^(N·W − 1)`, i.e. the top bit of the top limb is
    /// clear. Reduction skips carry tracking when set; stating the wrong
    /// value is a silent correctness bug, so constructors cross-check it in
    /// debug builds.
    const HAS_SPARE_BIT: bool;
}

/// Montgomery-multiplication parameters for an odd prime modulus, with
/// radix `R = 2^(N·W)`.
pub trait FieldParams<const N: usize>: GroupParams<N> {
    /// `−M⁻¹ mod 2^W`.
    const NEG_INV: Self::Limb;

    /// `R² mod M`; multiplying by it converts into Montgomery form.
    const R_SQUARED: [Self::Limb; N];

    /// `R mod M` — one in Montgomery form.
    const ONE_R: [Self::Limb; N];
}

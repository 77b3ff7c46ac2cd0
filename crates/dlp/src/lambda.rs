use rand::Rng;

use kanga_ecc::fields::{Fp, GroupParams};
use kanga_ecc::groups::CurvePoint;

use crate::error::SolveError;

/// Build the pseudo-random walk table: a uniformly random permutation `σ` of
/// `{0, …, m−1}` spelled as step scalars `s[i] = 2^σ(i)` with their
/// precomputed points `[s[i]]·g`.
pub(crate) fn build_jump_table<S, P, R, const NS: usize, const NB: usize>(
    m: usize,
    g: &P,
    rng: &mut R,
) -> (Vec<Fp<S, NS>>, Vec<P>)
where
    S: GroupParams<NS>,
    P: CurvePoint<NB>,
    R: Rng + ?Sized,
{
    let mut exponents: Vec<u32> = (0..m as u32).collect();
    for i in (1..m).rev() {
        let j = rng.random_range(0..=i);
        exponents.swap(i, j);
    }
    let steps: Vec<Fp<S, NS>> = exponents.iter().map(|&e| Fp::pow2(e)).collect();
    let points: Vec<P> = steps.iter().map(|s| g.mul_uint(s.as_uint())).collect();
    (steps, points)
}

/// Pollard's λ method on the interval `[a, b)`: given `h = [x]·g` with
/// `a ≤ x < b`, recover `x`.
///
/// A tame kangaroo starts from a known random scalar in the interval and
/// walks `bound` steps; the wild kangaroo starts from `h` and follows the
/// same jump table, testing against the tame endpoint at every step. A
/// missed collision restarts the whole procedure with a fresh permutation,
/// so the solver only returns on success; `bound` trades walk length
/// against the number of restarts.
pub fn pollard_lambda<S, P, R, const NS: usize, const NB: usize>(
    bound: u64,
    a: &Fp<S, NS>,
    b: &Fp<S, NS>,
    g: &P,
    h: &P,
    rng: &mut R,
) -> Result<Fp<S, NS>, SolveError>
where
    S: GroupParams<NS>,
    P: CurvePoint<NB>,
    R: Rng,
{
    if a >= b {
        return Err(SolveError::EmptyInterval);
    }
    let width = b.sub(a);
    let m = width.bit_length().saturating_sub(1) as usize;
    if m == 0 {
        // single-element interval
        return Ok(*a);
    }

    loop {
        let (steps, points) = build_jump_table(m, g, rng);

        // tame walk
        let mut x = Fp::sample_range_inclusive(a, b, rng);
        let mut u = g.mul_uint(x.as_uint()).normalize();
        for _ in 0..bound {
            let i = (u.x_word() % m as u64) as usize;
            x = x.add(&steps[i]);
            u = u.add_full(&points[i]).normalize();
        }

        // wild walk
        let mut d = Fp::<S, NS>::zero();
        let mut v = h.normalize();
        for _ in 0..bound {
            if u.eq_point(&v) {
                return Ok(x.sub(&d));
            }
            let i = (v.x_word() % m as u64) as usize;
            d = d.add(&steps[i]);
            v = v.add_full(&points[i]).normalize();
        }
    }
}

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use kanga_numeric::Uint;

use crate::curves::m160::{Fp160, Fp160W};
use crate::curves::secp160r1::{
    Secp160r1Affine, Secp160r1Fq, Secp160r1Jacobian, Secp160r1Params, Secp160r1Projective,
    Secp160r1Scalar,
};
use crate::curves::tiny::{TinyJacobian, TinyScalar};
use crate::error::FieldError;
use crate::groups::CurvePoint;
use crate::workspace::workspace;

// =========================================================================
// Add-group arithmetic over the 160-bit test prime
// =========================================================================

#[test]
fn fp160_neg_known_values() {
    assert!(Fp160::zero().negate().is_zero());

    let minus_one = Fp160::from_u64(1).negate();
    assert_eq!(
        minus_one,
        Fp160::from_be([0xb77902ab, 0xd8db9627, 0xf5d7ceca, 0x5c17ef6c, 0x5e3b0968])
    );
    assert_eq!(minus_one.negate(), Fp160::from_u64(1));

    let half = Fp160::from_be([0x5bbc8155, 0xec6dcb13, 0xfaebe765, 0x2e0bf7b6, 0x2f1d84b4]);
    assert_eq!(
        half.negate(),
        Fp160::from_be([0x5bbc8155, 0xec6dcb13, 0xfaebe765, 0x2e0bf7b6, 0x2f1d84b5])
    );
}

#[test]
fn fp160_add_known_values() {
    assert!((Fp160::zero() + Fp160::zero()).is_zero());
    assert_eq!(Fp160::from_u64(1) + Fp160::from_u64(2), Fp160::from_u64(3));

    // wraps exactly to zero at the modulus
    let minus_one = Fp160::from_u64(1).negate();
    assert!((minus_one + Fp160::from_u64(1)).is_zero());

    let near = Fp160::from_be([0xb77902ab, 0xd8db9627, 0xf5d7ceca, 0x5c17ef6c, 0x5e3b0966]);
    assert_eq!(
        Fp160::from_u64(2) + near,
        Fp160::from_be([0xb77902ab, 0xd8db9627, 0xf5d7ceca, 0x5c17ef6c, 0x5e3b0968])
    );
    assert_eq!(Fp160::from_u64(2) + minus_one, Fp160::from_u64(1));

    let a = Fp160::from_be([0x0d1f4b5b, 0x8005d7aa, 0x4fed62ac, 0x03831479, 0x83ccd32d]);
    let b = Fp160::from_be([0x1cfaec75, 0x7faf7c19, 0xd3121b9e, 0xded3ca3b, 0x952e1b38]);
    assert_eq!(
        a + b,
        Fp160::from_be([0x2a1a37d0, 0xffb553c4, 0x22ff7e4a, 0xe256deb5, 0x18faee65])
    );

    let a = Fp160::from_be([0x8f566078, 0xb1d6a8df, 0xd5af7fad, 0xaa89f612, 0x240a6b52]);
    let b = Fp160::from_be([0x4a617461, 0x4c8165c6, 0xf378a372, 0x8d6cccb6, 0xd07f7850]);
    assert_eq!(
        a + b,
        Fp160::from_be([0x223ed22e, 0x257c787e, 0xd3505455, 0xdbded35c, 0x964eda39])
    );
}

#[test]
fn fp160_sub_known_values() {
    assert!((Fp160::zero() - Fp160::zero()).is_zero());
    assert_eq!(Fp160::from_u64(0xf0) - Fp160::from_u64(0x2), Fp160::from_u64(0xee));

    // 1 - 2 wraps to M - 1
    assert_eq!(
        Fp160::from_u64(1) - Fp160::from_u64(2),
        Fp160::from_be([0xb77902ab, 0xd8db9627, 0xf5d7ceca, 0x5c17ef6c, 0x5e3b0968])
    );

    let a = Fp160::from_be([0x2a1a37d0, 0xffb553c4, 0x22ff7e4a, 0xe256deb5, 0x18faee65]);
    let b = Fp160::from_be([0x1cfaec75, 0x7faf7c19, 0xd3121b9e, 0xded3ca3b, 0x952e1b38]);
    assert_eq!(
        a - b,
        Fp160::from_be([0x0d1f4b5b, 0x8005d7aa, 0x4fed62ac, 0x03831479, 0x83ccd32d])
    );

    let a = Fp160::from_be([0x223ed22e, 0x257c787e, 0xd3505455, 0xdbded35c, 0x964eda39]);
    let b = Fp160::from_be([0x4a617461, 0x4c8165c6, 0xf378a372, 0x8d6cccb6, 0xd07f7850]);
    assert_eq!(
        a - b,
        Fp160::from_be([0x8f566078, 0xb1d6a8df, 0xd5af7fad, 0xaa89f612, 0x240a6b52])
    );
}

#[test]
fn fp160_group_laws_random() {
    let mut rng = StdRng::seed_from_u64(0x160);
    for _ in 0..500 {
        let a = Fp160::sample(&mut rng);
        let b = Fp160::sample(&mut rng);
        assert!((a + b).as_uint() < &Fp160::modulus());
        assert!((a - a).is_zero());
        assert!((a + a.negate()).is_zero());
        assert_eq!(a + b, b + a);
    }
}

#[test]
fn mul_pow2_matches_repeated_addition() {
    let mut rng = StdRng::seed_from_u64(0x2a);
    for _ in 0..200 {
        let a = Fp160::sample(&mut rng);
        let a2 = a + a;
        let a4 = a2 + a2;
        let a8 = a4 + a4;

        let mut r = a;
        r.double_in_place();
        assert_eq!(r, a2);

        let mut r = a;
        r.mul_pow2::<1>();
        assert_eq!(r, a2);

        let mut r = a;
        r.mul_pow2::<2>();
        assert_eq!(r, a4);

        let mut r = a;
        r.mul_pow2::<3>();
        assert_eq!(r, a8);
    }
}

#[test]
fn mul_pow2_carry_free_layout() {
    let mut rng = StdRng::seed_from_u64(0x2b);
    for _ in 0..200 {
        let a = Fp160W::sample(&mut rng);
        let a2 = a + a;
        let a4 = a2 + a2;

        let mut r = a;
        r.mul_pow2::<2>();
        assert_eq!(r, a4);
    }
}

// =========================================================================
// Montgomery multiplication
// =========================================================================

#[test]
fn montgomery_of_zero_is_zero() {
    assert!(Fp160::zero().to_montgomery().is_zero());
    assert!(Fp160::zero().from_montgomery().is_zero());
}

#[test]
fn montgomery_known_value() {
    let a = Fp160::from_u64(0xffff_ffff).to_montgomery();
    assert_eq!(
        a,
        Fp160::from_be([0xad37b410, 0x255c6eb2, 0x7601a883, 0x659883e8, 0x070707fc])
    );
    assert_eq!(a.from_montgomery(), Fp160::from_u64(0xffff_ffff));
}

#[test]
fn montgomery_roundtrip_random() {
    let mut rng = StdRng::seed_from_u64(0x106);
    for _ in 0..500 {
        let a = Fp160::sample(&mut rng);
        assert_eq!(a.to_montgomery().from_montgomery(), a);

        let b = Fp160W::sample(&mut rng);
        assert_eq!(b.to_montgomery().from_montgomery(), b);
    }
}

#[test]
fn montgomery_product_of_single_limb_values() {
    // the product of two 32-bit values fits in two limbs and can be checked
    // against plain u64 arithmetic
    let mut rng = StdRng::seed_from_u64(0x107);
    let mut cases = vec![(0xd8b2f21eu32, 0xabf7c642u32)];
    for _ in 0..50 {
        cases.push((rng.random(), rng.random()));
    }
    for (x, y) in cases {
        let product = x as u64 * y as u64;

        let mont = Fp160::from_u64(x as u64).to_montgomery()
            * Fp160::from_u64(y as u64).to_montgomery();
        let limbs = mont.from_montgomery().into_uint().limbs;
        assert_eq!(limbs[0] as u64, product & 0xffff_ffff);
        assert_eq!(limbs[1] as u64, product >> 32);

        let mont = Fp160W::from_u64(x as u64).to_montgomery()
            * Fp160W::from_u64(y as u64).to_montgomery();
        assert_eq!(mont.from_montgomery().into_uint().limbs[0], product);
    }
}

#[test]
fn montgomery_product_known_value() {
    let mon_x = Fp160::from_be([0xa5481e14, 0x293b3c7d, 0xb85ecae1, 0x83d79492, 0xcd652763]);
    let mon_y = Fp160::from_be([0x93d20f51, 0x898541bb, 0x74aa1184, 0xbccb10b2, 0x47f79c2c]);
    assert_eq!(
        mon_x * mon_y,
        Fp160::from_be([0x4886fd54, 0x272469d8, 0x0a283135, 0xa3e81093, 0xa1c4f697])
    );
}

fn to_reference(v: &Uint<u32, 5>) -> crypto_bigint::U256 {
    let mut be = [0u8; 32];
    for (i, limb) in v.limbs.iter().enumerate() {
        be[32 - 4 * (i + 1)..32 - 4 * i].copy_from_slice(&limb.to_be_bytes());
    }
    crypto_bigint::U256::from_be_slice(&be)
}

#[test]
fn montgomery_matches_schoolbook_reference() {
    use crypto_bigint::U256;

    let mut rng = StdRng::seed_from_u64(0x108);
    let modulus = to_reference(&Fp160::modulus())
        .concat(&U256::ZERO)
        .to_nz()
        .unwrap();
    for _ in 0..500 {
        let a = Fp160::sample(&mut rng);
        let b = Fp160::sample(&mut rng);
        let ours = (a.to_montgomery() * b.to_montgomery()).from_montgomery();

        let wide = to_reference(a.as_uint()).widening_mul(&to_reference(b.as_uint()));
        let (_, reference) = wide.div_rem(&modulus);
        let (lo, hi) = reference.split();
        assert_eq!(hi, U256::ZERO);
        assert_eq!(to_reference(ours.as_uint()), lo);
    }
}

#[test]
fn montgomery_agrees_across_limb_layouts() {
    fn widen(a: &Fp160) -> Fp160W {
        let l = a.as_uint().limbs;
        Fp160W::new(Uint::new([
            l[0] as u64 | (l[1] as u64) << 32,
            l[2] as u64 | (l[3] as u64) << 32,
            l[4] as u64,
        ]))
    }

    let mut rng = StdRng::seed_from_u64(0x109);
    for _ in 0..300 {
        let a = Fp160::sample(&mut rng);
        let b = Fp160::sample(&mut rng);

        assert_eq!(widen(&(a + b)), widen(&a) + widen(&b));
        assert_eq!(widen(&(a - b)), widen(&a) - widen(&b));

        let narrow_product = (a.to_montgomery() * b.to_montgomery()).from_montgomery();
        let wide_product =
            (widen(&a).to_montgomery() * widen(&b).to_montgomery()).from_montgomery();
        assert_eq!(widen(&narrow_product), wide_product);
    }
}

// =========================================================================
// Inversion, exponentiation, square roots
// =========================================================================

#[test]
fn inversion_of_zero_fails() {
    assert_eq!(Fp160::zero().inv(), Err(FieldError::UndefinedInverse));
    assert_eq!(Fp160W::zero().inv(), Err(FieldError::UndefinedInverse));
}

#[test]
fn inversion_random() {
    let mut rng = StdRng::seed_from_u64(0x10a);
    for _ in 0..300 {
        let a = Fp160::sample_non_zero(&mut rng).to_montgomery();
        assert_eq!(a * a.inv().unwrap(), Fp160::one());

        let b = Fp160W::sample_non_zero(&mut rng).to_montgomery();
        assert_eq!(b * b.inv().unwrap(), Fp160W::one());

        let c = Secp160r1Fq::sample_non_zero(&mut rng).to_montgomery();
        assert_eq!(c * c.inv().unwrap(), Secp160r1Fq::one());
    }
}

#[test]
fn pow_edge_exponents() {
    let mut rng = StdRng::seed_from_u64(0x10b);
    let a = Fp160::sample_non_zero(&mut rng).to_montgomery();

    assert_eq!(a.pow_u64(0), Fp160::one());
    assert_eq!(a.pow_u64(1), a);
    assert_eq!(a.pow_u64(2), a.sqr());
    assert_eq!(a.pow(&Uint::zero()), Fp160::one());
    assert_eq!(a.pow(&Uint::one()), a);
    assert_eq!(Fp160::zero().pow_u64(0), Fp160::one());
    assert_eq!(Fp160::zero().pow_u64(5), Fp160::zero());
}

#[test]
fn fermat_little_theorem() {
    let mut rng = StdRng::seed_from_u64(0x10c);
    let modulus = Fp160::modulus();
    let mut exponent = modulus;
    exponent.sub_assign_borrow(&Uint::one());

    for _ in 0..50 {
        let a = Fp160::sample_non_zero(&mut rng).to_montgomery();
        assert_eq!(a.pow(&modulus), a);
        assert_eq!(a.pow(&exponent), Fp160::one());
    }
}

#[test]
fn sqrt_of_squares() {
    // M ≡ 1 (mod 4), so this exercises the randomized Tonelli–Shanks branch
    let mut rng = StdRng::seed_from_u64(0x10d);
    for _ in 0..100 {
        let x = Fp160::sample(&mut rng).to_montgomery();
        let square = x.sqr();
        let (is_residue, root) = square.sqrt(&mut rng);
        assert!(is_residue);
        assert_eq!(root.sqr(), square);

        let x = Fp160W::sample(&mut rng).to_montgomery();
        let square = x.sqr();
        let (is_residue, root) = square.sqrt(&mut rng);
        assert!(is_residue);
        assert_eq!(root.sqr(), square);
    }
}

#[test]
fn sqrt_fast_path_modulus_three_mod_four() {
    let mut rng = StdRng::seed_from_u64(0x10e);
    for _ in 0..100 {
        let x = Secp160r1Fq::sample(&mut rng).to_montgomery();
        let square = x.sqr();
        let (is_residue, root) = square.sqrt(&mut rng);
        assert!(is_residue);
        assert_eq!(root.sqr(), square);
    }
}

#[test]
fn sqrt_rejects_non_residues() {
    let mut rng = StdRng::seed_from_u64(0x10f);
    let mut rejected = 0;
    for _ in 0..200 {
        let a = Fp160::sample_non_zero(&mut rng).to_montgomery();
        let (is_residue, root) = a.sqrt(&mut rng);
        if is_residue {
            assert_eq!(root.sqr(), a);
        } else {
            assert!(root.is_zero());
            rejected += 1;
        }
    }
    // about half of all non-zero elements are non-residues
    assert!(rejected > 50);
}

#[test]
fn sqrt_of_zero() {
    let mut rng = StdRng::seed_from_u64(0x110);
    let (is_residue, root) = Fp160::zero().sqrt(&mut rng);
    assert!(is_residue);
    assert!(root.is_zero());
}

// =========================================================================
// Curve arithmetic, secp160r1
// =========================================================================

#[test]
fn generator_is_on_curve() {
    assert!(Secp160r1Affine::generator().on_curve());
    assert!(Secp160r1Jacobian::generator().on_curve(&mut workspace()));
    assert!(Secp160r1Projective::generator().on_curve(&mut workspace()));
}

#[test]
fn tampered_point_is_off_curve() {
    let g = Secp160r1Affine::generator();
    let bad = Secp160r1Affine::new(g.x, g.y + Secp160r1Fq::one());
    assert!(!bad.on_curve());

    let bad = Secp160r1Jacobian::new(g.x, g.x, Secp160r1Fq::one());
    assert!(!bad.on_curve(&mut workspace()));
}

fn identity_laws<P>()
where
    P: CurvePoint<5, Curve = Secp160r1Params>,
{
    let g = P::generator();
    let inf = P::identity();

    assert!(inf.is_identity());
    assert!(inf.is_on_curve());
    assert!(g.add_full(&inf).eq_point(&g));
    assert!(inf.add_full(&g).eq_point(&g));
    assert!(inf.add_full(&inf).is_identity());
    assert!(g.add_full(&g.negate_point()).is_identity());
}

#[test]
fn point_identity_laws() {
    identity_laws::<Secp160r1Affine>();
    identity_laws::<Secp160r1Jacobian>();
    identity_laws::<Secp160r1Projective>();
}

fn addition_laws<P>(rng: &mut StdRng)
where
    P: CurvePoint<5, Curve = Secp160r1Params>,
{
    let g = P::generator();
    for _ in 0..20 {
        let k1 = Secp160r1Scalar::sample(rng);
        let k2 = Secp160r1Scalar::sample(rng);
        let p = g.mul_uint(k1.as_uint());
        let q = g.mul_uint(k2.as_uint());

        assert!(p.is_on_curve());
        assert!(p.add_full(&q).eq_point(&q.add_full(&p)));
        assert!(p.add_full(&p).eq_point(&p.double_point()));

        // [k1 + k2]g = [k1]g + [k2]g, with scalars reduced mod the order
        let sum = k1 + k2;
        assert!(g.mul_uint(sum.as_uint()).eq_point(&p.add_full(&q)));
    }
}

#[test]
fn point_addition_laws() {
    let mut rng = StdRng::seed_from_u64(0x201);
    addition_laws::<Secp160r1Affine>(&mut rng);
    addition_laws::<Secp160r1Jacobian>(&mut rng);
    addition_laws::<Secp160r1Projective>(&mut rng);
}

#[test]
fn scalar_mul_edge_cases() {
    let g = Secp160r1Jacobian::generator();
    let order = Secp160r1Scalar::modulus();

    assert!(g.mul_uint(&Uint::<u32, 6>::zero()).is_identity());
    assert!(g.mul_uint(&Uint::<u32, 6>::one()).eq_point(&g));
    assert!(g.mul_uint(&order).is_identity());

    // [n - 1]g = -g
    let mut n_minus_one = order;
    n_minus_one.sub_assign_borrow(&Uint::one());
    assert!(g.mul_uint(&n_minus_one).eq_point(&g.negate_point()));
}

#[test]
fn jacobian_equality_across_representations() {
    let mut rng = StdRng::seed_from_u64(0x202);
    let g = Secp160r1Jacobian::generator();
    let k = Secp160r1Scalar::sample(&mut rng);
    let p = g.mul_uint(k.as_uint());

    let scale = Secp160r1Fq::sample_non_zero(&mut rng).to_montgomery();
    let zz = scale.sqr();
    let rescaled = Secp160r1Jacobian::new(p.x * zz, p.y * zz * scale, p.z * scale);

    assert_ne!(p.x, rescaled.x);
    assert!(p.eq(&rescaled, &mut workspace()));
    assert!(rescaled.on_curve(&mut workspace()));
}

#[test]
fn projective_equality_across_representations() {
    let mut rng = StdRng::seed_from_u64(0x203);
    let g = Secp160r1Projective::generator();
    let k = Secp160r1Scalar::sample(&mut rng);
    let p = g.mul_uint(k.as_uint());

    let scale = Secp160r1Fq::sample_non_zero(&mut rng).to_montgomery();
    let rescaled = Secp160r1Projective::new(p.x * scale, p.y * scale, p.z * scale);

    assert!(p.eq(&rescaled, &mut workspace()));
    assert!(rescaled.on_curve(&mut workspace()));
}

#[test]
fn coordinate_systems_agree() {
    let mut rng = StdRng::seed_from_u64(0x204);
    for _ in 0..20 {
        let k = Secp160r1Scalar::sample(&mut rng);

        let affine = Secp160r1Affine::generator().mul_uint(k.as_uint());
        let jacobian = Secp160r1Jacobian::generator().mul_uint(k.as_uint());
        let projective = Secp160r1Projective::generator().mul_uint(k.as_uint());

        assert_eq!(affine, jacobian.to_affine_point());
        assert_eq!(affine, projective.to_affine_point());
    }
}

#[test]
fn affine_conversion_roundtrip() {
    let mut rng = StdRng::seed_from_u64(0x205);
    let k = Secp160r1Scalar::sample(&mut rng);
    let p = Secp160r1Jacobian::generator().mul_uint(k.as_uint());

    let affine = p.to_affine(&mut workspace());
    let back = Secp160r1Jacobian::from_affine(&affine);
    assert!(p.eq(&back, &mut workspace()));
    assert_eq!(back.z, Secp160r1Fq::one());

    let inf = Secp160r1Jacobian::infinity().to_affine(&mut workspace());
    assert!(inf.is_inf());
    assert!(Secp160r1Jacobian::from_affine(&inf).is_inf());
}

#[test]
fn affine_hash_is_representation_independent() {
    use kanga_numeric::MixState;
    use std::hash::{BuildHasher, Hash, Hasher};

    fn hash_of(p: &Secp160r1Affine) -> u64 {
        let mut hasher = MixState::default().build_hasher();
        p.hash(&mut hasher);
        hasher.finish()
    }

    let mut rng = StdRng::seed_from_u64(0x206);
    let k = Secp160r1Scalar::sample(&mut rng);

    // the same point reached through different coordinate systems
    let via_jacobian = Secp160r1Jacobian::generator()
        .mul_uint(k.as_uint())
        .to_affine_point();
    let via_projective = Secp160r1Projective::generator()
        .mul_uint(k.as_uint())
        .to_affine_point();
    assert_eq!(hash_of(&via_jacobian), hash_of(&via_projective));

    let other = via_jacobian.double_point();
    assert_ne!(hash_of(&via_jacobian), hash_of(&other));
}

#[test]
fn point_from_x_coordinate() {
    let mut rng = StdRng::seed_from_u64(0x207);
    let g = Secp160r1Affine::generator();
    let y_is_odd = g.y.from_montgomery().as_uint().bit(0);

    let recovered = Secp160r1Affine::from_x_coordinate(g.x, y_is_odd, &mut rng).unwrap();
    assert_eq!(recovered, g);

    let flipped = Secp160r1Affine::from_x_coordinate(g.x, !y_is_odd, &mut rng).unwrap();
    assert_eq!(flipped, g.negate());
}

// =========================================================================
// The tiny solver curve
// =========================================================================

#[test]
fn tiny_generator_has_prime_subgroup_order() {
    let g = TinyJacobian::generator();
    let q = TinyScalar::modulus();

    assert!(g.is_on_curve());
    assert!(g.mul_uint(&q).is_identity());

    let mut rng = StdRng::seed_from_u64(0x208);
    for _ in 0..20 {
        let k = TinyScalar::sample_non_zero(&mut rng);
        let p = g.mul_uint(k.as_uint());
        assert!(!p.is_identity());
        assert!(p.is_on_curve());
    }
}

#[test]
fn tiny_curve_coordinate_systems_agree() {
    use crate::curves::tiny::{TinyAffine, TinyProjective};

    let mut rng = StdRng::seed_from_u64(0x209);
    for _ in 0..20 {
        let k = TinyScalar::sample(&mut rng);
        let affine = TinyAffine::generator().mul_uint(k.as_uint());
        let jacobian = TinyJacobian::generator().mul_uint(k.as_uint());
        let projective = TinyProjective::generator().mul_uint(k.as_uint());
        assert_eq!(affine, jacobian.to_affine_point());
        assert_eq!(affine, projective.to_affine_point());
    }
}

// =========================================================================
// Workspace discipline and sampling
// =========================================================================

#[test]
#[should_panic(expected = "workspace narrower")]
fn narrowing_beyond_capacity_fails_fast() {
    use crate::workspace::narrow;
    let mut ws = workspace::<Fp160, 2>();
    let _: &mut [Fp160; 5] = narrow(&mut ws);
}

#[test]
fn sampling_respects_bounds() {
    let mut rng = StdRng::seed_from_u64(0x20a);
    let modulus = Fp160::modulus();
    for _ in 0..1_000 {
        assert!(Fp160::sample(&mut rng).as_uint() < &modulus);
        assert!(!Fp160::sample_non_zero(&mut rng).is_zero());

        let upper = Fp160::sample_non_zero(&mut rng);
        let x = Fp160::sample_below(&upper, &mut rng);
        assert!(x < upper);

        let x = Fp160::sample_below_inclusive(&upper, &mut rng);
        assert!(x <= upper);
    }
}

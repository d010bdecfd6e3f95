use super::*;
use rand::thread_rng;
use rand::Rng;
use rug::ops::RemRounding;

/// Samples a random integer with up to `max_bits` bits.
///
/// A number with `i` bits is chosen with probability proportional to `2^-i`.
fn random_rug_int_exp(rng: &mut impl Rng, max_bits: u32) -> Integer {
    let num_bits = rng.gen_range(1u32..max_bits);
    let mut rug_rng = rug::rand::RandState::new_mersenne_twister();
    rug_rng.seed(&Integer::from(rng.next_u64()));
    Integer::from(Integer::random_bits(num_bits, &mut rug_rng))
}

/// Sample a [FieldT]: one of the builtin fields w/ p = 0.5, a small prime field otherwise.
fn sample_field_t(r: &mut impl Rng, max_bits: u32) -> FieldT {
    if r.gen_bool(0.5) {
        FieldT::BUILTIN[r.gen_range(0..FieldT::BUILTIN.len())].clone()
    } else {
        FieldT::IntField(Arc::new(random_rug_int_exp(r, max_bits).next_prime()))
    }
}

fn sample_field_v(ty: &FieldT, r: &mut impl Rng) -> FieldV {
    if r.gen_bool(0.25) {
        // possibly negative, possibly out of range
        let i: i64 = r.gen();
        return ty.new_v(i);
    }
    ty.new_v(random_rug_int_exp(r, ty.modulus().significant_bits() + 1))
}

#[test]
fn random() {
    let mut rng = thread_rng();
    for _ in 0..1024 {
        let f = sample_field_t(&mut rng, 256);
        let a = sample_field_v(&f, &mut rng);
        let b = sample_field_v(&f, &mut rng);
        let a_i = a.i();
        let b_i = b.i();
        assert!(a_i >= 0 && &a_i < f.modulus());

        // add
        let c = a.clone() + &b;
        let c_i = (a_i.clone() + &b_i).rem_floor(f.modulus());
        assert_eq!(c.i(), c_i);

        // sub
        let c = a.clone() - &b;
        let c_i = (a_i.clone() - &b_i).rem_floor(f.modulus());
        assert_eq!(c.i(), c_i);

        // mul
        let mut c = a.clone();
        c *= &b;
        let c_i = (a_i.clone() * &b_i).rem_floor(f.modulus());
        assert_eq!(c.i(), c_i);

        // neg
        let c = -a.clone();
        let c_i = (-a_i.clone()).rem_floor(f.modulus());
        assert_eq!(c.i(), c_i);

        // recip
        match a.checked_recip() {
            Some(inv) => assert!((inv * &a).is_one()),
            None => assert!(a.is_zero()),
        }
    }
}

#[test]
fn modulus_is_reduced_to_zero() {
    let f = FieldT::FBn254;
    assert!(f.new_v(f.modulus().clone()).is_zero());
    assert!(f.new_v(-1).i() == f.modulus().clone() - 1);
}

#[test]
fn builtin_from_modulus() {
    for f in FieldT::BUILTIN {
        assert_eq!(FieldT::from(f.modulus().clone()), f);
        assert_eq!(FieldT::from(f.modulus_arc()), f);
        assert_eq!(f.one().ty(), f);
        assert!(f.is_builtin());
    }
    let small = FieldT::from(Integer::from(101));
    assert!(!small.is_builtin());
    assert_eq!(small.new_v(205).i(), 3);
}

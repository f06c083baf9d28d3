//! Ciphersuite-generic tests for the polynomial and recovery layer.

use rand_core::{CryptoRng, RngCore};

use crate::{
    poly::{
        recover_commit, recover_pri_poly, recover_pub_poly, recover_secret, PriPoly, PriShare,
    },
    Ciphersuite, Error, Field, Group,
};

/// Any `t` of `n` shares recover the secret.
pub fn check_secret_recovery<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let (n, t) = (10, 6);
    let poly = PriPoly::<C>::new(t, None, &mut rng).unwrap();
    let shares: Vec<_> = poly.shares(n).unwrap().into_iter().map(Some).collect();

    let recovered = recover_secret(&shares, t).unwrap();
    assert!(recovered == poly.secret());
}

/// Recovery tolerates up to `n - t` missing shares.
pub fn check_secret_recovery_delete<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let (n, t) = (10, 6);
    let poly = PriPoly::<C>::new(t, None, &mut rng).unwrap();
    let mut shares: Vec<_> = poly.shares(n).unwrap().into_iter().map(Some).collect();

    shares[2] = None;
    shares[5] = None;
    shares[7] = None;
    shares[8] = None;

    let recovered = recover_secret(&shares, t).unwrap();
    assert!(recovered == poly.secret());
}

/// One deletion beyond the tolerance makes recovery fail.
pub fn check_secret_recovery_delete_fail<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let (n, t) = (10, 6);
    let poly = PriPoly::<C>::new(t, None, &mut rng).unwrap();
    let mut shares: Vec<_> = poly.shares(n).unwrap().into_iter().map(Some).collect();

    shares[1] = None;
    shares[2] = None;
    shares[5] = None;
    shares[7] = None;
    shares[8] = None;

    assert!(matches!(
        recover_secret(&shares, t),
        Err(Error::NotEnoughShares)
    ));
}

/// A repeated share index is rejected.
pub fn check_duplicate_index<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let (n, t) = (5, 3);
    let poly = PriPoly::<C>::new(t, None, &mut rng).unwrap();
    let mut shares: Vec<_> = poly.shares(n).unwrap().into_iter().map(Some).collect();

    shares[1] = shares[0];

    assert!(matches!(
        recover_secret(&shares, t),
        Err(Error::DuplicateIndex { index: 0 })
    ));
}

/// Threshold bounds are validated at construction and share emission.
pub fn check_threshold_validation<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    assert_eq!(
        PriPoly::<C>::new(1, None, &mut rng).unwrap_err(),
        Error::InvalidThreshold
    );

    let poly = PriPoly::<C>::new(4, None, &mut rng).unwrap();
    assert_eq!(poly.shares(3).unwrap_err(), Error::InvalidThreshold);
    assert_eq!(
        poly.commit(None).shares(3).unwrap_err(),
        Error::InvalidThreshold
    );
}

/// Addition is commutative and associative up to coefficient equality.
pub fn check_poly_equality_commutes<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let t = 6;
    let p1 = PriPoly::<C>::new(t, None, &mut rng).unwrap();
    let p2 = PriPoly::<C>::new(t, None, &mut rng).unwrap();
    let p3 = PriPoly::<C>::new(t, None, &mut rng).unwrap();

    let p123 = p1.add(&p2).unwrap().add(&p3).unwrap();
    let p132 = p1.add(&p3).unwrap().add(&p2).unwrap();
    assert!(p123 == p132);

    let base = <C::Group>::generator();
    let c123 = p1
        .commit(Some(base))
        .add(&p2.commit(Some(base)))
        .unwrap()
        .add(&p3.commit(Some(base)))
        .unwrap();
    let c132 = p1
        .commit(Some(base))
        .add(&p3.commit(Some(base)))
        .unwrap()
        .add(&p2.commit(Some(base)))
        .unwrap();
    assert!(c123 == c132);
}

/// Committing is homomorphic: `(p + q).commit == p.commit + q.commit`, and
/// secrets add coefficient-wise.
pub fn check_add_homomorphism<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let t = 6;
    let p = PriPoly::<C>::new(t, None, &mut rng).unwrap();
    let q = PriPoly::<C>::new(t, None, &mut rng).unwrap();

    let sum = p.add(&q).unwrap();
    assert!(sum.secret() == p.secret() + q.secret());

    let committed_sum = sum.commit(None);
    let summed_commits = p.commit(None).add(&q.commit(None)).unwrap();
    assert!(committed_sum == summed_commits);

    assert_eq!(
        p.add(&PriPoly::<C>::new(t + 1, None, &mut rng).unwrap())
            .unwrap_err(),
        Error::ThresholdMismatch
    );
}

/// Every share of `p` verifies against `p.commit`; an altered share is
/// rejected.
pub fn check_public_check<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let (n, t) = (10, 6);
    let pri_poly = PriPoly::<C>::new(t, None, &mut rng).unwrap();
    let pub_poly = pri_poly.commit(None);

    for share in pri_poly.shares(n).unwrap() {
        assert!(pub_poly.check(&share));

        let altered = PriShare::new(
            share.index(),
            share.value() + <<C::Group as Group>::Field>::one(),
        );
        assert!(!pub_poly.check(&altered));
    }
}

/// Point recovery mirrors scalar recovery, deletions included.
pub fn check_public_recovery<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let (n, t) = (10, 6);
    let pri_poly = PriPoly::<C>::new(t, None, &mut rng).unwrap();
    let pub_poly = pri_poly.commit(None);

    let mut shares: Vec<_> = pub_poly.shares(n).unwrap().into_iter().map(Some).collect();

    let recovered = recover_commit(&shares, t).unwrap();
    assert!(recovered == pub_poly.commit());

    shares[2] = None;
    shares[5] = None;
    shares[7] = None;
    shares[8] = None;
    let recovered = recover_commit(&shares, t).unwrap();
    assert!(recovered == pub_poly.commit());

    shares[1] = None;
    assert!(matches!(
        recover_commit(&shares, t),
        Err(Error::NotEnoughShares)
    ));
}

/// Product polynomials have the right shape and evaluate to the product of
/// the evaluations.
pub fn check_mul<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let t = 3;
    let a = PriPoly::<C>::new(t, None, &mut rng).unwrap();
    let b = PriPoly::<C>::new(t, None, &mut rng).unwrap();

    let product = a.mul(&b);
    assert_eq!(
        product.coefficients().len(),
        a.coefficients().len() + b.coefficients().len() - 1
    );

    let a_coeffs = a.coefficients();
    let b_coeffs = b.coefficients();
    let c_coeffs = product.coefficients();
    assert!(c_coeffs[0] == a_coeffs[0] * b_coeffs[0]);
    assert!(
        c_coeffs[c_coeffs.len() - 1]
            == a_coeffs[a_coeffs.len() - 1] * b_coeffs[b_coeffs.len() - 1]
    );

    // Evaluating the product at a point equals the product of evaluations.
    let x = 2;
    assert!(product.eval(x).value() == a.eval(x).value() * b.eval(x).value());
}

/// Full polynomial recovery reproduces the same polynomial regardless of
/// share ordering.
pub fn check_recover_pri_poly<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let (n, t) = (10, 6);
    let poly = PriPoly::<C>::new(t, None, &mut rng).unwrap();
    let shares: Vec<_> = poly.shares(n).unwrap().into_iter().map(Some).collect();

    let mut reversed = shares.clone();
    reversed.reverse();

    // A different subset of t shares interpolates the same polynomial.
    let mut subset = shares.clone();
    subset[0] = None;
    subset[3] = None;
    subset[6] = None;

    let recovered = recover_pri_poly(&shares, t).unwrap();
    let reverse_recovered = recover_pri_poly(&reversed, t).unwrap();
    let subset_recovered = recover_pri_poly(&subset, t).unwrap();

    assert!(recovered == reverse_recovered);
    assert!(recovered == subset_recovered);
    for i in 0..n {
        assert!(recovered.eval(i).value() == poly.eval(i).value());
    }
}

/// Full public polynomial recovery reproduces every commitment evaluation.
pub fn check_recover_pub_poly<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let (n, t) = (10, 6);
    let pri_poly = PriPoly::<C>::new(t, None, &mut rng).unwrap();
    let pub_poly = pri_poly.commit(None);
    let shares: Vec<_> = pub_poly.shares(n).unwrap().into_iter().map(Some).collect();

    let recovered = recover_pub_poly(&shares, t).unwrap();
    for i in 0..n {
        assert!(recovered.eval(i).value() == pub_poly.eval(i).value());
    }
}

/// Exported coefficients rebuild an equal polynomial.
pub fn check_coefficients_roundtrip<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let t = 6;
    let poly = PriPoly::<C>::new(t, None, &mut rng).unwrap();

    let coefficients = poly.coefficients();
    assert_eq!(coefficients.len(), t as usize);

    let rebuilt = PriPoly::<C>::from_coefficients(coefficients);
    assert!(rebuilt == poly);
}

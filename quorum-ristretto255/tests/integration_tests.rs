use quorum_ristretto255::Ristretto255Sha512;
use rand::thread_rng;

#[test]
fn check_secret_recovery() {
    let rng = thread_rng();

    quorum_core::tests::poly::check_secret_recovery::<Ristretto255Sha512, _>(rng);
}

#[test]
fn check_secret_recovery_delete() {
    let rng = thread_rng();

    quorum_core::tests::poly::check_secret_recovery_delete::<Ristretto255Sha512, _>(rng);
}

#[test]
fn check_secret_recovery_delete_fail() {
    let rng = thread_rng();

    quorum_core::tests::poly::check_secret_recovery_delete_fail::<Ristretto255Sha512, _>(rng);
}

#[test]
fn check_duplicate_index() {
    let rng = thread_rng();

    quorum_core::tests::poly::check_duplicate_index::<Ristretto255Sha512, _>(rng);
}

#[test]
fn check_threshold_validation() {
    let rng = thread_rng();

    quorum_core::tests::poly::check_threshold_validation::<Ristretto255Sha512, _>(rng);
}

#[test]
fn check_poly_equality_commutes() {
    let rng = thread_rng();

    quorum_core::tests::poly::check_poly_equality_commutes::<Ristretto255Sha512, _>(rng);
}

#[test]
fn check_add_homomorphism() {
    let rng = thread_rng();

    quorum_core::tests::poly::check_add_homomorphism::<Ristretto255Sha512, _>(rng);
}

#[test]
fn check_public_check() {
    let rng = thread_rng();

    quorum_core::tests::poly::check_public_check::<Ristretto255Sha512, _>(rng);
}

#[test]
fn check_public_recovery() {
    let rng = thread_rng();

    quorum_core::tests::poly::check_public_recovery::<Ristretto255Sha512, _>(rng);
}

#[test]
fn check_mul() {
    let rng = thread_rng();

    quorum_core::tests::poly::check_mul::<Ristretto255Sha512, _>(rng);
}

#[test]
fn check_recover_pri_poly() {
    let rng = thread_rng();

    quorum_core::tests::poly::check_recover_pri_poly::<Ristretto255Sha512, _>(rng);
}

#[test]
fn check_recover_pub_poly() {
    let rng = thread_rng();

    quorum_core::tests::poly::check_recover_pub_poly::<Ristretto255Sha512, _>(rng);
}

#[test]
fn check_coefficients_roundtrip() {
    let rng = thread_rng();

    quorum_core::tests::poly::check_coefficients_roundtrip::<Ristretto255Sha512, _>(rng);
}

#[test]
fn check_vss_happy() {
    let rng = thread_rng();

    quorum_core::tests::vss::check_vss_happy::<Ristretto255Sha512, _>(rng);
}

#[test]
fn check_vss_complaint_justified() {
    let rng = thread_rng();

    quorum_core::tests::vss::check_vss_complaint_justified::<Ristretto255Sha512, _>(rng);
}

#[test]
fn check_vss_bad_dealer() {
    let rng = thread_rng();

    quorum_core::tests::vss::check_vss_bad_dealer::<Ristretto255Sha512, _>(rng);
}

#[test]
fn check_vss_timeout() {
    let rng = thread_rng();

    quorum_core::tests::vss::check_vss_timeout::<Ristretto255Sha512, _>(rng);
}

#[test]
fn check_vss_duplicates() {
    let rng = thread_rng();

    quorum_core::tests::vss::check_vss_duplicates::<Ristretto255Sha512, _>(rng);
}

#[test]
fn check_ecies() {
    let rng = thread_rng();

    quorum_core::tests::vss::check_ecies::<Ristretto255Sha512, _>(rng);
}

#[test]
fn check_signature() {
    let rng = thread_rng();

    quorum_core::tests::vss::check_signature::<Ristretto255Sha512, _>(rng);
}

#[test]
fn check_dkg_full() {
    let rng = thread_rng();

    quorum_core::tests::dkg::check_dkg_full::<Ristretto255Sha512, _>(rng);
}

#[test]
fn check_dkg_bad_dealer() {
    let rng = thread_rng();

    quorum_core::tests::dkg::check_dkg_bad_dealer::<Ristretto255Sha512, _>(rng);
}

#[test]
fn check_dkg_rejections() {
    let rng = thread_rng();

    quorum_core::tests::dkg::check_dkg_rejections::<Ristretto255Sha512, _>(rng);
}

#[test]
fn check_dkg_renewal() {
    let rng = thread_rng();

    quorum_core::tests::dkg::check_dkg_renewal::<Ristretto255Sha512, _>(rng);
}

//! Wire-format round-trips for every message type.

use quorum_ristretto255::{dkg, Ristretto255Sha512, SigningKey, VerifyingKey};
use rand::thread_rng;

fn keys(n: u32) -> Vec<SigningKey> {
    let mut rng = thread_rng();
    (0..n).map(|_| SigningKey::new(&mut rng)).collect()
}

#[test]
fn check_deal_and_response_roundtrip() {
    let mut rng = thread_rng();
    let signing_keys = keys(3);
    let participants: Vec<VerifyingKey> = signing_keys.iter().map(VerifyingKey::from).collect();

    let mut alice =
        dkg::DistKeyGenerator::new(signing_keys[0], participants.clone(), 2, &mut rng).unwrap();
    let mut bob =
        dkg::DistKeyGenerator::new(signing_keys[1], participants.clone(), 2, &mut rng).unwrap();

    let deals = alice.deals(&mut rng).unwrap();
    let deal = deals.get(&1).unwrap();

    let decoded = dkg::Deal::deserialize(&deal.serialize().unwrap()).unwrap();
    assert_eq!(&decoded, deal);

    let response = bob.process_deal(deal, &mut rng).unwrap();
    let decoded = dkg::Response::deserialize(&response.serialize().unwrap()).unwrap();
    assert_eq!(decoded, response);
}

#[test]
fn check_dist_key_share_roundtrip() {
    let mut rng = thread_rng();
    let signing_keys = keys(3);

    let generators = quorum_core::tests::helpers::run_dkg::<Ristretto255Sha512, _>(
        &signing_keys,
        2,
        false,
        &mut rng,
    );
    let key_share = generators[0].dist_key_share().unwrap();

    let decoded = dkg::DistKeyShare::deserialize(&key_share.serialize().unwrap()).unwrap();
    assert_eq!(decoded, key_share);
}

#[test]
fn check_key_roundtrips() {
    let mut rng = thread_rng();
    let signing_key = SigningKey::new(&mut rng);
    let verifying_key = VerifyingKey::from(&signing_key);

    let decoded = SigningKey::deserialize(&signing_key.serialize()).unwrap();
    assert_eq!(decoded, signing_key);

    let decoded = VerifyingKey::deserialize(&verifying_key.serialize()).unwrap();
    assert_eq!(decoded, verifying_key);
}

#[test]
fn check_malformed_rejection() {
    assert!(dkg::Deal::deserialize(b"not a deal").is_err());
    assert!(dkg::DistKeyShare::deserialize(&[]).is_err());

    // Wrong length for a point encoding.
    assert!(VerifyingKey::deserialize(&[0u8; 31]).is_err());
    // Right length, but not a canonical ristretto encoding.
    assert!(VerifyingKey::deserialize(&[0xff; 32]).is_err());
    // The zero scalar is not a valid signing key.
    assert!(SigningKey::deserialize(&[0u8; 32]).is_err());
}

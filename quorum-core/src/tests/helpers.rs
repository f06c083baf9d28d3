//! Helper functions for testing.

use rand_core::{CryptoRng, RngCore};

use crate::{dkg::DistKeyGenerator, Ciphersuite, SigningKey, VerifyingKey};

/// Generate `n` long-term participant keypairs.
pub fn participants<C: Ciphersuite, R: RngCore + CryptoRng>(
    n: u32,
    rng: &mut R,
) -> (Vec<SigningKey<C>>, Vec<VerifyingKey<C>>) {
    let signing_keys: Vec<SigningKey<C>> = (0..n).map(|_| SigningKey::new(rng)).collect();
    let verifying_keys = signing_keys.iter().map(VerifyingKey::from).collect();
    (signing_keys, verifying_keys)
}

/// Create one [`DistKeyGenerator`] per participant.
pub fn generators<C: Ciphersuite, R: RngCore + CryptoRng>(
    signing_keys: &[SigningKey<C>],
    threshold: u32,
    refresh: bool,
    rng: &mut R,
) -> Vec<DistKeyGenerator<C>> {
    let verifying_keys: Vec<VerifyingKey<C>> =
        signing_keys.iter().map(VerifyingKey::from).collect();

    signing_keys
        .iter()
        .map(|sk| {
            if refresh {
                DistKeyGenerator::new_for_refresh(*sk, verifying_keys.clone(), threshold, rng)
            } else {
                DistKeyGenerator::new(*sk, verifying_keys.clone(), threshold, rng)
            }
        })
        .collect::<Result<_, _>>()
        .expect("generator setup must succeed")
}

/// Run a fault-free DKG to completion: exchange every deal and broadcast
/// every response among all participants.
pub fn run_dkg<C: Ciphersuite, R: RngCore + CryptoRng>(
    signing_keys: &[SigningKey<C>],
    threshold: u32,
    refresh: bool,
    rng: &mut R,
) -> Vec<DistKeyGenerator<C>> {
    let mut generators = generators::<C, R>(signing_keys, threshold, refresh, rng);

    // Point-to-point deal delivery, collecting each recipient's response.
    let mut responses = Vec::new();
    for dealer_index in 0..generators.len() {
        let deals = generators[dealer_index]
            .deals(rng)
            .expect("deal emission must succeed");
        for (recipient, deal) in deals {
            let response = generators[recipient as usize]
                .process_deal(&deal, rng)
                .expect("honest deal must process");
            responses.push((recipient, response));
        }
    }

    // Response broadcast to everyone but the issuer.
    for (issuer, response) in &responses {
        for generator in generators.iter_mut() {
            if generator.index() == *issuer {
                continue;
            }
            let justification = generator
                .process_response(response, rng)
                .expect("honest response must process");
            assert!(justification.is_none(), "honest run must not justify");
        }
    }

    generators
}

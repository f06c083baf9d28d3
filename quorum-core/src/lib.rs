#![allow(non_snake_case)]
#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

use rand_core::{CryptoRng, RngCore};

pub mod dkg;
mod ecies;
mod error;
pub mod poly;
mod serialization;
mod signature;
mod signing_key;
mod traits;
mod verifying_key;
pub mod vss;

#[cfg(any(test, feature = "test-impl"))]
pub mod tests;

pub use error::{Error, FieldError, GroupError};
pub use serialization::Header;
pub use signature::Signature;
pub use signing_key::SigningKey;
pub use traits::{Ciphersuite, Element, Field, Group, Scalar};
pub use verifying_key::VerifyingKey;

/// A Schnorr signature challenge.
pub(crate) struct Challenge<C: Ciphersuite>(pub(crate) Scalar<C>);

/// Generates the challenge for a Schnorr signature: hash of the nonce
/// commitment, the verifying key and the message.
#[allow(non_snake_case)]
pub(crate) fn challenge<C>(
    R: &Element<C>,
    verifying_key: &VerifyingKey<C>,
    msg: &[u8],
) -> Challenge<C>
where
    C: Ciphersuite,
{
    let mut preimage = Vec::new();

    preimage.extend_from_slice(<C::Group>::serialize(R).as_ref());
    preimage.extend_from_slice(&verifying_key.serialize());
    preimage.extend_from_slice(msg);

    Challenge(C::H1(&preimage))
}

/// Generates a random nonzero scalar.
///
/// It assumes that the Scalar Eq/PartialEq implementation is constant-time.
pub(crate) fn random_nonzero<C: Ciphersuite, R: RngCore + CryptoRng>(rng: &mut R) -> Scalar<C> {
    loop {
        let scalar = <<C::Group as Group>::Field>::random(rng);

        if scalar != <<C::Group as Group>::Field>::zero() {
            return scalar;
        }
    }
}

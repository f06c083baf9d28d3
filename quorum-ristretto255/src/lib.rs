#![allow(non_snake_case)]
#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

use curve25519_dalek::{
    constants::RISTRETTO_BASEPOINT_POINT,
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
    traits::Identity,
};
use rand_core::{CryptoRng, RngCore};
use sha2::{Digest, Sha512};

use quorum_core as quorum;

// Re-exports in our public API
pub use quorum_core::{Ciphersuite, Error, Field, FieldError, Group, GroupError};
pub use rand_core;

/// An implementation of the quorum(ristretto255, SHA-512) ciphersuite scalar
/// field.
#[derive(Clone, Copy)]
pub struct RistrettoScalarField;

impl Field for RistrettoScalarField {
    type Scalar = Scalar;

    type Serialization = [u8; 32];

    fn zero() -> Self::Scalar {
        Scalar::ZERO
    }

    fn one() -> Self::Scalar {
        Scalar::ONE
    }

    fn invert(scalar: &Self::Scalar) -> Result<Self::Scalar, FieldError> {
        // [`curve25519_dalek::scalar::Scalar`]'s Eq/PartialEq does a
        // constant-time comparison using `ConstantTimeEq`
        if *scalar == <Self as Field>::zero() {
            Err(FieldError::InvalidZeroScalar)
        } else {
            Ok(scalar.invert())
        }
    }

    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Scalar {
        Scalar::random(rng)
    }

    fn serialize(scalar: &Self::Scalar) -> Self::Serialization {
        scalar.to_bytes()
    }

    fn deserialize(buf: &Self::Serialization) -> Result<Self::Scalar, FieldError> {
        match Scalar::from_canonical_bytes(*buf).into() {
            Some(s) => Ok(s),
            None => Err(FieldError::MalformedScalar),
        }
    }
}

/// An implementation of the quorum(ristretto255, SHA-512) ciphersuite group.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RistrettoGroup;

impl Group for RistrettoGroup {
    type Field = RistrettoScalarField;

    type Element = RistrettoPoint;

    type Serialization = [u8; 32];

    fn cofactor() -> <Self::Field as Field>::Scalar {
        Scalar::ONE
    }

    fn identity() -> Self::Element {
        RistrettoPoint::identity()
    }

    fn generator() -> Self::Element {
        RISTRETTO_BASEPOINT_POINT
    }

    fn serialize(element: &Self::Element) -> Self::Serialization {
        element.compress().to_bytes()
    }

    fn deserialize(buf: &Self::Serialization) -> Result<Self::Element, GroupError> {
        match CompressedRistretto::from_slice(buf.as_ref())
            .map_err(|_| GroupError::MalformedElement)?
            .decompress()
        {
            Some(point) => Ok(point),
            None => Err(GroupError::MalformedElement),
        }
    }
}

/// Context string identifying this ciphersuite.
const CONTEXT_STRING: &str = "QUORUM-RISTRETTO255-SHA512-v1";

/// SHA-512 over the context string, a per-function domain tag and the
/// message. Every hash of the suite goes through here so no two of them can
/// ever collide on the same input.
fn domain_hash(tag: &[u8], msg: &[u8]) -> [u8; 64] {
    Sha512::new()
        .chain_update(CONTEXT_STRING.as_bytes())
        .chain_update(tag)
        .chain_update(msg)
        .finalize()
        .into()
}

/// An implementation of the quorum(ristretto255, SHA-512) ciphersuite.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Ristretto255Sha512;

impl Ciphersuite for Ristretto255Sha512 {
    const ID: &'static str = CONTEXT_STRING;

    type Group = RistrettoGroup;

    type HashOutput = [u8; 64];

    /// H1 for quorum(ristretto255, SHA-512): the Schnorr signature challenge.
    fn H1(m: &[u8]) -> <<Self::Group as Group>::Field as Field>::Scalar {
        Scalar::from_bytes_mod_order_wide(&domain_hash(b"chal", m))
    }

    /// H2 for quorum(ristretto255, SHA-512): session identifiers.
    fn H2(m: &[u8]) -> Self::HashOutput {
        domain_hash(b"sid", m)
    }

    /// H3 for quorum(ristretto255, SHA-512): the Pedersen blinding base.
    fn H3(m: &[u8]) -> <Self::Group as Group>::Element {
        RistrettoPoint::from_uniform_bytes(&domain_hash(b"base", m))
    }
}

type R = Ristretto255Sha512;

/// A quorum(ristretto255, SHA-512) long-term participant signing key.
pub type SigningKey = quorum::SigningKey<R>;

/// A quorum(ristretto255, SHA-512) long-term participant verifying key.
pub type VerifyingKey = quorum::VerifyingKey<R>;

/// A quorum(ristretto255, SHA-512) Schnorr signature.
pub type Signature = quorum::Signature<R>;

/// quorum(ristretto255, SHA-512) secret sharing polynomials and recovery.
pub mod poly {
    use super::*;

    /// A share of a secret polynomial.
    pub type PriShare = quorum::poly::PriShare<R>;

    /// A share of a committed public polynomial.
    pub type PubShare = quorum::poly::PubShare<R>;

    /// A secret sharing polynomial.
    pub type PriPoly = quorum::poly::PriPoly<R>;

    /// The public commitment image of a secret sharing polynomial.
    pub type PubPoly = quorum::poly::PubPoly<R>;

    /// Recover the shared secret from a sparse list of private shares.
    pub fn recover_secret(
        shares: &[Option<PriShare>],
        threshold: u32,
    ) -> Result<curve25519_dalek::scalar::Scalar, Error> {
        quorum::poly::recover_secret(shares, threshold)
    }

    /// Recover the secret commitment from a sparse list of public shares.
    pub fn recover_commit(
        shares: &[Option<PubShare>],
        threshold: u32,
    ) -> Result<curve25519_dalek::ristretto::RistrettoPoint, Error> {
        quorum::poly::recover_commit(shares, threshold)
    }

    /// Recover the entire secret polynomial from a sparse list of shares.
    pub fn recover_pri_poly(
        shares: &[Option<PriShare>],
        threshold: u32,
    ) -> Result<PriPoly, Error> {
        quorum::poly::recover_pri_poly(shares, threshold)
    }

    /// Recover the entire committed polynomial from a sparse list of public
    /// shares.
    pub fn recover_pub_poly(
        shares: &[Option<PubShare>],
        threshold: u32,
    ) -> Result<PubPoly, Error> {
        quorum::poly::recover_pub_poly(shares, threshold)
    }
}

/// quorum(ristretto255, SHA-512) Pedersen verifiable secret sharing.
pub mod vss {
    use super::*;

    /// The verdict of a verifier on a deal.
    pub type Status = quorum::vss::Status;

    /// The secret payload a dealer prepares for one verifier.
    pub type Deal = quorum::vss::Deal<R>;

    /// A deal sealed to its recipient's long-term key.
    pub type EncryptedDeal = quorum::vss::EncryptedDeal<R>;

    /// A verifier's signed verdict on a deal.
    pub type Response = quorum::vss::Response<R>;

    /// A dealer's signed answer to a complaint.
    pub type Justification = quorum::vss::Justification<R>;

    /// The party sharing a secret.
    pub type Dealer = quorum::vss::Dealer<R>;

    /// One recipient of a dealer's deal.
    pub type Verifier = quorum::vss::Verifier<R>;
}

/// quorum(ristretto255, SHA-512) distributed key generation.
pub mod dkg {
    use super::*;

    /// A deal from one DKG participant to another.
    pub type Deal = quorum::dkg::Deal<R>;

    /// A verdict on the deal of one dealer.
    pub type Response = quorum::dkg::Response<R>;

    /// A dealer's answer to a complaint against its deal.
    pub type Justification = quorum::dkg::Justification<R>;

    /// A participant's share of the distributed key.
    pub type DistKeyShare = quorum::dkg::DistKeyShare<R>;

    /// The state of one participant in a DKG run.
    pub type DistKeyGenerator = quorum::dkg::DistKeyGenerator<R>;
}

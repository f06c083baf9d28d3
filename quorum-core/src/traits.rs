//! Traits used to abstract ciphersuites.

use core::{
    fmt::Debug,
    ops::{Add, Mul, Sub},
};

use rand_core::{CryptoRng, RngCore};

use crate::{Error, FieldError, GroupError, Signature, VerifyingKey};

/// A prime order finite field GF(q) over which all scalar values for our prime
/// order group are defined.
///
/// This trait does not have to be implemented for a finite field scalar itself;
/// it can be a pass-through, implemented for a type just for the ciphersuite,
/// that calls through to another implementation underneath, so that this trait
/// does not have to be implemented for types you don't own.
pub trait Field: Copy + Clone {
    /// An element of the scalar field GF(q).
    /// The Eq/PartialEq implementation MUST be constant-time.
    type Scalar: Add<Output = Self::Scalar>
        + Copy
        + Clone
        + Eq
        + Mul<Output = Self::Scalar>
        + PartialEq
        + Sub<Output = Self::Scalar>;

    /// A unique byte array buf of fixed length N.
    type Serialization: AsRef<[u8]> + Debug + TryFrom<Vec<u8>>;

    /// Returns the zero element of the field, the additive identity.
    fn zero() -> Self::Scalar;

    /// Returns the one element of the field, the multiplicative identity.
    fn one() -> Self::Scalar;

    /// Computes the multiplicative inverse of an element of the scalar field,
    /// failing if the element is zero.
    fn invert(scalar: &Self::Scalar) -> Result<Self::Scalar, FieldError>;

    /// Generate a random scalar from the entire space [0, q-1].
    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Scalar;

    /// Maps a scalar to a unique byte array buf of fixed length N.
    fn serialize(scalar: &Self::Scalar) -> Self::Serialization;

    /// Attempts to map a byte array `buf` to a scalar.
    ///
    /// Fails if the input is not a canonical byte representation of a scalar of
    /// the field.
    fn deserialize(buf: &Self::Serialization) -> Result<Self::Scalar, FieldError>;
}

/// An element of the [`Ciphersuite`] `C`'s [`Group`]'s scalar [`Field`].
pub type Scalar<C> = <<<C as Ciphersuite>::Group as Group>::Field as Field>::Scalar;

/// A prime-order group (or subgroup) that provides everything we need to do
/// verifiable secret sharing and to create and verify Schnorr signatures.
///
/// This trait does not have to be implemented for the curve/element/point
/// itself; it can be a pass-through, implemented for a type just for the
/// ciphersuite, that calls through to another implementation underneath, so
/// that this trait does not have to be implemented for types you don't own.
pub trait Group: Copy + Clone + PartialEq {
    /// A prime order finite field GF(q) over which all scalar values for our
    /// prime order group are defined.
    type Field: Field;

    /// An element of our group that we will be computing over.
    type Element: Add<Output = Self::Element>
        + Copy
        + Clone
        + Eq
        + Mul<<Self::Field as Field>::Scalar, Output = Self::Element>
        + PartialEq
        + Sub<Output = Self::Element>;

    /// A unique byte array buf of fixed length N.
    type Serialization: AsRef<[u8]> + Debug + TryFrom<Vec<u8>>;

    /// The order of the quotient group when the prime order subgroup divides
    /// the order of the full group.
    ///
    /// If using a prime order elliptic curve, the cofactor should be 1 in the
    /// scalar field.
    fn cofactor() -> <Self::Field as Field>::Scalar;

    /// Additive identity of the prime order group.
    fn identity() -> Self::Element;

    /// The fixed generator element of the prime order group.
    fn generator() -> Self::Element;

    /// Maps an element to a unique byte array buf of fixed length N.
    ///
    /// Unlike signature-only group abstractions, the identity must be
    /// encodable: commitment polynomials of a zero secret (used to refresh a
    /// distributed key) legitimately contain the identity.
    fn serialize(element: &Self::Element) -> Self::Serialization;

    /// Attempts to map a byte array `buf` to an element.
    ///
    /// Fails if the input is not a canonical byte representation of an element
    /// of the group.
    fn deserialize(buf: &Self::Serialization) -> Result<Self::Element, GroupError>;
}

/// An element of the [`Ciphersuite`] `C`'s [`Group`].
pub type Element<C> = <<C as Ciphersuite>::Group as Group>::Element;

/// A ciphersuite specifies the underlying prime-order group details and the
/// cryptographic hash functions the protocols are instantiated with.
#[allow(non_snake_case)]
pub trait Ciphersuite: Copy + Clone + PartialEq + Debug + 'static {
    /// The ciphersuite ID string, used for domain separation in serialized
    /// messages and key derivation. It should uniquely identify the suite,
    /// e.g. "QUORUM-RISTRETTO255-SHA512-v1".
    const ID: &'static str;

    /// The prime order group (or subgroup) that this ciphersuite operates over.
    type Group: Group;

    /// A unique byte array of fixed length.
    type HashOutput: AsRef<[u8]>;

    /// H1: maps arbitrary inputs to scalars.
    ///
    /// Computes the challenge for the Schnorr signatures that authenticate
    /// deals, responses and justifications.
    fn H1(m: &[u8]) -> <<Self::Group as Group>::Field as Field>::Scalar;

    /// H2: maps arbitrary inputs to a fixed-length digest.
    ///
    /// Derives session identifiers binding every message of a verifiable
    /// secret sharing run to the dealer, the participant set and the
    /// commitment polynomials.
    fn H2(m: &[u8]) -> Self::HashOutput;

    /// H3: maps arbitrary inputs to group elements.
    ///
    /// Derives the second Pedersen commitment base from the participant set,
    /// so that nobody knows its discrete logarithm relative to the generator.
    fn H3(m: &[u8]) -> <Self::Group as Group>::Element;

    /// Verify a signature for this ciphersuite. The default implementation
    /// uses the "cofactored" equation (it multiplies by the cofactor returned
    /// by [`Group::cofactor()`]).
    fn verify_signature(
        msg: &[u8],
        signature: &Signature<Self>,
        public_key: &VerifyingKey<Self>,
    ) -> Result<(), Error> {
        let c = crate::challenge::<Self>(&signature.R, public_key, msg);

        public_key.verify_prehashed(c, signature)
    }
}

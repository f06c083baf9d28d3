//! Long-term Schnorr signing keys identifying protocol participants.

use rand_core::{CryptoRng, RngCore};

use crate::{random_nonzero, Ciphersuite, Error, Field, Group, Scalar, Signature, VerifyingKey};

/// A participant's long-term signing key.
///
/// Every participant of a VSS or DKG run is identified by the verifying key
/// matching one of these; deals are sealed to it and responses are signed
/// with it.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct SigningKey<C>
where
    C: Ciphersuite,
{
    pub(crate) scalar: Scalar<C>,
}

impl<C> SigningKey<C>
where
    C: Ciphersuite,
{
    /// Generate a new signing key.
    pub fn new<R: RngCore + CryptoRng>(rng: &mut R) -> SigningKey<C> {
        let scalar = random_nonzero::<C, R>(rng);

        SigningKey { scalar }
    }

    /// Creates a SigningKey from a scalar. Returns an error if the scalar is
    /// zero.
    pub fn from_scalar(scalar: Scalar<C>) -> Result<Self, Error> {
        if scalar == <<C::Group as Group>::Field>::zero() {
            return Err(Error::MalformedSigningKey);
        }
        Ok(Self { scalar })
    }

    /// Return the underlying scalar.
    pub fn to_scalar(self) -> Scalar<C> {
        self.scalar
    }

    /// Deserialize from bytes.
    pub fn deserialize(bytes: &[u8]) -> Result<SigningKey<C>, Error> {
        let serialization: <<C::Group as Group>::Field as Field>::Serialization = bytes
            .to_vec()
            .try_into()
            .map_err(|_| Error::MalformedSigningKey)?;
        let scalar = <<C::Group as Group>::Field>::deserialize(&serialization)?;
        Self::from_scalar(scalar)
    }

    /// Serialize `SigningKey` to bytes.
    pub fn serialize(&self) -> Vec<u8> {
        <<C::Group as Group>::Field>::serialize(&self.scalar)
            .as_ref()
            .to_vec()
    }

    /// Create a Schnorr signature over `msg` using this `SigningKey`.
    #[allow(non_snake_case)]
    pub fn sign<R: RngCore + CryptoRng>(&self, rng: &mut R, msg: &[u8]) -> Signature<C> {
        let k = random_nonzero::<C, R>(rng);

        let R = <C::Group>::generator() * k;

        let c = crate::challenge::<C>(&R, &VerifyingKey::<C>::from(*self), msg);

        let z = k + (c.0 * self.scalar);

        Signature { R, z }
    }
}

impl<C> core::fmt::Debug for SigningKey<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("SigningKey").field(&"<redacted>").finish()
    }
}

impl<C> From<&SigningKey<C>> for VerifyingKey<C>
where
    C: Ciphersuite,
{
    fn from(signing_key: &SigningKey<C>) -> Self {
        VerifyingKey::new(C::Group::generator() * signing_key.scalar)
    }
}

impl<C> From<SigningKey<C>> for VerifyingKey<C>
where
    C: Ciphersuite,
{
    fn from(signing_key: SigningKey<C>) -> Self {
        VerifyingKey::<C>::from(&signing_key)
    }
}

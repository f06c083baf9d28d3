//! Verifying keys for the long-term participant identities.

use core::fmt::{self, Debug};

use crate::{serialization::SerializableElement, Challenge, Ciphersuite, Error, Group, Signature};

/// A valid verifying key for Schnorr signatures over a [`Ciphersuite::Group`].
///
/// Participant lists handed to the VSS and DKG layers are lists of these.
#[derive(Copy, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(bound = "C: Ciphersuite")]
#[serde(transparent)]
pub struct VerifyingKey<C>
where
    C: Ciphersuite,
{
    pub(crate) element: SerializableElement<C>,
}

impl<C> VerifyingKey<C>
where
    C: Ciphersuite,
{
    /// Create a new VerifyingKey from the given element.
    pub(crate) fn new(element: <C::Group as Group>::Element) -> Self {
        Self {
            element: SerializableElement(element),
        }
    }

    /// Return the underlying element.
    pub(crate) fn to_element(self) -> <C::Group as Group>::Element {
        self.element.0
    }

    /// Deserialize from bytes.
    pub fn deserialize(bytes: &[u8]) -> Result<VerifyingKey<C>, Error> {
        Ok(Self {
            element: SerializableElement::deserialize(bytes)?,
        })
    }

    /// Serialize `VerifyingKey` to bytes.
    pub fn serialize(&self) -> Vec<u8> {
        self.element.serialize()
    }

    /// Verify a purported `signature` with a pre-hashed [`Challenge`] made by
    /// this verification key.
    #[allow(non_snake_case)]
    pub(crate) fn verify_prehashed(
        &self,
        challenge: Challenge<C>,
        signature: &Signature<C>,
    ) -> Result<(), Error> {
        // Verify check is h * ( z * B - c * A - R) == 0
        // where h is the cofactor
        let zB = C::Group::generator() * signature.z;
        let cA = self.element.0 * challenge.0;
        let check = (zB - cA - signature.R) * C::Group::cofactor();

        if check == C::Group::identity() {
            Ok(())
        } else {
            Err(Error::InvalidSignature)
        }
    }

    /// Verify a purported `signature` over `msg` made by this verification
    /// key.
    pub fn verify(&self, msg: &[u8], signature: &Signature<C>) -> Result<(), Error> {
        C::verify_signature(msg, signature, self)
    }
}

impl<C> Debug for VerifyingKey<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("VerifyingKey")
            .field(&hex::encode(self.serialize()))
            .finish()
    }
}

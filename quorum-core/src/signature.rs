//! Schnorr signatures over prime order groups (or subgroups).
//!
//! Deals, responses and justifications are authenticated with the long-term
//! keys of their senders; these are the signatures doing that.

use crate::{Ciphersuite, Element, Error, Field, Group, Scalar};

/// A Schnorr signature over some prime order group (or subgroup).
#[derive(Copy, Clone, Eq, PartialEq)]
#[allow(non_snake_case)]
pub struct Signature<C: Ciphersuite> {
    /// The commitment `R` to the signature nonce.
    pub(crate) R: Element<C>,
    /// The response `z` to the challenge computed from the commitment `R`,
    /// the verifying key, and the message.
    pub(crate) z: Scalar<C>,
}

impl<C> Signature<C>
where
    C: Ciphersuite,
{
    /// Converts this signature to its byte serialization: the encoding of `R`
    /// followed by the encoding of `z`.
    pub fn serialize(&self) -> Vec<u8> {
        let mut bytes = vec![];

        bytes.extend(<C::Group>::serialize(&self.R).as_ref());
        bytes.extend(<<C::Group as Group>::Field>::serialize(&self.z).as_ref());

        bytes
    }

    /// Converts bytes produced by [`Signature::serialize()`] back into a
    /// `Signature`.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        let R_len = crate::serialization::element_width::<C>();
        let z_len = crate::serialization::scalar_width::<C>();

        if bytes.len() != R_len + z_len {
            return Err(Error::MalformedSignature);
        }

        let R_serialization: <C::Group as Group>::Serialization = bytes[..R_len]
            .to_vec()
            .try_into()
            .map_err(|_| Error::MalformedSignature)?;
        let z_serialization: <<C::Group as Group>::Field as Field>::Serialization = bytes[R_len..]
            .to_vec()
            .try_into()
            .map_err(|_| Error::MalformedSignature)?;

        Ok(Self {
            R: <C::Group>::deserialize(&R_serialization)?,
            z: <<C::Group as Group>::Field>::deserialize(&z_serialization)?,
        })
    }
}

impl<C> serde::Serialize for Signature<C>
where
    C: Ciphersuite,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serdect::slice::serialize_hex_lower_or_bin(&self.serialize(), serializer)
    }
}

impl<'de, C> serde::Deserialize<'de> for Signature<C>
where
    C: Ciphersuite,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes = serdect::slice::deserialize_hex_or_bin_vec(deserializer)?;
        Signature::deserialize(&bytes).map_err(|err| serde::de::Error::custom(format!("{err}")))
    }
}

impl<C: Ciphersuite> core::fmt::Debug for Signature<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Signature")
            .field("R", &hex::encode(<C::Group>::serialize(&self.R).as_ref()))
            .field(
                "z",
                &hex::encode(<<C::Group as Group>::Field>::serialize(&self.z).as_ref()),
            )
            .finish()
    }
}

//! Wire encoding support.
//!
//! Scalars and group elements cross the wire in the fixed-length canonical
//! encodings their suite defines; serde renders them as lowercase hex in
//! human-readable formats and as raw bytes otherwise. Whole messages are
//! framed with postcard and stamped with a [`Header`] naming the wire version
//! and the ciphersuite, so a message can never be replayed into a run over a
//! different suite or decoded by an incompatible build.

use core::fmt::{self, Debug};
use core::marker::PhantomData;

use crate::{Ciphersuite, Element, Error, Field, FieldError, Group, GroupError, Scalar};

/// Version stamped into every serialized message. Bumped when the wire
/// layout of any message changes.
pub(crate) const WIRE_VERSION: u8 = 0;

/// Byte width of a canonically serialized scalar of the suite.
pub(crate) fn scalar_width<C: Ciphersuite>() -> usize {
    <<C::Group as Group>::Field>::serialize(&<<C::Group as Group>::Field>::zero())
        .as_ref()
        .len()
}

/// Byte width of a canonically serialized element of the suite.
pub(crate) fn element_width<C: Ciphersuite>() -> usize {
    <C::Group>::serialize(&<C::Group>::generator())
        .as_ref()
        .len()
}

/// Frame a message as canonical postcard bytes.
///
/// Postcard is positional and unambiguous, so two parties framing the same
/// message always produce the same bytes, which the session identifier and
/// signature derivations rely on.
pub(crate) fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, Error> {
    postcard::to_allocvec(value).map_err(|_| Error::SerializationError)
}

/// Decode a message framed with [`encode`]. Round-trips are the identity on
/// well-formed input.
pub(crate) fn decode<T: for<'de> serde::Deserialize<'de>>(bytes: &[u8]) -> Result<T, Error> {
    postcard::from_bytes(bytes).map_err(|_| Error::DeserializationError)
}

/// Helper struct to serialize a scalar.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) struct SerializableScalar<C: Ciphersuite>(pub(crate) Scalar<C>);

impl<C> SerializableScalar<C>
where
    C: Ciphersuite,
{
    /// Serialize a scalar.
    pub(crate) fn serialize(&self) -> Vec<u8> {
        <<C::Group as Group>::Field>::serialize(&self.0)
            .as_ref()
            .to_vec()
    }

    /// Deserialize a scalar from a serialized buffer.
    pub(crate) fn deserialize(encoding: &[u8]) -> Result<Self, Error> {
        let canonical: <<C::Group as Group>::Field as Field>::Serialization = encoding
            .to_vec()
            .try_into()
            .map_err(|_| FieldError::MalformedScalar)?;
        let scalar = <<C::Group as Group>::Field>::deserialize(&canonical)?;
        Ok(Self(scalar))
    }
}

// Scalars held by this wrapper are secret material; keep them out of logs.
impl<C> Debug for SerializableScalar<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SerializableScalar")
            .field(&"<redacted>")
            .finish()
    }
}

impl<C> serde::Serialize for SerializableScalar<C>
where
    C: Ciphersuite,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serdect::array::serialize_hex_lower_or_bin(&self.serialize(), serializer)
    }
}

impl<'de, C> serde::Deserialize<'de> for SerializableScalar<C>
where
    C: Ciphersuite,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let mut encoding = vec![0u8; scalar_width::<C>()];
        serdect::array::deserialize_hex_or_bin(&mut encoding, deserializer)?;
        SerializableScalar::deserialize(&encoding).map_err(serde::de::Error::custom)
    }
}

/// Helper struct to serialize a group element.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) struct SerializableElement<C: Ciphersuite>(pub(crate) Element<C>);

impl<C> SerializableElement<C>
where
    C: Ciphersuite,
{
    /// Serialize an element.
    pub(crate) fn serialize(&self) -> Vec<u8> {
        <C::Group as Group>::serialize(&self.0).as_ref().to_vec()
    }

    /// Deserialize an element from a serialized buffer. Returns an error if
    /// it's malformed.
    pub(crate) fn deserialize(encoding: &[u8]) -> Result<Self, Error> {
        let canonical: <C::Group as Group>::Serialization = encoding
            .to_vec()
            .try_into()
            .map_err(|_| GroupError::MalformedElement)?;
        let element = <C::Group as Group>::deserialize(&canonical)?;
        Ok(Self(element))
    }
}

impl<C> Debug for SerializableElement<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SerializableElement")
            .field(&hex::encode(self.serialize()))
            .finish()
    }
}

impl<C> serde::Serialize for SerializableElement<C>
where
    C: Ciphersuite,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serdect::array::serialize_hex_lower_or_bin(&self.serialize(), serializer)
    }
}

impl<'de, C> serde::Deserialize<'de> for SerializableElement<C>
where
    C: Ciphersuite,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let mut encoding = vec![0u8; element_width::<C>()];
        serdect::array::deserialize_hex_or_bin(&mut encoding, deserializer)?;
        SerializableElement::deserialize(&encoding).map_err(serde::de::Error::custom)
    }
}

/// Compact ciphersuite tag carried by binary headers: the CRC-32 of the
/// suite's ID string. Binary framings would waste most of the ID's bytes on
/// redundancy; the tag still makes two different suites reject each other's
/// messages. Human-readable framings carry the full ID instead.
const fn suite_tag<C>() -> u32
where
    C: Ciphersuite,
{
    const_crc32::crc32(C::ID.as_bytes())
}

/// Header that is common to all serialized messages.
///
/// Carries no state of its own; it exists to stamp the wire version and the
/// ciphersuite into every encoding and to reject mismatches on decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header<C: Ciphersuite> {
    phantom: PhantomData<C>,
}

impl<C> Header<C>
where
    C: Ciphersuite,
{
    /// Create the current default header.
    pub(crate) fn new() -> Self {
        Self {
            phantom: PhantomData,
        }
    }
}

impl<C> Default for Header<C>
where
    C: Ciphersuite,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C> serde::Serialize for Header<C>
where
    C: Ciphersuite,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::Serialize as _;

        if serializer.is_human_readable() {
            (WIRE_VERSION, C::ID).serialize(serializer)
        } else {
            (WIRE_VERSION, suite_tag::<C>()).serialize(serializer)
        }
    }
}

impl<'de, C> serde::Deserialize<'de> for Header<C>
where
    C: Ciphersuite,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let version = if deserializer.is_human_readable() {
            let (version, id) = <(u8, String) as serde::Deserialize>::deserialize(deserializer)?;
            if id != C::ID {
                return Err(serde::de::Error::custom(
                    "message was encoded for a different ciphersuite",
                ));
            }
            version
        } else {
            let (version, tag) = <(u8, u32) as serde::Deserialize>::deserialize(deserializer)?;
            if tag != suite_tag::<C>() {
                return Err(serde::de::Error::custom(
                    "message was encoded for a different ciphersuite",
                ));
            }
            version
        };

        if version != WIRE_VERSION {
            return Err(serde::de::Error::custom("unsupported wire format version"));
        }
        Ok(Header::new())
    }
}

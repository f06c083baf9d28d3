//! Error types.

use thiserror::Error;

/// An error produced by the secret sharing, VSS or DKG layers.
#[non_exhaustive]
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum Error {
    /// The threshold is out of range for the participant set.
    #[error("threshold must be at least 2 and not larger than the number of participants")]
    InvalidThreshold,
    /// Two polynomials with different thresholds were combined.
    #[error("polynomials must have the same number of coefficients")]
    ThresholdMismatch,
    /// Fewer shares than the threshold were supplied to a recovery operation.
    #[error("not enough shares to recover the secret")]
    NotEnoughShares,
    /// The same share index appeared more than once in a recovery input.
    #[error("duplicate share index {index}")]
    DuplicateIndex {
        /// The index that was repeated.
        index: u32,
    },
    /// A message referenced a participant index outside the participant list.
    #[error("index out of bounds of the participant list")]
    OutOfBounds,
    /// A deal was decrypted by a verifier it was not addressed to.
    #[error("deal addressed to a different participant")]
    WrongRecipient,
    /// A second deal from the same dealer was presented to a verifier.
    #[error("deal from this dealer was already processed")]
    DuplicateDeal,
    /// A second response for the same (dealer, verifier) pair was presented.
    #[error("response from this verifier was already recorded")]
    DuplicateResponse,
    /// A share does not open the dealer's commitment polynomial.
    ///
    /// Internal to the verifier: surfaced as a `Complaint` response rather
    /// than as an error from deal processing.
    #[error("share does not match the commitment polynomial")]
    CommitmentMismatch,
    /// A justification failed to exonerate the dealer.
    #[error("justification does not open the commitments; dealer disqualified")]
    InvalidJustification {
        /// Index of the dealer that issued the justification, if known at the
        /// layer that detected the fault.
        culprit: Option<u32>,
    },
    /// A distributed key share was requested before the qualified set was
    /// complete.
    #[error("distributed key is not certified")]
    NotCertified,
    /// A response referenced a dealer whose deal has not been processed yet.
    ///
    /// The response must be presented again after the corresponding deal.
    #[error("response references an unknown dealer")]
    UnknownDealer,
    /// The caller's public key is not in the participant list.
    #[error("own public key not found in the participant list")]
    UnknownParticipant,
    /// A message carried a session identifier from a different VSS run.
    #[error("message does not belong to this session")]
    SessionMismatch,
    /// Two distributed key shares with different indices were combined.
    #[error("distributed key shares belong to different participants")]
    IndexMismatch,
    /// A refresh share whose distributed secret is not zero was supplied.
    #[error("refresh share must commit to a zero secret")]
    NonZeroRefresh,
    /// Signature verification failed.
    #[error("invalid signature")]
    InvalidSignature,
    /// The encoding of a signature was malformed.
    #[error("malformed signature encoding")]
    MalformedSignature,
    /// The encoding of a signing key was malformed.
    #[error("malformed signing key encoding")]
    MalformedSigningKey,
    /// A polynomial was built without coefficients.
    #[error("commitment polynomial has no coefficients")]
    MissingCommitment,
    /// An encrypted deal could not be sealed.
    #[error("deal encryption failed")]
    EncryptionFailure,
    /// An encrypted deal could not be opened.
    #[error("deal decryption failed")]
    DecryptionFailure,
    /// Error in the scalar field.
    #[error("error in scalar field")]
    FieldError(#[from] FieldError),
    /// Error in the group.
    #[error("error in group")]
    GroupError(#[from] GroupError),
    /// Error serializing a value.
    #[error("error serializing value")]
    SerializationError,
    /// Error deserializing a value.
    #[error("error deserializing value")]
    DeserializationError,
}

impl Error {
    /// Return the index of the dealer that caused the error, if the error is
    /// attributable to a misbehaving dealer.
    ///
    /// This can be used to penalize the dealer, e.g. by excluding it from
    /// future runs.
    pub fn culprit(&self) -> Option<u32> {
        match self {
            Error::InvalidJustification { culprit } => *culprit,
            _ => None,
        }
    }
}

/// An error related to a scalar field.
#[non_exhaustive]
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum FieldError {
    /// The encoding of a scalar was malformed.
    #[error("malformed scalar encoding")]
    MalformedScalar,
    /// This scalar MUST NOT be zero.
    #[error("invalid for this scalar to be zero")]
    InvalidZeroScalar,
}

/// An error related to a group or one of its elements.
#[non_exhaustive]
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum GroupError {
    /// The encoding of a group element was malformed.
    #[error("malformed group element encoding")]
    MalformedElement,
}

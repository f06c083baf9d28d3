//! Distributed key generation.
//!
//! Every participant acts as a VSS dealer for a secret of its own and as a
//! verifier of everybody else's deals. Once every deal is certified, the
//! distributed secret is the sum of the dealt secrets: each participant's
//! share of it is the sum of the shares it received, and the public
//! polynomial is the coefficient-wise sum of the qualified dealers'
//! commitment polynomials. The distributed secret itself is never computed by
//! anyone.

use std::collections::BTreeMap;

use derive_getters::Getters;
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::{
    poly::{PriShare, PubPoly},
    serialization::{decode, encode, Header, SerializableElement, SerializableScalar},
    vss, Ciphersuite, Element, Error, Field, Group, Scalar, SigningKey, VerifyingKey,
};

/// A deal from one DKG participant to another: the dealer's index in the
/// participant list, plus the sealed VSS deal. Sent point-to-point.
#[derive(Clone, Debug, PartialEq, Eq, Getters, serde::Serialize, serde::Deserialize)]
#[serde(bound = "C: Ciphersuite")]
#[serde(deny_unknown_fields)]
pub struct Deal<C: Ciphersuite> {
    #[getter(skip)]
    pub(crate) header: Header<C>,
    /// Index of the dealer in the participant list.
    pub(crate) index: u32,
    /// The sealed deal.
    pub(crate) deal: vss::EncryptedDeal<C>,
}

impl<C> Deal<C>
where
    C: Ciphersuite,
{
    /// Serialize the struct into a Vec.
    pub fn serialize(&self) -> Result<Vec<u8>, Error> {
        encode(self)
    }

    /// Deserialize the struct from a slice of bytes.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        decode(bytes)
    }
}

/// A verifier's verdict on the deal of the dealer at `index`. Broadcast to
/// all participants.
#[derive(Clone, Debug, PartialEq, Eq, Getters, serde::Serialize, serde::Deserialize)]
#[serde(bound = "C: Ciphersuite")]
#[serde(deny_unknown_fields)]
pub struct Response<C: Ciphersuite> {
    #[getter(skip)]
    pub(crate) header: Header<C>,
    /// Index of the dealer whose deal this responds to.
    pub(crate) index: u32,
    /// The verdict.
    pub(crate) response: vss::Response<C>,
}

impl<C> Response<C>
where
    C: Ciphersuite,
{
    /// Serialize the struct into a Vec.
    pub fn serialize(&self) -> Result<Vec<u8>, Error> {
        encode(self)
    }

    /// Deserialize the struct from a slice of bytes.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        decode(bytes)
    }
}

/// A dealer's answer to a complaint against its deal. Broadcast to all
/// participants.
#[derive(Clone, Debug, PartialEq, Eq, Getters, serde::Serialize, serde::Deserialize)]
#[serde(bound = "C: Ciphersuite")]
#[serde(deny_unknown_fields)]
pub struct Justification<C: Ciphersuite> {
    #[getter(skip)]
    pub(crate) header: Header<C>,
    /// Index of the dealer that issued the justification.
    pub(crate) index: u32,
    /// The justification.
    pub(crate) justification: vss::Justification<C>,
}

impl<C> Justification<C>
where
    C: Ciphersuite,
{
    /// Serialize the struct into a Vec.
    pub fn serialize(&self) -> Result<Vec<u8>, Error> {
        encode(self)
    }

    /// Deserialize the struct from a slice of bytes.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        decode(bytes)
    }
}

/// A participant's share of the distributed key.
#[derive(Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(bound = "C: Ciphersuite")]
#[serde(deny_unknown_fields)]
pub struct DistKeyShare<C: Ciphersuite> {
    pub(crate) header: Header<C>,
    /// Coefficients of the public polynomial of the distributed key;
    /// the first one is the distributed public key.
    pub(crate) commits: Vec<SerializableElement<C>>,
    /// This participant's share of the distributed secret.
    pub(crate) share: PriShare<C>,
    /// Coefficients of the secret polynomial this participant dealt, kept so
    /// the share can later be audited or reshared. Empty for renewed shares,
    /// whose summed polynomial is not attributable to a single dealer.
    pub(crate) private_poly: Vec<SerializableScalar<C>>,
}

impl<C> DistKeyShare<C>
where
    C: Ciphersuite,
{
    /// The distributed public key.
    pub fn public(&self) -> Element<C> {
        self.commits
            .first()
            .expect("distributed keys always have at least one commitment")
            .0
    }

    /// Coefficients of the public polynomial of the distributed key.
    pub fn commitments(&self) -> Vec<Element<C>> {
        self.commits.iter().map(|c| c.0).collect()
    }

    /// This participant's share of the distributed secret.
    pub fn share(&self) -> &PriShare<C> {
        &self.share
    }

    /// Coefficients of the secret polynomial this participant dealt.
    pub fn private_poly(&self) -> Vec<Scalar<C>> {
        self.private_poly.iter().map(|c| c.0).collect()
    }

    /// Add a refresh share `other` to this share, producing a new share of
    /// the *same* distributed key.
    ///
    /// `other` must come from a DKG run over a zero secret (see
    /// [`DistKeyGenerator::new_for_refresh`]): its distributed public key
    /// must be the identity, otherwise the result would be a share of a
    /// different key and the call fails with [`Error::NonZeroRefresh`].
    pub fn renew(&self, other: &DistKeyShare<C>) -> Result<DistKeyShare<C>, Error> {
        if self.share.index() != other.share.index() {
            return Err(Error::IndexMismatch);
        }
        if self.commits.len() != other.commits.len() {
            return Err(Error::ThresholdMismatch);
        }
        if other.public() != <C::Group>::identity() {
            return Err(Error::NonZeroRefresh);
        }

        let commits = self
            .commits
            .iter()
            .zip(other.commits.iter())
            .map(|(a, b)| SerializableElement(a.0 + b.0))
            .collect();
        let share = PriShare::new(self.share.index(), self.share.value() + other.share.value());

        Ok(DistKeyShare {
            header: Header::new(),
            commits,
            share,
            private_poly: Vec::new(),
        })
    }

    /// Serialize the struct into a Vec.
    pub fn serialize(&self) -> Result<Vec<u8>, Error> {
        encode(self)
    }

    /// Deserialize the struct from a slice of bytes.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        decode(bytes)
    }
}

impl<C> core::fmt::Debug for DistKeyShare<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DistKeyShare")
            .field("commits", &self.commits)
            .field("share", &self.share)
            .field("private_poly", &"<redacted>")
            .finish()
    }
}

impl<C> Zeroize for DistKeyShare<C>
where
    C: Ciphersuite,
{
    fn zeroize(&mut self) {
        self.share.zeroize();
        for coeff in self.private_poly.iter_mut() {
            *coeff = SerializableScalar(<<C::Group as Group>::Field>::zero());
        }
    }
}

/// The state of one participant in a distributed key generation run.
///
/// Owns this participant's VSS dealer and one verifier per dealer whose deal
/// has been processed. Deals, responses and justifications may arrive in any
/// order, as long as a dealer's deal is processed before responses referring
/// to it and everything is delivered before [`set_timeout`] or
/// [`dist_key_share`] is called.
///
/// [`set_timeout`]: DistKeyGenerator::set_timeout
/// [`dist_key_share`]: DistKeyGenerator::dist_key_share
pub struct DistKeyGenerator<C: Ciphersuite> {
    signing_key: SigningKey<C>,
    public_key: VerifyingKey<C>,
    index: u32,
    participants: Vec<VerifyingKey<C>>,
    threshold: u32,
    pub(crate) dealer: vss::Dealer<C>,
    verifiers: BTreeMap<u32, vss::Verifier<C>>,
}

impl<C> DistKeyGenerator<C>
where
    C: Ciphersuite,
{
    fn with_secret<R: RngCore + CryptoRng>(
        signing_key: SigningKey<C>,
        participants: Vec<VerifyingKey<C>>,
        threshold: u32,
        secret: Scalar<C>,
        rng: &mut R,
    ) -> Result<Self, Error> {
        let public_key = VerifyingKey::from(&signing_key);
        let index = participants
            .iter()
            .position(|p| *p == public_key)
            .ok_or(Error::UnknownParticipant)? as u32;

        let dealer = vss::Dealer::new(
            signing_key,
            secret,
            participants.clone(),
            threshold,
            rng,
        )?;

        Ok(Self {
            signing_key,
            public_key,
            index,
            participants,
            threshold,
            dealer,
            verifiers: BTreeMap::new(),
        })
    }

    /// Create a participant contributing a fresh random secret to the
    /// distributed key.
    ///
    /// Fails with [`Error::UnknownParticipant`] if the key's public image is
    /// not in the participant list, or [`Error::InvalidThreshold`] if the
    /// threshold is out of range.
    pub fn new<R: RngCore + CryptoRng>(
        signing_key: SigningKey<C>,
        participants: Vec<VerifyingKey<C>>,
        threshold: u32,
        rng: &mut R,
    ) -> Result<Self, Error> {
        let secret = <<C::Group as Group>::Field>::random(rng);
        Self::with_secret(signing_key, participants, threshold, secret, rng)
    }

    /// Create a participant contributing a zero secret.
    ///
    /// A full run among such participants produces [`DistKeyShare`]s of the
    /// identity key, usable with [`DistKeyShare::renew`] to refresh the
    /// shares of an existing key without changing it.
    pub fn new_for_refresh<R: RngCore + CryptoRng>(
        signing_key: SigningKey<C>,
        participants: Vec<VerifyingKey<C>>,
        threshold: u32,
        rng: &mut R,
    ) -> Result<Self, Error> {
        let secret = <<C::Group as Group>::Field>::zero();
        Self::with_secret(signing_key, participants, threshold, secret, rng)
    }

    /// Produce the deals to send to every other participant, keyed by the
    /// recipient's index.
    ///
    /// This participant's own deal is processed in place and omitted from the
    /// map.
    ///
    /// # Panics
    ///
    /// If the own deal cannot be processed or gives a complaint. That is not
    /// a protocol fault of a remote peer but a local bug or misconfiguration,
    /// and the run cannot continue.
    pub fn deals<R: RngCore + CryptoRng>(
        &mut self,
        rng: &mut R,
    ) -> Result<BTreeMap<u32, Deal<C>>, Error> {
        let encrypted = self.dealer.encrypted_deals(rng)?;

        let mut deals = BTreeMap::new();
        for (i, deal) in encrypted.into_iter().enumerate() {
            let i = i as u32;
            let deal = Deal {
                header: Header::new(),
                index: self.index,
                deal,
            };

            if i == self.index {
                if self.verifiers.contains_key(&self.index) {
                    // Own deal already processed.
                    continue;
                }
                let response = match self.process_deal(&deal, rng) {
                    Ok(response) => response,
                    Err(e) => panic!("dkg: cannot process own deal: {e}"),
                };
                if response.response.status != vss::Status::Approval {
                    panic!("dkg: own deal gave a complaint");
                }
                continue;
            }

            deals.insert(i, deal);
        }
        Ok(deals)
    }

    /// Process a deal from the dealer at `deal.index`, producing the response
    /// to broadcast to all participants.
    ///
    /// Fails with [`Error::OutOfBounds`] if the dealer index is not in the
    /// participant list and [`Error::DuplicateDeal`] if a deal from that
    /// dealer was already processed.
    pub fn process_deal<R: RngCore + CryptoRng>(
        &mut self,
        deal: &Deal<C>,
        rng: &mut R,
    ) -> Result<Response<C>, Error> {
        let dealer_key = *self
            .participants
            .get(deal.index as usize)
            .ok_or(Error::OutOfBounds)?;

        if self.verifiers.contains_key(&deal.index) {
            return Err(Error::DuplicateDeal);
        }

        let mut verifier =
            vss::Verifier::new(self.signing_key, dealer_key, self.participants.clone())?;
        let response = verifier.process_encrypted_deal(&deal.deal, rng)?;

        // The dealer approves its own deal implicitly; it never broadcasts a
        // response for it.
        verifier.record_implicit_approval(deal.index);

        self.verifiers.insert(deal.index, verifier);

        Ok(Response {
            header: Header::new(),
            index: deal.index,
            response,
        })
    }

    /// Process a response from another participant about the deal of the
    /// dealer at `response.index`.
    ///
    /// If the response complains about this participant's own deal, the
    /// returned [`Justification`] reveals the disputed share and must be
    /// broadcast to all participants.
    ///
    /// Fails with [`Error::UnknownDealer`] if no deal from that dealer has
    /// been processed yet; the response must then be presented again after
    /// the deal.
    pub fn process_response<R: RngCore + CryptoRng>(
        &mut self,
        response: &Response<C>,
        rng: &mut R,
    ) -> Result<Option<Justification<C>>, Error> {
        let verifier = self
            .verifiers
            .get_mut(&response.index)
            .ok_or(Error::UnknownDealer)?;
        verifier.process_response(&response.response)?;

        if response.index != self.index {
            return Ok(None);
        }

        let justification = match self.dealer.process_response(&response.response, rng)? {
            Some(justification) => justification,
            None => return Ok(None),
        };

        // A justification for the own deal; feed it to the own verifier so
        // this participant's view stays consistent with the broadcast.
        let own = self
            .verifiers
            .get_mut(&self.index)
            .expect("own deal is processed before any response to it");
        own.process_justification(&justification)?;

        Ok(Some(Justification {
            header: Header::new(),
            index: self.index,
            justification,
        }))
    }

    /// Process a justification issued by the dealer at `justification.index`.
    ///
    /// Fails with [`Error::UnknownDealer`] if no deal from that dealer has
    /// been processed yet, and with [`Error::InvalidJustification`] naming
    /// the dealer if the revealed share still fails the commitment check, in
    /// which case the dealer is disqualified.
    pub fn process_justification(&mut self, justification: &Justification<C>) -> Result<(), Error> {
        let verifier = self
            .verifiers
            .get_mut(&justification.index)
            .ok_or(Error::UnknownDealer)?;
        verifier
            .process_justification(&justification.justification)
            .map_err(|e| match e {
                Error::InvalidJustification { .. } => Error::InvalidJustification {
                    culprit: Some(justification.index),
                },
                e => e,
            })
    }

    /// Force a verdict for every verifier that has not responded, making
    /// certification decidable once the caller decides no more messages will
    /// arrive.
    pub fn set_timeout(&mut self) {
        for verifier in self.verifiers.values_mut() {
            verifier.set_timeout();
        }
        self.dealer.set_timeout();
    }

    /// The qualified set: indices of dealers whose deals are certified, in
    /// ascending order.
    pub fn qual(&self) -> Vec<u32> {
        self.verifiers
            .iter()
            .filter(|(_, v)| v.deal_certified())
            .map(|(i, _)| *i)
            .collect()
    }

    /// Whether the distributed key is certified.
    ///
    /// This enforces the strict policy: every single participant must be
    /// qualified. Use [`qual`] to inspect the qualified set when diagnosing
    /// an uncertified run.
    ///
    /// [`qual`]: DistKeyGenerator::qual
    pub fn certified(&self) -> bool {
        self.qual().len() == self.participants.len()
    }

    /// Compute this participant's share of the distributed key.
    ///
    /// Fails with [`Error::NotCertified`] until [`certified`] holds.
    ///
    /// [`certified`]: DistKeyGenerator::certified
    pub fn dist_key_share(&self) -> Result<DistKeyShare<C>, Error> {
        if !self.certified() {
            return Err(Error::NotCertified);
        }

        let mut share_value = <<C::Group as Group>::Field>::zero();
        let mut public_poly: Option<PubPoly<C>> = None;

        for verifier in self.verifiers.values().filter(|v| v.deal_certified()) {
            let deal = verifier.deal().ok_or(Error::NotCertified)?;

            // Share of the distributed secret: sum of all received shares.
            share_value = share_value + deal.sec_share().value();

            // Public polynomial of the distributed key: sum of all dealers'
            // secret-polynomial commitments.
            let poly = PubPoly::new(<C::Group>::generator(), deal.commitments());
            public_poly = Some(match public_poly {
                None => poly,
                Some(acc) => acc.add(&poly)?,
            });
        }

        let public_poly = public_poly.ok_or(Error::NotCertified)?;

        Ok(DistKeyShare {
            header: Header::new(),
            commits: public_poly
                .commitments()
                .into_iter()
                .map(SerializableElement)
                .collect(),
            share: PriShare::new(self.index, share_value),
            private_poly: self
                .dealer
                .private_poly()
                .coefficients()
                .into_iter()
                .map(SerializableScalar)
                .collect(),
        })
    }

    /// This participant's index in the participant list.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The participant list.
    pub fn participants(&self) -> &[VerifyingKey<C>] {
        &self.participants
    }

    /// The sharing threshold.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// This participant's long-term verifying key.
    pub fn public_key(&self) -> VerifyingKey<C> {
        self.public_key
    }
}

impl<C> core::fmt::Debug for DistKeyGenerator<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DistKeyGenerator")
            .field("index", &self.index)
            .field("threshold", &self.threshold)
            .field("participants", &self.participants.len())
            .field("processed_deals", &self.verifiers.len())
            .finish_non_exhaustive()
    }
}

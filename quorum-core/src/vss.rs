//! Pedersen verifiable secret sharing.
//!
//! A [`Dealer`] shares a secret among a set of verifiers: it samples a secret
//! polynomial `f` with `f(0)` the secret and a blinding polynomial `g`,
//! publishes the coefficient commitments of both (`F_k = f_k·G` over the group
//! generator, `G_k = g_k·H` over a base derived from the participant set), and
//! seals the dual share `(f(i+1), g(i+1))` to each verifier's long-term key.
//!
//! Each [`Verifier`] opens its deal and checks it against the combined
//! Pedersen commitments `C_k = F_k + G_k`, answering with a signed `Approval`
//! or `Complaint` [`Response`]. The dealer answers complaints with a
//! [`Justification`] revealing the disputed share in clear; a justification
//! that still fails the check disqualifies the dealer.
//!
//! A deal is *certified* once at least `threshold` approvals are recorded, no
//! complaint is left standing, and every verifier has either responded or
//! been timed out.

use std::collections::BTreeMap;

use derive_getters::Getters;
use rand_core::{CryptoRng, RngCore};

use crate::{
    ecies,
    poly::{PriPoly, PriShare, PubPoly},
    serialization::{decode, encode, Header, SerializableElement},
    Ciphersuite, Element, Error, Group, Scalar, SigningKey, VerifyingKey,
};

pub(crate) const DEAL_DOMAIN: &[u8] = b"vss-deal";
pub(crate) const RESPONSE_DOMAIN: &[u8] = b"vss-response";
pub(crate) const JUSTIFICATION_DOMAIN: &[u8] = b"vss-justification";

/// The verdict of a verifier on a deal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Status {
    /// The share did not open the dealer's commitments, or the verifier never
    /// responded before the timeout.
    Complaint,
    /// The share opened the dealer's commitments.
    Approval,
}

/// The secret payload a dealer prepares for one verifier: the dual share
/// together with the public data that lets the verifier check it.
///
/// Deals travel encrypted (see [`EncryptedDeal`]); in clear they only appear
/// inside a [`Justification`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(bound = "C: Ciphersuite")]
#[serde(deny_unknown_fields)]
pub struct Deal<C: Ciphersuite> {
    pub(crate) header: Header<C>,
    /// Session this deal belongs to.
    pub(crate) session_id: Vec<u8>,
    /// The recipient's share of the secret polynomial `f`.
    pub(crate) sec_share: PriShare<C>,
    /// The recipient's share of the blinding polynomial `g`.
    pub(crate) rnd_share: PriShare<C>,
    /// The sharing threshold.
    pub(crate) threshold: u32,
    /// Commitments `F_k = f_k·G` to the secret polynomial. Identical across
    /// all recipients of a session; their sum across qualified dealers is the
    /// distributed key polynomial.
    pub(crate) commitments: Vec<SerializableElement<C>>,
    /// Commitments `G_k = g_k·H` to the blinding polynomial.
    pub(crate) blinding_commitments: Vec<SerializableElement<C>>,
}

impl<C> Deal<C>
where
    C: Ciphersuite,
{
    /// Session this deal belongs to.
    pub fn session_id(&self) -> &[u8] {
        &self.session_id
    }

    /// The recipient's share of the secret polynomial.
    pub fn sec_share(&self) -> &PriShare<C> {
        &self.sec_share
    }

    /// The recipient's share of the blinding polynomial.
    pub fn rnd_share(&self) -> &PriShare<C> {
        &self.rnd_share
    }

    /// The sharing threshold.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// The commitments to the secret polynomial.
    pub fn commitments(&self) -> Vec<Element<C>> {
        self.commitments.iter().map(|c| c.0).collect()
    }

    /// The commitments to the blinding polynomial.
    pub fn blinding_commitments(&self) -> Vec<Element<C>> {
        self.blinding_commitments.iter().map(|c| c.0).collect()
    }
}

/// A [`Deal`] sealed to its recipient's long-term key.
#[derive(Clone, Debug, PartialEq, Eq, Getters, serde::Serialize, serde::Deserialize)]
#[serde(bound = "C: Ciphersuite")]
#[serde(deny_unknown_fields)]
pub struct EncryptedDeal<C: Ciphersuite> {
    #[getter(skip)]
    pub(crate) header: Header<C>,
    /// The ephemeral Diffie-Hellman key of the seal.
    #[getter(skip)]
    pub(crate) dh_key: SerializableElement<C>,
    /// The dealer's signature over the ephemeral key.
    pub(crate) signature: crate::Signature<C>,
    /// AEAD nonce.
    pub(crate) nonce: [u8; ecies::NONCE_SIZE],
    /// AEAD ciphertext of the postcard-encoded [`Deal`].
    pub(crate) cipher: Vec<u8>,
}

impl<C> EncryptedDeal<C>
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

/// A verifier's signed verdict on a dealer's deal, broadcast to all
/// participants.
#[derive(Clone, Debug, PartialEq, Eq, Getters, serde::Serialize, serde::Deserialize)]
#[serde(bound = "C: Ciphersuite")]
#[serde(deny_unknown_fields)]
pub struct Response<C: Ciphersuite> {
    #[getter(skip)]
    pub(crate) header: Header<C>,
    /// Session this response belongs to.
    pub(crate) session_id: Vec<u8>,
    /// Index of the responding verifier.
    pub(crate) index: u32,
    /// The verdict.
    pub(crate) status: Status,
    /// The verifier's signature over the verdict.
    pub(crate) signature: crate::Signature<C>,
}

impl<C> Response<C>
where
    C: Ciphersuite,
{
    pub(crate) fn message_bytes(session_id: &[u8], index: u32, status: Status) -> Vec<u8> {
        let mut msg = Vec::from(RESPONSE_DOMAIN);
        msg.extend_from_slice(session_id);
        msg.extend_from_slice(&index.to_le_bytes());
        msg.push(status as u8);
        msg
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

/// A dealer's signed answer to a complaint, revealing the complainer's deal
/// in clear so every participant can re-check it.
#[derive(Clone, Debug, PartialEq, Eq, Getters, serde::Serialize, serde::Deserialize)]
#[serde(bound = "C: Ciphersuite")]
#[serde(deny_unknown_fields)]
pub struct Justification<C: Ciphersuite> {
    #[getter(skip)]
    pub(crate) header: Header<C>,
    /// Session this justification belongs to.
    pub(crate) session_id: Vec<u8>,
    /// Index of the complaining verifier whose deal is revealed.
    pub(crate) index: u32,
    /// The revealed deal.
    pub(crate) deal: Deal<C>,
    /// The dealer's signature over the revealed deal.
    pub(crate) signature: crate::Signature<C>,
}

impl<C> Justification<C>
where
    C: Ciphersuite,
{
    pub(crate) fn message_bytes(
        session_id: &[u8],
        index: u32,
        deal: &Deal<C>,
    ) -> Result<Vec<u8>, Error> {
        let mut msg = Vec::from(JUSTIFICATION_DOMAIN);
        msg.extend_from_slice(session_id);
        msg.extend_from_slice(&index.to_le_bytes());
        msg.extend_from_slice(&encode(deal)?);
        Ok(msg)
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

/// Derive the second Pedersen base `H` from the participant set, so its
/// discrete logarithm relative to the generator is unknown to everybody.
pub(crate) fn derive_blinding_base<C: Ciphersuite>(verifiers: &[VerifyingKey<C>]) -> Element<C> {
    let mut preimage = Vec::new();
    for verifier in verifiers {
        preimage.extend_from_slice(&verifier.serialize());
    }
    C::H3(&preimage)
}

/// Derive the session identifier binding a VSS run to the dealer, the
/// participant set, both commitment polynomials and the threshold.
pub(crate) fn session_id<C: Ciphersuite>(
    dealer: &VerifyingKey<C>,
    verifiers: &[VerifyingKey<C>],
    commitments: &[Element<C>],
    blinding_commitments: &[Element<C>],
    threshold: u32,
) -> Vec<u8> {
    let mut preimage = Vec::from(DEAL_DOMAIN);
    preimage.extend_from_slice(&dealer.serialize());
    for verifier in verifiers {
        preimage.extend_from_slice(&verifier.serialize());
    }
    for commitment in commitments {
        preimage.extend_from_slice(<C::Group>::serialize(commitment).as_ref());
    }
    for commitment in blinding_commitments {
        preimage.extend_from_slice(<C::Group>::serialize(commitment).as_ref());
    }
    preimage.extend_from_slice(&threshold.to_le_bytes());
    C::H2(&preimage).as_ref().to_vec()
}

/// Check that a deal's dual share opens the published commitments: the
/// combined Pedersen equation `f_i·G + g_i·H == Σ_k (F_k + G_k)·x^k` plus the
/// binding of the secret share to the secret-polynomial commitments alone,
/// which is what ties the distributed key to the shares.
///
/// Fails with [`Error::CommitmentMismatch`], which callers convert into a
/// `Complaint` (first delivery) or a disqualification (justification).
fn verify_deal_shares<C: Ciphersuite>(deal: &Deal<C>, base_h: &Element<C>) -> Result<(), Error> {
    let generator = <C::Group>::generator();

    let secret_poly = PubPoly::new(generator, deal.commitments());
    if !secret_poly.check(&deal.sec_share) {
        return Err(Error::CommitmentMismatch);
    }

    let blinding_poly = PubPoly::new(*base_h, deal.blinding_commitments());
    let pedersen_poly = secret_poly
        .add(&blinding_poly)
        .map_err(|_| Error::CommitmentMismatch)?;

    let opening = generator * deal.sec_share.value() + *base_h * deal.rnd_share.value();
    if opening != pedersen_poly.eval(deal.sec_share.index()).value() {
        return Err(Error::CommitmentMismatch);
    }
    Ok(())
}

/// Shared response bookkeeping between the dealer and the verifiers.
///
/// Tracks one verdict per verifier index, append-only except for the
/// complaint-to-approval upgrade a valid justification performs.
#[derive(Clone)]
pub(crate) struct Aggregator<C: Ciphersuite> {
    pub(crate) dealer_key: VerifyingKey<C>,
    pub(crate) verifiers: Vec<VerifyingKey<C>>,
    pub(crate) base_h: Element<C>,
    pub(crate) session_id: Vec<u8>,
    pub(crate) threshold: u32,
    pub(crate) deal: Option<Deal<C>>,
    pub(crate) responses: BTreeMap<u32, Status>,
    pub(crate) bad_dealer: bool,
    pub(crate) timeout: bool,
}

impl<C> Aggregator<C>
where
    C: Ciphersuite,
{
    fn new(
        dealer_key: VerifyingKey<C>,
        verifiers: Vec<VerifyingKey<C>>,
        base_h: Element<C>,
        session_id: Vec<u8>,
        threshold: u32,
    ) -> Self {
        Self {
            dealer_key,
            verifiers,
            base_h,
            session_id,
            threshold,
            deal: None,
            responses: BTreeMap::new(),
            bad_dealer: false,
            timeout: false,
        }
    }

    /// Record a signed response after checking its session, bounds and
    /// signature. A given verifier index is accepted at most once.
    fn process_response(&mut self, response: &Response<C>) -> Result<(), Error> {
        if response.session_id != self.session_id {
            return Err(Error::SessionMismatch);
        }
        let verifier_key = self
            .verifiers
            .get(response.index as usize)
            .ok_or(Error::OutOfBounds)?;
        let msg = Response::<C>::message_bytes(&response.session_id, response.index, response.status);
        verifier_key.verify(&msg, &response.signature)?;

        self.set_status(response.index, response.status)
    }

    fn set_status(&mut self, index: u32, status: Status) -> Result<(), Error> {
        if index as usize >= self.verifiers.len() {
            return Err(Error::OutOfBounds);
        }
        if self.responses.contains_key(&index) {
            return Err(Error::DuplicateResponse);
        }
        self.responses.insert(index, status);
        Ok(())
    }

    /// Validate a justification and upgrade the matching complaint to an
    /// approval. An invalid one marks the dealer as bad for good.
    fn process_justification(&mut self, justification: &Justification<C>) -> Result<(), Error> {
        if justification.session_id != self.session_id {
            return Err(Error::SessionMismatch);
        }
        let msg = Justification::<C>::message_bytes(
            &justification.session_id,
            justification.index,
            &justification.deal,
        )?;
        self.dealer_key.verify(&msg, &justification.signature)?;

        match self.responses.get(&justification.index) {
            Some(Status::Complaint) => {}
            // Nothing to justify: either no complaint was recorded from that
            // verifier, or it was already answered.
            _ => return Err(Error::InvalidJustification { culprit: None }),
        }

        let deal = &justification.deal;
        let consistent = deal.session_id == self.session_id
            && deal.sec_share.index() == justification.index
            && deal.rnd_share.index() == justification.index
            && deal.threshold == self.threshold
            && verify_deal_shares(deal, &self.base_h).is_ok();
        if !consistent {
            self.bad_dealer = true;
            return Err(Error::InvalidJustification { culprit: None });
        }

        self.responses.insert(justification.index, Status::Approval);
        Ok(())
    }

    /// Turn every missing response into an implicit complaint, making the
    /// certification predicate decidable.
    fn set_timeout(&mut self) {
        for index in 0..self.verifiers.len() as u32 {
            self.responses.entry(index).or_insert(Status::Complaint);
        }
        self.timeout = true;
    }

    /// Whether the deal is certified: every verifier accounted for, no
    /// standing complaint, and at least `threshold` approvals.
    fn deal_certified(&self) -> bool {
        if self.threshold == 0 {
            // No deal has been registered yet.
            return false;
        }

        let approvals = self
            .responses
            .values()
            .filter(|s| **s == Status::Approval)
            .count();
        let complaints = self.responses.len() - approvals;
        let absent = self.verifiers.len() - self.responses.len();

        !self.bad_dealer
            && complaints == 0
            && approvals >= self.threshold as usize
            && (self.timeout || absent == 0)
    }
}

/// The party sharing a secret: samples the polynomials, publishes the
/// commitments, seals one deal per verifier and answers complaints.
pub struct Dealer<C: Ciphersuite> {
    signing_key: SigningKey<C>,
    public_key: VerifyingKey<C>,
    secret_poly: PriPoly<C>,
    commitments: Vec<Element<C>>,
    blinding_commitments: Vec<Element<C>>,
    session_id: Vec<u8>,
    pub(crate) deals: Vec<Deal<C>>,
    aggregator: Aggregator<C>,
}

impl<C> Dealer<C>
where
    C: Ciphersuite,
{
    /// Create a dealer sharing `secret` among `verifiers` with the given
    /// reconstruction `threshold`.
    ///
    /// Fails with [`Error::InvalidThreshold`] unless `2 <= threshold <= n`.
    pub fn new<R: RngCore + CryptoRng>(
        signing_key: SigningKey<C>,
        secret: Scalar<C>,
        verifiers: Vec<VerifyingKey<C>>,
        threshold: u32,
        rng: &mut R,
    ) -> Result<Self, Error> {
        let n = verifiers.len() as u32;
        if threshold < 2 || threshold > n {
            return Err(Error::InvalidThreshold);
        }

        let public_key = VerifyingKey::from(&signing_key);
        let secret_poly = PriPoly::new(threshold, Some(secret), rng)?;
        let blinding_poly = PriPoly::new(threshold, None, rng)?;

        let base_h = derive_blinding_base::<C>(&verifiers);
        let commitments = secret_poly.commit(None).commitments();
        let blinding_commitments = blinding_poly.commit(Some(base_h)).commitments();

        let session_id = session_id::<C>(
            &public_key,
            &verifiers,
            &commitments,
            &blinding_commitments,
            threshold,
        );

        let deals = (0..n)
            .map(|i| Deal {
                header: Header::new(),
                session_id: session_id.clone(),
                sec_share: secret_poly.eval(i),
                rnd_share: blinding_poly.eval(i),
                threshold,
                commitments: commitments.iter().copied().map(SerializableElement).collect(),
                blinding_commitments: blinding_commitments
                    .iter()
                    .copied()
                    .map(SerializableElement)
                    .collect(),
            })
            .collect();

        let aggregator = Aggregator::new(
            public_key,
            verifiers,
            base_h,
            session_id.clone(),
            threshold,
        );

        Ok(Self {
            signing_key,
            public_key,
            secret_poly,
            commitments,
            blinding_commitments,
            session_id,
            deals,
            aggregator,
        })
    }

    /// Seal the deal of verifier `index` to its long-term key.
    pub fn encrypted_deal<R: RngCore + CryptoRng>(
        &self,
        index: u32,
        rng: &mut R,
    ) -> Result<EncryptedDeal<C>, Error> {
        let deal = self.deals.get(index as usize).ok_or(Error::OutOfBounds)?;
        let recipient = self
            .aggregator
            .verifiers
            .get(index as usize)
            .ok_or(Error::OutOfBounds)?
            .to_element();

        let plaintext = encode(deal)?;
        let (dh_key, nonce, cipher) = ecies::seal::<C, R>(rng, &recipient, &plaintext)?;

        let mut msg = Vec::from(DEAL_DOMAIN);
        msg.extend_from_slice(<C::Group>::serialize(&dh_key).as_ref());
        let signature = self.signing_key.sign(rng, &msg);

        Ok(EncryptedDeal {
            header: Header::new(),
            dh_key: SerializableElement(dh_key),
            signature,
            nonce,
            cipher,
        })
    }

    /// Seal one deal per verifier, in participant order.
    pub fn encrypted_deals<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> Result<Vec<EncryptedDeal<C>>, Error> {
        (0..self.deals.len() as u32)
            .map(|i| self.encrypted_deal(i, rng))
            .collect()
    }

    /// Record a verifier's response. A complaint against this dealer's own
    /// deal is answered with a [`Justification`] revealing the disputed share,
    /// which the caller must broadcast.
    pub fn process_response<R: RngCore + CryptoRng>(
        &mut self,
        response: &Response<C>,
        rng: &mut R,
    ) -> Result<Option<Justification<C>>, Error> {
        self.aggregator.process_response(response)?;

        if response.status == Status::Approval {
            return Ok(None);
        }

        // An honest dealer reveals the cleartext deal to answer a complaint,
        // and counts the slot as approved, mirroring what every verifier does
        // upon validating the justification.
        let deal = self.deals[response.index as usize].clone();
        self.aggregator
            .responses
            .insert(response.index, Status::Approval);

        let msg = Justification::<C>::message_bytes(&self.session_id, response.index, &deal)?;
        let signature = self.signing_key.sign(rng, &msg);

        Ok(Some(Justification {
            header: Header::new(),
            session_id: self.session_id.clone(),
            index: response.index,
            deal,
            signature,
        }))
    }

    /// Turn every missing response into an implicit complaint.
    pub fn set_timeout(&mut self) {
        self.aggregator.set_timeout();
    }

    /// Whether this dealer's deal is certified.
    pub fn deal_certified(&self) -> bool {
        self.aggregator.deal_certified()
    }

    /// The dealer's long-term verifying key.
    pub fn public_key(&self) -> VerifyingKey<C> {
        self.public_key
    }

    /// The session identifier of this VSS run.
    pub fn session_id(&self) -> &[u8] {
        &self.session_id
    }

    /// The commitments `F_k = f_k·G` to the secret polynomial.
    pub fn commitments(&self) -> Vec<Element<C>> {
        self.commitments.clone()
    }

    /// The commitments `G_k = g_k·H` to the blinding polynomial.
    pub fn blinding_commitments(&self) -> Vec<Element<C>> {
        self.blinding_commitments.clone()
    }

    /// The commitment `f(0)·G` to the shared secret.
    pub fn secret_commit(&self) -> Element<C> {
        self.commitments[0]
    }

    /// The secret polynomial. Needed to audit or reshare the secret later.
    pub fn private_poly(&self) -> &PriPoly<C> {
        &self.secret_poly
    }

    /// The sharing threshold.
    pub fn threshold(&self) -> u32 {
        self.aggregator.threshold
    }
}

impl<C> core::fmt::Debug for Dealer<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dealer")
            .field("public_key", &self.public_key)
            .field("session_id", &hex::encode(&self.session_id))
            .field("secret_poly", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// One recipient of a dealer's deal: decrypts and checks its share, responds,
/// and tracks the responses of the other verifiers to decide certification.
pub struct Verifier<C: Ciphersuite> {
    signing_key: SigningKey<C>,
    public_key: VerifyingKey<C>,
    index: u32,
    dealer_key: VerifyingKey<C>,
    aggregator: Aggregator<C>,
}

impl<C> Verifier<C>
where
    C: Ciphersuite,
{
    /// Create a verifier for the deal of the dealer identified by
    /// `dealer_key`, within the given participant set.
    ///
    /// Fails with [`Error::UnknownParticipant`] if the verifying key matching
    /// `signing_key` is not in the participant set.
    pub fn new(
        signing_key: SigningKey<C>,
        dealer_key: VerifyingKey<C>,
        verifiers: Vec<VerifyingKey<C>>,
    ) -> Result<Self, Error> {
        let public_key = VerifyingKey::from(&signing_key);
        let index = verifiers
            .iter()
            .position(|v| *v == public_key)
            .ok_or(Error::UnknownParticipant)? as u32;

        let base_h = derive_blinding_base::<C>(&verifiers);
        // Session and threshold are adopted from the first deal.
        let aggregator = Aggregator::new(dealer_key, verifiers, base_h, Vec::new(), 0);

        Ok(Self {
            signing_key,
            public_key,
            index,
            dealer_key,
            aggregator,
        })
    }

    /// Open and check an encrypted deal, producing the signed response to
    /// broadcast.
    ///
    /// Structural faults (wrong recipient, bad threshold, session mismatch,
    /// undecryptable payload) surface as errors; a share that fails the
    /// commitment check produces a `Complaint` response instead, since only
    /// the dealer can be blamed for it.
    pub fn process_encrypted_deal<R: RngCore + CryptoRng>(
        &mut self,
        encrypted: &EncryptedDeal<C>,
        rng: &mut R,
    ) -> Result<Response<C>, Error> {
        if self.aggregator.deal.is_some() {
            return Err(Error::DuplicateDeal);
        }

        let mut msg = Vec::from(DEAL_DOMAIN);
        msg.extend_from_slice(&encrypted.dh_key.serialize());
        self.dealer_key.verify(&msg, &encrypted.signature)?;

        let plaintext = ecies::open::<C>(
            &self.signing_key.scalar,
            &encrypted.dh_key.0,
            &encrypted.nonce,
            &encrypted.cipher,
        )?;
        let deal: Deal<C> = decode(&plaintext)?;

        if deal.sec_share.index() != self.index || deal.rnd_share.index() != self.index {
            return Err(Error::WrongRecipient);
        }

        let n = self.aggregator.verifiers.len() as u32;
        if deal.threshold < 2 || deal.threshold > n {
            return Err(Error::InvalidThreshold);
        }
        if deal.commitments.len() != deal.threshold as usize
            || deal.blinding_commitments.len() != deal.threshold as usize
        {
            return Err(Error::InvalidThreshold);
        }

        let expected_sid = session_id::<C>(
            &self.dealer_key,
            &self.aggregator.verifiers,
            &deal.commitments(),
            &deal.blinding_commitments(),
            deal.threshold,
        );
        if expected_sid != deal.session_id {
            return Err(Error::SessionMismatch);
        }

        // The dealer's slot is consumed from here on, valid share or not.
        self.aggregator.session_id = deal.session_id.clone();
        self.aggregator.threshold = deal.threshold;

        let status = match verify_deal_shares(&deal, &self.aggregator.base_h) {
            Ok(()) => Status::Approval,
            Err(Error::CommitmentMismatch) => Status::Complaint,
            Err(e) => return Err(e),
        };

        let session_id = deal.session_id.clone();
        self.aggregator.deal = Some(deal);
        self.aggregator.set_status(self.index, status)?;

        let msg = Response::<C>::message_bytes(&session_id, self.index, status);
        let signature = self.signing_key.sign(rng, &msg);

        Ok(Response {
            header: Header::new(),
            session_id,
            index: self.index,
            status,
            signature,
        })
    }

    /// Record another verifier's response.
    pub fn process_response(&mut self, response: &Response<C>) -> Result<(), Error> {
        self.aggregator.process_response(response)
    }

    /// Validate a dealer's justification. A valid one upgrades the matching
    /// complaint to an approval; if it answered this verifier's own
    /// complaint, the revealed deal replaces the rejected one. An invalid one
    /// disqualifies the dealer.
    pub fn process_justification(&mut self, justification: &Justification<C>) -> Result<(), Error> {
        self.aggregator.process_justification(justification)?;

        if justification.index == self.index {
            self.aggregator.deal = Some(justification.deal.clone());
        }
        Ok(())
    }

    /// Record an approval for `index` without a signed response.
    ///
    /// Used by the DKG layer to account for the dealer's implicit approval of
    /// its own deal; a no-op if a response from that index already exists.
    pub(crate) fn record_implicit_approval(&mut self, index: u32) {
        self.aggregator
            .responses
            .entry(index)
            .or_insert(Status::Approval);
    }

    /// Turn every missing response into an implicit complaint.
    pub fn set_timeout(&mut self) {
        self.aggregator.set_timeout();
    }

    /// Whether the dealer's deal is certified from this verifier's view.
    pub fn deal_certified(&self) -> bool {
        self.aggregator.deal_certified()
    }

    /// The deal this verifier accepted, if any.
    pub fn deal(&self) -> Option<&Deal<C>> {
        self.aggregator.deal.as_ref()
    }

    /// This verifier's index in the participant list.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The session identifier, empty until the first deal is processed.
    pub fn session_id(&self) -> &[u8] {
        &self.aggregator.session_id
    }

    /// The verifier's long-term verifying key.
    pub fn public_key(&self) -> VerifyingKey<C> {
        self.public_key
    }

    /// The dealer's long-term verifying key.
    pub fn dealer_key(&self) -> VerifyingKey<C> {
        self.dealer_key
    }
}

impl<C> core::fmt::Debug for Verifier<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Verifier")
            .field("index", &self.index)
            .field("public_key", &self.public_key)
            .field("dealer_key", &self.dealer_key)
            .field("session_id", &hex::encode(&self.aggregator.session_id))
            .finish_non_exhaustive()
    }
}

//! Ciphersuite-generic tests for the Pedersen VSS layer.

use rand_core::{CryptoRng, RngCore};

use crate::{
    ecies,
    poly::{recover_secret, PriShare},
    serialization::{encode, Header, SerializableElement},
    tests::helpers::participants,
    vss::{Dealer, EncryptedDeal, Status, Verifier},
    Ciphersuite, Error, Field, Group, SigningKey, VerifyingKey,
};

struct Session<C: Ciphersuite> {
    secret: crate::Scalar<C>,
    dealer_key: SigningKey<C>,
    dealer: Dealer<C>,
    verifiers: Vec<Verifier<C>>,
}

fn setup<C: Ciphersuite, R: RngCore + CryptoRng>(n: u32, threshold: u32, rng: &mut R) -> Session<C> {
    let (signing_keys, verifying_keys) = participants::<C, R>(n, rng);
    let dealer_key = SigningKey::new(rng);
    let secret = <<C::Group as Group>::Field>::random(rng);

    let dealer = Dealer::new(
        dealer_key,
        secret,
        verifying_keys.clone(),
        threshold,
        rng,
    )
    .unwrap();

    let verifiers = signing_keys
        .iter()
        .map(|sk| Verifier::new(*sk, dealer.public_key(), verifying_keys.clone()).unwrap())
        .collect();

    Session {
        secret,
        dealer_key,
        dealer,
        verifiers,
    }
}

/// Seal an arbitrary deal to a recipient, exactly as a dealer would. Lets the
/// tests put inconsistent payloads on the wire.
fn seal_deal<C: Ciphersuite, R: RngCore + CryptoRng>(
    dealer_key: &SigningKey<C>,
    recipient: &VerifyingKey<C>,
    deal: &crate::vss::Deal<C>,
    rng: &mut R,
) -> EncryptedDeal<C> {
    let plaintext = encode(deal).unwrap();
    let (dh_key, nonce, cipher) =
        ecies::seal::<C, R>(rng, &recipient.to_element(), &plaintext).unwrap();

    let mut msg = Vec::from(crate::vss::DEAL_DOMAIN);
    msg.extend_from_slice(<C::Group>::serialize(&dh_key).as_ref());
    let signature = dealer_key.sign(rng, &msg);

    EncryptedDeal {
        header: Header::new(),
        dh_key: SerializableElement(dh_key),
        signature,
        nonce,
        cipher,
    }
}

/// Fault-free run: every deal approves, everything certifies, and the dealt
/// shares recover the dealer's secret.
pub fn check_vss_happy<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let (n, t) = (5, 3);
    let mut session = setup::<C, R>(n, t, &mut rng);

    let encrypted = session.dealer.encrypted_deals(&mut rng).unwrap();
    let mut responses = Vec::new();
    for (verifier, deal) in session.verifiers.iter_mut().zip(&encrypted) {
        let response = verifier.process_encrypted_deal(deal, &mut rng).unwrap();
        assert_eq!(*response.status(), Status::Approval);
        responses.push(response);
    }

    for response in &responses {
        assert!(session
            .dealer
            .process_response(response, &mut rng)
            .unwrap()
            .is_none());
        for verifier in session.verifiers.iter_mut() {
            if verifier.index() == *response.index() {
                continue;
            }
            verifier.process_response(response).unwrap();
        }
    }

    assert!(session.dealer.deal_certified());
    for verifier in &session.verifiers {
        assert!(verifier.deal_certified());
    }

    let shares: Vec<_> = session
        .verifiers
        .iter()
        .map(|v| Some(*v.deal().unwrap().sec_share()))
        .collect();
    let recovered = recover_secret(&shares, t).unwrap();
    assert!(recovered == session.secret);
    assert!(session.dealer.secret_commit() == <C::Group>::generator() * session.secret);
}

/// A corrupted delivery draws a complaint; the honest dealer's justification
/// reinstates the deal and certification still succeeds.
pub fn check_vss_complaint_justified<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let (n, t) = (5, 3);
    let mut session = setup::<C, R>(n, t, &mut rng);

    let encrypted = session.dealer.encrypted_deals(&mut rng).unwrap();

    // Verifier 0 receives a payload whose share does not open the
    // commitments, as if the delivery had been corrupted.
    let mut bad_deal = session.dealer.deals[0].clone();
    bad_deal.sec_share = PriShare::new(
        0,
        bad_deal.sec_share.value() + <<C::Group as Group>::Field>::one(),
    );
    let tampered = seal_deal(
        &session.dealer_key,
        &session.verifiers[0].public_key(),
        &bad_deal,
        &mut rng,
    );

    let complaint = session.verifiers[0]
        .process_encrypted_deal(&tampered, &mut rng)
        .unwrap();
    assert_eq!(*complaint.status(), Status::Complaint);

    let mut responses = vec![complaint];
    for (verifier, deal) in session.verifiers.iter_mut().zip(&encrypted).skip(1) {
        let response = verifier.process_encrypted_deal(deal, &mut rng).unwrap();
        assert_eq!(*response.status(), Status::Approval);
        responses.push(response);
    }

    let mut justification = None;
    for response in &responses {
        let answer = session.dealer.process_response(response, &mut rng).unwrap();
        if *response.status() == Status::Complaint {
            justification = Some(answer.unwrap());
        } else {
            assert!(answer.is_none());
        }
        for verifier in session.verifiers.iter_mut() {
            if verifier.index() == *response.index() {
                continue;
            }
            verifier.process_response(response).unwrap();
        }
    }

    let justification = justification.unwrap();

    // Justifications travel the broadcast channel; round-trip the encoding.
    let decoded =
        crate::vss::Justification::deserialize(&justification.serialize().unwrap()).unwrap();
    assert_eq!(decoded, justification);

    for verifier in session.verifiers.iter_mut() {
        verifier.process_justification(&justification).unwrap();
    }

    assert!(session.dealer.deal_certified());
    for verifier in &session.verifiers {
        assert!(verifier.deal_certified());
    }

    // The complainer adopted the revealed share.
    assert!(
        session.verifiers[0].deal().unwrap().sec_share().value()
            == session.dealer.deals[0].sec_share.value()
    );
}

/// A dealer whose deal genuinely mismatches its commitments cannot justify
/// the complaint and is disqualified by every verifier.
pub fn check_vss_bad_dealer<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let (n, t) = (5, 3);
    let mut session = setup::<C, R>(n, t, &mut rng);

    // The dealer itself holds an inconsistent share for verifier 0, so both
    // the delivery and the later justification are bad.
    let wrong = session.dealer.deals[0].sec_share.value() + <<C::Group as Group>::Field>::one();
    session.dealer.deals[0].sec_share = PriShare::new(0, wrong);

    let encrypted = session.dealer.encrypted_deals(&mut rng).unwrap();
    let mut responses = Vec::new();
    for (verifier, deal) in session.verifiers.iter_mut().zip(&encrypted) {
        responses.push(verifier.process_encrypted_deal(deal, &mut rng).unwrap());
    }
    assert_eq!(*responses[0].status(), Status::Complaint);

    let mut justification = None;
    for response in &responses {
        let answer = session.dealer.process_response(response, &mut rng).unwrap();
        if *response.status() == Status::Complaint {
            justification = Some(answer.unwrap());
        }
        for verifier in session.verifiers.iter_mut() {
            if verifier.index() == *response.index() {
                continue;
            }
            verifier.process_response(response).unwrap();
        }
    }

    let justification = justification.unwrap();
    for verifier in session.verifiers.iter_mut() {
        let err = verifier.process_justification(&justification).unwrap_err();
        assert!(matches!(err, Error::InvalidJustification { .. }));
    }

    for verifier in &session.verifiers {
        assert!(!verifier.deal_certified());
    }
}

/// A silent verifier leaves certification undecided until the timeout, which
/// settles it as a rejection.
pub fn check_vss_timeout<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let (n, t) = (5, 3);
    let mut session = setup::<C, R>(n, t, &mut rng);

    let encrypted = session.dealer.encrypted_deals(&mut rng).unwrap();

    // Verifier 0 never shows up.
    let mut responses = Vec::new();
    for (verifier, deal) in session.verifiers.iter_mut().zip(&encrypted).skip(1) {
        let response = verifier.process_encrypted_deal(deal, &mut rng).unwrap();
        assert_eq!(*response.status(), Status::Approval);
        responses.push(response);
    }

    for response in &responses {
        assert!(session
            .dealer
            .process_response(response, &mut rng)
            .unwrap()
            .is_none());
        for verifier in session.verifiers.iter_mut().skip(1) {
            if verifier.index() == *response.index() {
                continue;
            }
            verifier.process_response(response).unwrap();
        }
    }

    // Undecided: enough approvals, but one verifier unaccounted for.
    assert!(!session.dealer.deal_certified());
    for verifier in session.verifiers.iter().skip(1) {
        assert!(!verifier.deal_certified());
    }

    session.dealer.set_timeout();
    for verifier in session.verifiers.iter_mut().skip(1) {
        verifier.set_timeout();
    }

    // Decided: the absentee counts as an implicit complaint.
    assert!(!session.dealer.deal_certified());
    for verifier in session.verifiers.iter().skip(1) {
        assert!(!verifier.deal_certified());
    }

    // The late response finds its slot already settled.
    let late = session.verifiers[0]
        .process_encrypted_deal(&encrypted[0], &mut rng)
        .unwrap();
    assert_eq!(
        session
            .dealer
            .process_response(&late, &mut rng)
            .unwrap_err(),
        Error::DuplicateResponse
    );
}

/// Replayed deals and responses are rejected, and deals sealed to somebody
/// else do not open.
pub fn check_vss_duplicates<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let (n, t) = (4, 3);
    let mut session = setup::<C, R>(n, t, &mut rng);

    let encrypted = session.dealer.encrypted_deals(&mut rng).unwrap();

    // Sealed to verifier 1, unreadable by verifier 0.
    assert_eq!(
        session.verifiers[0]
            .process_encrypted_deal(&encrypted[1], &mut rng)
            .unwrap_err(),
        Error::DecryptionFailure
    );

    let response = session.verifiers[0]
        .process_encrypted_deal(&encrypted[0], &mut rng)
        .unwrap();
    assert_eq!(
        session.verifiers[0]
            .process_encrypted_deal(&encrypted[0], &mut rng)
            .unwrap_err(),
        Error::DuplicateDeal
    );

    assert!(session
        .dealer
        .process_response(&response, &mut rng)
        .unwrap()
        .is_none());
    assert_eq!(
        session
            .dealer
            .process_response(&response, &mut rng)
            .unwrap_err(),
        Error::DuplicateResponse
    );

    session.verifiers[1]
        .process_encrypted_deal(&encrypted[1], &mut rng)
        .unwrap();
    session.verifiers[1].process_response(&response).unwrap();
    assert_eq!(
        session.verifiers[1]
            .process_response(&response)
            .unwrap_err(),
        Error::DuplicateResponse
    );
}

/// ECIES round-trips and rejects tampered ciphertexts.
pub fn check_ecies<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let secret_key = SigningKey::<C>::new(&mut rng);
    let recipient = VerifyingKey::from(&secret_key).to_element();

    let plaintext = b"the quick brown fox";
    let (dh_key, nonce, mut cipher) =
        ecies::seal::<C, R>(&mut rng, &recipient, plaintext).unwrap();

    let opened =
        ecies::open::<C>(&secret_key.to_scalar(), &dh_key, &nonce, &cipher).unwrap();
    assert_eq!(opened, plaintext);

    cipher[0] ^= 1;
    assert_eq!(
        ecies::open::<C>(&secret_key.to_scalar(), &dh_key, &nonce, &cipher).unwrap_err(),
        Error::DecryptionFailure
    );

    // Sealed to somebody else.
    let other = SigningKey::<C>::new(&mut rng);
    cipher[0] ^= 1;
    assert_eq!(
        ecies::open::<C>(&other.to_scalar(), &dh_key, &nonce, &cipher).unwrap_err(),
        Error::DecryptionFailure
    );
}

/// Schnorr signatures verify under the right key and message only.
pub fn check_signature<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let signing_key = SigningKey::<C>::new(&mut rng);
    let verifying_key = VerifyingKey::from(&signing_key);

    let signature = signing_key.sign(&mut rng, b"message");
    verifying_key.verify(b"message", &signature).unwrap();

    assert_eq!(
        verifying_key.verify(b"other message", &signature).unwrap_err(),
        Error::InvalidSignature
    );

    let other = VerifyingKey::from(&SigningKey::<C>::new(&mut rng));
    assert_eq!(
        other.verify(b"message", &signature).unwrap_err(),
        Error::InvalidSignature
    );

    let roundtrip = crate::Signature::<C>::deserialize(&signature.serialize()).unwrap();
    verifying_key.verify(b"message", &roundtrip).unwrap();
}

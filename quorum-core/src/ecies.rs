//! Authenticated public-key encryption for deals.
//!
//! ECIES construction: an ephemeral Diffie-Hellman exchange with the
//! recipient's long-term key, an HKDF-SHA-256 key derivation bound to the
//! ciphersuite ID, and XChaCha20-Poly1305 for the authenticated symmetric
//! layer.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    Key, XChaCha20Poly1305, XNonce,
};
use hkdf::Hkdf;
use rand_core::{CryptoRng, RngCore};
use sha2::Sha256;

use crate::{random_nonzero, Ciphersuite, Element, Error, Group, Scalar};

/// Byte length of the XChaCha20-Poly1305 nonce.
pub(crate) const NONCE_SIZE: usize = 24;

const KEY_SIZE: usize = 32;

/// Derive the symmetric key from the Diffie-Hellman shared point, with the
/// ciphersuite ID as the HKDF info string so keys never cross suites.
fn symmetric_key<C: Ciphersuite>(shared: &Element<C>) -> Result<[u8; KEY_SIZE], Error> {
    let ikm = <C::Group>::serialize(shared);
    let hkdf = Hkdf::<Sha256>::new(None, ikm.as_ref());

    let mut info = Vec::from(C::ID.as_bytes());
    info.extend_from_slice(b"-deal-encryption");

    let mut key = [0u8; KEY_SIZE];
    hkdf.expand(&info, &mut key)
        .map_err(|_| Error::EncryptionFailure)?;
    Ok(key)
}

/// Seal `plaintext` to the holder of the secret key matching `recipient`.
///
/// Returns the ephemeral public key the recipient needs for the exchange, the
/// nonce and the ciphertext.
pub(crate) fn seal<C: Ciphersuite, R: RngCore + CryptoRng>(
    rng: &mut R,
    recipient: &Element<C>,
    plaintext: &[u8],
) -> Result<(Element<C>, [u8; NONCE_SIZE], Vec<u8>), Error> {
    let ephemeral = random_nonzero::<C, R>(rng);
    let dh_key = <C::Group>::generator() * ephemeral;
    let shared = *recipient * ephemeral;

    let key = symmetric_key::<C>(&shared)?;
    let mut nonce = [0u8; NONCE_SIZE];
    rng.fill_bytes(&mut nonce);

    let cipher = XChaCha20Poly1305::new(Key::from_slice(&key));
    let ciphertext = cipher
        .encrypt(XNonce::from_slice(&nonce), plaintext)
        .map_err(|_| Error::EncryptionFailure)?;

    Ok((dh_key, nonce, ciphertext))
}

/// Open a ciphertext sealed to the holder of `secret`.
///
/// Fails with [`Error::DecryptionFailure`] if the ciphertext or nonce were
/// tampered with, or if the message was sealed to a different key.
pub(crate) fn open<C: Ciphersuite>(
    secret: &Scalar<C>,
    dh_key: &Element<C>,
    nonce: &[u8; NONCE_SIZE],
    ciphertext: &[u8],
) -> Result<Vec<u8>, Error> {
    let shared = *dh_key * *secret;
    let key = symmetric_key::<C>(&shared)?;

    let cipher = XChaCha20Poly1305::new(Key::from_slice(&key));
    cipher
        .decrypt(XNonce::from_slice(nonce), ciphertext)
        .map_err(|_| Error::DecryptionFailure)
}

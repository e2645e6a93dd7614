//! Sealed-box encryption of secret values.
//!
//! GitHub requires secrets to be encrypted with the repository's public key
//! using libsodium sealed boxes (X25519 + XSalsa20-Poly1305). The sender is
//! anonymous: an ephemeral keypair is generated per call, so sealing the
//! same plaintext twice yields different ciphertexts.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use crypto_box::PublicKey;

use crate::error::CryptoError;

/// Seal a plaintext against a base64-encoded Curve25519 public key.
///
/// Returns the base64-encoded ciphertext expected by the
/// `PUT /repos/{repo}/actions/secrets/{name}` endpoint.
pub fn seal(plaintext: &[u8], public_key_b64: &str) -> Result<String, CryptoError> {
    let key_bytes = BASE64
        .decode(public_key_b64)
        .map_err(|_| CryptoError::InvalidBase64)?;

    let key_array: [u8; 32] = key_bytes
        .try_into()
        .map_err(|bytes: Vec<u8>| CryptoError::InvalidKeyLength(bytes.len()))?;

    let public_key = PublicKey::from(key_array);

    let mut rng = crypto_box::aead::OsRng;
    let ciphertext = public_key
        .seal(&mut rng, plaintext)
        .map_err(|_| CryptoError::SealFailed)?;

    Ok(BASE64.encode(&ciphertext))
}

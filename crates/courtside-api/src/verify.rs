//! Ed25519 verification of inbound interaction requests.
//!
//! The gateway signs the concatenation of the timestamp header and the raw
//! request body. Key and signature arrive hex-encoded; decoding is strict,
//! so odd-length or non-hex input is an error rather than a silent pass.
//! Every failure mode collapses to a rejected request, never a panic.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use thiserror::Error;

/// Errors produced while parsing keys or verifying signatures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// Input was not valid hex (odd length or non-hex characters).
    #[error("not valid hex: {0}")]
    MalformedHex(String),

    /// Decoded bytes have the wrong length for a key or signature.
    #[error("decoded value has the wrong length")]
    InvalidLength,

    /// Key bytes decode but do not form a usable public key.
    #[error("public key bytes are not a valid key")]
    InvalidKey,

    /// The signature does not match the signed message.
    #[error("signature verification failed")]
    VerificationFailed,
}

/// Parses a hex-encoded Ed25519 public key.
///
/// Done once at startup; handlers hold the parsed key.
///
/// # Errors
///
/// Returns `MalformedHex`, `InvalidLength`, or `InvalidKey` depending on
/// which stage of decoding fails.
pub fn parse_public_key(hex_key: &str) -> Result<VerifyingKey, VerifyError> {
    let bytes =
        hex::decode(hex_key.trim()).map_err(|e| VerifyError::MalformedHex(e.to_string()))?;
    let bytes: [u8; 32] = bytes.try_into().map_err(|_| VerifyError::InvalidLength)?;
    VerifyingKey::from_bytes(&bytes).map_err(|_| VerifyError::InvalidKey)
}

/// Verifies a request signature over `timestamp ‖ body`.
///
/// # Errors
///
/// Returns an error for malformed hex, a wrong-length signature, or a
/// signature that does not verify. Callers map every variant to a 401.
pub fn verify_signature(
    key: &VerifyingKey,
    signature_hex: &str,
    timestamp: &str,
    body: &[u8],
) -> Result<(), VerifyError> {
    let signature_bytes =
        hex::decode(signature_hex).map_err(|e| VerifyError::MalformedHex(e.to_string()))?;
    let signature =
        Signature::from_slice(&signature_bytes).map_err(|_| VerifyError::InvalidLength)?;

    let mut message = Vec::with_capacity(timestamp.len() + body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(body);

    key.verify(&message, &signature).map_err(|_| VerifyError::VerificationFailed)
}

#[cfg(test)]
mod tests {
    use ed25519_dalek::{Signer, SigningKey};
    use rand::rngs::OsRng;

    use super::*;

    fn keypair() -> (SigningKey, VerifyingKey) {
        let signing_key = SigningKey::generate(&mut OsRng);
        let verifying_key = signing_key.verifying_key();
        (signing_key, verifying_key)
    }

    fn sign(signing_key: &SigningKey, timestamp: &str, body: &[u8]) -> String {
        let mut message = timestamp.as_bytes().to_vec();
        message.extend_from_slice(body);
        hex::encode(signing_key.sign(&message).to_bytes())
    }

    #[test]
    fn valid_signature_verifies() {
        let (signing_key, verifying_key) = keypair();
        let body = br#"{"type":1}"#;
        let timestamp = "1722700000";

        let signature = sign(&signing_key, timestamp, body);

        assert!(verify_signature(&verifying_key, &signature, timestamp, body).is_ok());
    }

    #[test]
    fn tampered_body_rejected() {
        let (signing_key, verifying_key) = keypair();
        let timestamp = "1722700000";
        let signature = sign(&signing_key, timestamp, br#"{"type":1}"#);

        let result = verify_signature(&verifying_key, &signature, timestamp, br#"{"type":2}"#);
        assert_eq!(result, Err(VerifyError::VerificationFailed));
    }

    #[test]
    fn tampered_timestamp_rejected() {
        let (signing_key, verifying_key) = keypair();
        let body = br#"{"type":1}"#;
        let signature = sign(&signing_key, "1722700000", body);

        let result = verify_signature(&verifying_key, &signature, "1722700001", body);
        assert_eq!(result, Err(VerifyError::VerificationFailed));
    }

    #[test]
    fn flipped_signature_bit_rejected() {
        let (signing_key, verifying_key) = keypair();
        let body = br#"{"type":1}"#;
        let timestamp = "1722700000";

        let signature = sign(&signing_key, timestamp, body);
        let mut bytes = hex::decode(&signature).unwrap();
        bytes[10] ^= 0x01;
        let tampered = hex::encode(bytes);

        let result = verify_signature(&verifying_key, &tampered, timestamp, body);
        assert_eq!(result, Err(VerifyError::VerificationFailed));
    }

    #[test]
    fn odd_length_hex_is_an_error_not_a_pass() {
        let (_, verifying_key) = keypair();

        let result = verify_signature(&verifying_key, "abc", "0", b"body");
        assert!(matches!(result, Err(VerifyError::MalformedHex(_))));
    }

    #[test]
    fn non_hex_signature_rejected() {
        let (_, verifying_key) = keypair();

        let result = verify_signature(&verifying_key, "zz".repeat(64).as_str(), "0", b"body");
        assert!(matches!(result, Err(VerifyError::MalformedHex(_))));
    }

    #[test]
    fn wrong_length_signature_rejected() {
        let (_, verifying_key) = keypair();

        let result = verify_signature(&verifying_key, "abcd", "0", b"body");
        assert_eq!(result, Err(VerifyError::InvalidLength));
    }

    #[test]
    fn public_key_roundtrip() {
        let (_, verifying_key) = keypair();
        let hex_key = hex::encode(verifying_key.to_bytes());

        let parsed = parse_public_key(&hex_key).unwrap();
        assert_eq!(parsed, verifying_key);
    }

    #[test]
    fn malformed_public_keys_rejected() {
        assert!(matches!(parse_public_key("xyz"), Err(VerifyError::MalformedHex(_))));
        assert!(matches!(parse_public_key("abcd"), Err(VerifyError::InvalidLength)));
    }
}

//! # Key Management
//!
//! Ed25519 keypairs for Stellar accounts.
//!
//! A keypair is the only thing in this crate that holds secret material. It
//! is never serialized implicitly and its `Debug` output shows the account
//! id only. Use [`KeyPair::secret_seed`] when exporting is really intended.

use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use std::fmt;
use thiserror::Error;

use super::strkey::{self, StrKeyError};
use crate::config::SIGNATURE_HINT_LENGTH;
use crate::transaction::types::PublicKey;

/// Ed25519 signature length.
pub const SIGNATURE_LENGTH: usize = 64;

/// Errors that can occur during key operations.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid secret seed: {0}")]
    InvalidSeed(#[from] StrKeyError),

    #[error("invalid public key bytes: not a valid Ed25519 point")]
    InvalidPublicKey,
}

/// An Ed25519 signing key together with its derived public key.
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generate a fresh keypair from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Constructs a keypair deterministically from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Parses an `S...` secret seed.
    pub fn from_secret(secret: &str) -> Result<Self, KeyError> {
        let seed = strkey::decode_seed(secret)?;
        Ok(Self::from_seed(&seed))
    }

    /// Exports the `S...` secret seed. Handle with care.
    pub fn secret_seed(&self) -> String {
        strkey::encode_seed(&self.signing_key.to_bytes())
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// The public key as it appears in XDR.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::Ed25519(self.public_key_bytes())
    }

    /// The `G...` account id.
    pub fn account_id(&self) -> String {
        strkey::encode_account_id(&self.public_key_bytes())
    }

    /// Last four bytes of the public key.
    pub fn signature_hint(&self) -> [u8; SIGNATURE_HINT_LENGTH] {
        signature_hint(&self.public_key_bytes())
    }

    /// Sign `message`. Ed25519 is deterministic: same key and message, same
    /// signature.
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_LENGTH] {
        self.signing_key.sign(message).to_bytes()
    }

    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        verify(&self.public_key_bytes(), message, signature)
    }
}

impl Clone for KeyPair {
    fn clone(&self) -> Self {
        Self::from_seed(&self.signing_key.to_bytes())
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair({})", self.account_id())
    }
}

impl PartialEq for KeyPair {
    /// Keypairs compare by public key; secret bytes are never compared.
    fn eq(&self, other: &Self) -> bool {
        self.public_key_bytes() == other.public_key_bytes()
    }
}

impl Eq for KeyPair {}

/// The signature hint for a raw public key: its last four bytes.
pub fn signature_hint(public_key: &[u8; 32]) -> [u8; SIGNATURE_HINT_LENGTH] {
    let mut hint = [0u8; SIGNATURE_HINT_LENGTH];
    hint.copy_from_slice(&public_key[32 - SIGNATURE_HINT_LENGTH..]);
    hint
}

/// Verify an Ed25519 signature. Any malformed input is just `false`.
pub fn verify(public_key: &[u8; 32], message: &[u8], signature: &[u8]) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(public_key) else {
        return false;
    };
    let Ok(sig_bytes) = <[u8; SIGNATURE_LENGTH]>::try_from(signature) else {
        return false;
    };
    verifying_key
        .verify(message, &DalekSignature::from_bytes(&sig_bytes))
        .is_ok()
}

/// Checks that 32 bytes are a usable Ed25519 point.
pub fn validate_public_key(public_key: &[u8; 32]) -> Result<(), KeyError> {
    VerifyingKey::from_bytes(public_key)
        .map(|_| ())
        .map_err(|_| KeyError::InvalidPublicKey)
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 8032, section 7.1, TEST 1.
    const RFC_SEED: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";
    const RFC_PUBLIC: &str = "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a";
    const RFC_EMPTY_SIG: &str = "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b";

    fn rfc_keypair() -> KeyPair {
        let seed: [u8; 32] = hex::decode(RFC_SEED).unwrap().try_into().unwrap();
        KeyPair::from_seed(&seed)
    }

    #[test]
    fn rfc8032_public_key_and_signature() {
        let kp = rfc_keypair();
        assert_eq!(hex::encode(kp.public_key_bytes()), RFC_PUBLIC);
        assert_eq!(hex::encode(kp.sign(b"")), RFC_EMPTY_SIG);
    }

    #[test]
    fn strkey_round_trip() {
        let kp = rfc_keypair();
        assert_eq!(
            kp.account_id(),
            "GDLVVGABQKYQVN6VJP7NHSLEA45A5YLS6PNKMIZFV4BBU2HXA5IRVHUR"
        );
        assert_eq!(
            kp.secret_seed(),
            "SCOWDMM5576VUYF2QRFPJEXMFTCEISOFNF5TE2IZOA52YAY4VZ7WBQNO"
        );
        let restored = KeyPair::from_secret(&kp.secret_seed()).unwrap();
        assert_eq!(restored, kp);
    }

    #[test]
    fn account_id_is_not_a_secret() {
        assert!(matches!(
            KeyPair::from_secret("GDLVVGABQKYQVN6VJP7NHSLEA45A5YLS6PNKMIZFV4BBU2HXA5IRVHUR"),
            Err(KeyError::InvalidSeed(StrKeyError::InvalidVersion { .. }))
        ));
    }

    #[test]
    fn hint_is_last_four_public_key_bytes() {
        let kp = rfc_keypair();
        assert_eq!(hex::encode(kp.signature_hint()), "f707511a");
        for _ in 0..8 {
            let kp = KeyPair::generate();
            assert_eq!(kp.signature_hint(), kp.public_key_bytes()[28..]);
        }
    }

    #[test]
    fn sign_and_verify() {
        let kp = KeyPair::generate();
        let sig = kp.sign(b"payload");
        assert!(kp.verify(b"payload", &sig));
        assert!(!kp.verify(b"tampered", &sig));
        assert!(!kp.verify(b"payload", &sig[..63]));
    }

    #[test]
    fn debug_hides_secret() {
        let kp = rfc_keypair();
        let printed = format!("{kp:?}");
        assert!(printed.contains(&kp.account_id()));
        assert!(!printed.contains(&kp.secret_seed()));
        assert!(!printed.contains(RFC_SEED));
    }

    #[test]
    fn validate_rejects_non_point() {
        assert!(validate_public_key(&rfc_keypair().public_key_bytes()).is_ok());
        // y = 2 has no matching x on the curve.
        let mut bad = [0u8; 32];
        bad[0] = 2;
        assert!(validate_public_key(&bad).is_err());
    }
}

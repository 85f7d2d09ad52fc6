//! The signing capability supplied by callers, one per account.
//!
//! An [`Account`] exposes its public key (if it has one) and signs message
//! digests, optionally unlocking its key with a passphrase first. Hardware
//! wallets, remote signers and test doubles implement the same trait;
//! [`KeyPair`] is the in-process implementation.

use thiserror::Error;

use crate::crypto::keys::KeyPair;

/// Why a signing capability refused to sign.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SigningError {
    /// The passphrase did not unlock the key.
    #[error("wrong passphrase")]
    WrongPassphrase,

    /// The key holder declined or failed for another reason.
    #[error("signer rejected the request: {0}")]
    Rejected(String),
}

/// A private key holder that can sign 32-byte digests.
pub trait Account: Send + Sync {
    /// The account's `G...` strkey, or `None` when the key is not known
    /// to this process.
    fn public_key(&self) -> Option<String>;

    /// Signs `digest`. `passphrase` unlocks the key for implementations
    /// that keep it encrypted.
    fn sign(&self, digest: &[u8; 32], passphrase: &str) -> Result<Vec<u8>, SigningError>;
}

impl Account for KeyPair {
    fn public_key(&self) -> Option<String> {
        Some(self.account_id())
    }

    fn sign(&self, digest: &[u8; 32], _passphrase: &str) -> Result<Vec<u8>, SigningError> {
        Ok(KeyPair::sign(self, digest).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keypair_exposes_its_account_id() {
        let kp = KeyPair::from_seed(&[7u8; 32]);
        assert_eq!(
            Account::public_key(&kp).as_deref(),
            Some("GDVEU3DD4KOFECV66VIHWEZOYX4ZKR3WV27L464SIIPOU2IUI3JCZA57")
        );
    }

    #[test]
    fn keypair_signature_ignores_passphrase() {
        let kp = KeyPair::from_seed(&[7u8; 32]);
        let digest = [0xabu8; 32];
        let a = Account::sign(&kp, &digest, "").unwrap();
        let b = Account::sign(&kp, &digest, "anything").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(kp.verify(&digest, &a));
    }

    #[test]
    fn signing_errors_display() {
        assert_eq!(SigningError::WrongPassphrase.to_string(), "wrong passphrase");
        assert!(SigningError::Rejected("locked".into())
            .to_string()
            .contains("locked"));
    }
}

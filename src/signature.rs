//! Provider signature recovery.
//!
//! A provider authorizes a subscription by personal-signing the 32-byte hash
//! of the off-chain terms document. Recovery rebuilds the EIP-191 digest and
//! runs secp256k1 public key recovery over it.

use alloy_primitives::{eip191_hash_message, uint, Address, PrimitiveSignature, B256, U256};

/// Length of an `r ‖ s ‖ v` signature.
pub const SIGNATURE_LENGTH: usize = 65;

/// Upper bound for `s` (secp256k1 order / 2). Larger values are the malleable
/// twin of a valid signature.
const MAX_S: U256 =
    uint!(0x7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF5D576E7357A4501DDFE92F46681B20A0_U256);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignatureError {
    InvalidLength(usize),
    InvalidRecoveryId(u8),
    MalleableS,
    Unrecoverable,
}

/// `keccak256("\x19Ethereum Signed Message:\n32" ‖ message_hash)`
pub fn personal_message_digest(message_hash: B256) -> B256 {
    eip191_hash_message(message_hash)
}

/// Recover the address that personal-signed `message_hash`.
///
/// `v` must already use the 27/28 convention.
pub fn recover_signer(message_hash: B256, signature: &[u8]) -> Result<Address, SignatureError> {
    if signature.len() != SIGNATURE_LENGTH {
        return Err(SignatureError::InvalidLength(signature.len()));
    }

    let r = U256::from_be_slice(&signature[..32]);
    let s = U256::from_be_slice(&signature[32..64]);
    let y_parity = match signature[64] {
        27 => false,
        28 => true,
        v => return Err(SignatureError::InvalidRecoveryId(v)),
    };

    if s > MAX_S {
        return Err(SignatureError::MalleableS);
    }

    let digest = personal_message_digest(message_hash);
    PrimitiveSignature::new(r, s, y_parity)
        .recover_address_from_prehash(&digest)
        .map_err(|_| SignatureError::Unrecoverable)
}

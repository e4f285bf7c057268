//! # EIP-191 Personal Message Recovery (secp256k1)
//!
//! Pure domain logic for recovering the address behind a wallet
//! `personal_sign` signature.
//!
//! The signed digest is
//! `keccak256("\x19Ethereum Signed Message:\n" || len(message) || message)`
//! where `len` is the decimal byte length of the message.
//!
//! ## Security Notes
//!
//! - **Malleability Prevention (EIP-2)**: S must not exceed SECP256K1_HALF_ORDER (floor(n/2))
//! - **Scalar Range Validation**: R and S must be in [1, n-1]
//! - **R Point Validation**: R must be a valid x-coordinate on the secp256k1 curve
//! - **Constant-Time Operations**: Uses `subtle` for the scalar comparisons

use super::entities::VerificationResult;
use super::errors::SignatureError;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use k256::elliptic_curve::sec1::FromEncodedPoint;
use k256::{AffinePoint, EncodedPoint};
use sha3::{Digest, Keccak256};
use shared_types::{Address, Hash, PersonalSignature};
use subtle::{Choice, ConstantTimeEq};
use tracing::trace;

/// Prefix wallets prepend before hashing a personal message.
pub const PERSONAL_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// Half of the secp256k1 curve order (for malleability check).
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

// =============================================================================
// MESSAGE HASHING
// =============================================================================

/// Hash a message the way `personal_sign` does before signing.
pub fn hash_personal_message(message: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(PERSONAL_MESSAGE_PREFIX.as_bytes());
    hasher.update(message.len().to_string().as_bytes());
    hasher.update(message);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&hasher.finalize());
    hash
}

// =============================================================================
// RECOVERY
// =============================================================================

/// Recover the address that produced `signature` over `message`.
///
/// Validations performed, in order:
/// 1. R is in range [1, n-1] and is an x-coordinate on the curve
/// 2. S is in range [1, n-1]
/// 3. S is in the lower half of the order (EIP-2)
/// 4. Recovery ID (v) is 0, 1, 27 or 28
/// 5. Public key recovery succeeds
pub fn recover_address(
    message: &[u8],
    signature: &PersonalSignature,
) -> Result<Address, SignatureError> {
    let digest = hash_personal_message(message);
    recover_prehash(&digest, signature)
}

/// Recover the signer from an already-prefixed digest.
pub fn recover_prehash(
    digest: &Hash,
    signature: &PersonalSignature,
) -> Result<Address, SignatureError> {
    use zeroize::Zeroize;

    if !is_valid_scalar(&signature.r) || !is_valid_r_coordinate(&signature.r) {
        return Err(SignatureError::InvalidFormat);
    }

    if !is_valid_scalar(&signature.s) {
        return Err(SignatureError::InvalidFormat);
    }

    if !is_low_s(&signature.s) {
        return Err(SignatureError::MalleableSignature);
    }

    let recovery_id = parse_recovery_id(signature.v)?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&signature.s);

    let parsed = Signature::from_slice(&sig_bytes);
    sig_bytes.zeroize();
    let sig = parsed.map_err(|_| SignatureError::InvalidFormat)?;

    let recovered_key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;

    let address = address_from_pubkey(&recovered_key);
    trace!(signer = %address, "Recovered personal_sign signer");
    Ok(address)
}

/// Recover the signer and compare it with `expected`.
///
/// Equality is byte equality on the decoded address, so the comparison is
/// case-insensitive with respect to any hex rendering.
pub fn verify_signer(
    message: &[u8],
    signature: &PersonalSignature,
    expected: Address,
) -> VerificationResult {
    match recover_address(message, signature) {
        Ok(recovered) if recovered == expected => VerificationResult::valid(recovered),
        Ok(recovered) => VerificationResult::invalid(SignatureError::SignerMismatch {
            expected,
            actual: recovered,
        }),
        Err(e) => VerificationResult::invalid(e),
    }
}

// =============================================================================
// ENCODING HELPERS
// =============================================================================

/// Build a wire signature from `r || s` and a raw recovery id (0 or 1).
///
/// High-S values are flipped into the lower half with the recovery id
/// adjusted, so the result always passes the EIP-2 check.
pub fn signature_from_parts(rs: &[u8; 64], recovery_id: u8) -> PersonalSignature {
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&rs[..32]);
    s.copy_from_slice(&rs[32..]);

    let mut recid = recovery_id & 1;
    if !is_low_s(&s) {
        s = invert_s(&s);
        recid ^= 1;
    }

    PersonalSignature { r, s, v: recid + 27 }
}

/// Keccak256 hash function.
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

/// Derive the account address from a public key.
pub fn address_from_pubkey(public_key: &VerifyingKey) -> Address {
    let pubkey_bytes = public_key.to_encoded_point(false);
    let pubkey_slice = pubkey_bytes.as_bytes();

    // Skip the 0x04 uncompressed-point tag
    let hash = keccak256(&pubkey_slice[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    Address(address)
}

/// Constant-time `a < b` over big-endian 32-byte values.
fn ct_less_than(a: &[u8; 32], b: &[u8; 32]) -> Choice {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let not_decided = !(less | greater);
        let byte_less = Choice::from((a[i] < b[i]) as u8);
        let byte_greater = Choice::from((a[i] > b[i]) as u8);

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    less
}

/// Check if S value is in lower half of curve order (EIP-2).
///
/// `s <= floor(n/2)`, the same half `k256` normalizes into.
fn is_low_s(s: &[u8; 32]) -> bool {
    (!ct_less_than(&SECP256K1_HALF_ORDER, s)).into()
}

/// Check if a scalar value is in valid range [1, n-1].
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for &byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }

    let valid = !is_zero & ct_less_than(scalar, &SECP256K1_ORDER);
    valid.into()
}

/// Validate that R is a valid x-coordinate on the secp256k1 curve.
///
/// Only about half of all field elements have a matching y on the curve.
fn is_valid_r_coordinate(r: &[u8; 32]) -> bool {
    let mut compressed = [0u8; 33];
    compressed[0] = 0x02;
    compressed[1..].copy_from_slice(r);

    let encoded = match EncodedPoint::from_bytes(compressed) {
        Ok(e) => e,
        Err(_) => return false,
    };

    AffinePoint::from_encoded_point(&encoded).is_some().into()
}

/// Parse recovery ID from v value.
fn parse_recovery_id(v: u8) -> Result<RecoveryId, SignatureError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(SignatureError::InvalidRecoveryId(v)),
    };

    RecoveryId::try_from(id).map_err(|_| SignatureError::InvalidRecoveryId(v))
}

/// Invert S value: s' = n - s
pub fn invert_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;

    for i in (0..32).rev() {
        let diff = (SECP256K1_ORDER[i] as i32) - (s[i] as i32) - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }

    result
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use k256::ecdsa::SigningKey;

    /// Generate a new keypair together with its address.
    pub fn generate_keypair() -> (SigningKey, Address) {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        let address = address_from_pubkey(signing_key.verifying_key());
        (signing_key, address)
    }

    /// Sign `message` the way a wallet's `personal_sign` does.
    pub fn personal_sign(message: &[u8], key: &SigningKey) -> PersonalSignature {
        let digest = hash_personal_message(message);
        let (sig, recid) = key
            .sign_prehash_recoverable(&digest)
            .expect("signing failed");
        let mut rs = [0u8; 64];
        rs.copy_from_slice(&sig.to_bytes());
        signature_from_parts(&rs, recid.to_byte())
    }
}

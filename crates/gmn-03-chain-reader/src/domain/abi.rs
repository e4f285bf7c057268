//! # Minimal ABI Encoding
//!
//! Only the static types the gating contract needs: `address` and
//! `uint256` arguments, and a single `uint256` return word.

use super::errors::ChainError;
use sha3::{Digest, Keccak256};
use shared_types::{Address, U256};

/// Width of one ABI word.
pub const WORD: usize = 32;

/// ERC-20 `balanceOf(address)`.
pub const BALANCE_OF: &str = "balanceOf(address)";

/// Gating contract mint price getter.
pub const COST: &str = "cost()";

/// Gating contract `mint(uint256)`, payable.
pub const MINT: &str = "mint(uint256)";

/// First four bytes of `keccak256(signature)`.
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = Keccak256::digest(signature.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[..4]);
    out
}

/// Left-pad an address into one word.
pub fn encode_address(address: &Address) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

/// Big-endian `uint256` word.
pub fn encode_uint(value: U256) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    value.to_big_endian(&mut word);
    word
}

/// Selector followed by the argument words.
pub fn encode_call(signature: &str, args: &[[u8; WORD]]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + args.len() * WORD);
    data.extend_from_slice(&selector(signature));
    for arg in args {
        data.extend_from_slice(arg);
    }
    data
}

/// Calldata for `balanceOf(owner)`.
pub fn balance_of_call(owner: &Address) -> Vec<u8> {
    encode_call(BALANCE_OF, &[encode_address(owner)])
}

/// Decode the first return word as `uint256`.
///
/// Empty return data is what a call to an account without code yields,
/// so it is an error rather than zero.
pub fn decode_uint(data: &[u8]) -> Result<U256, ChainError> {
    if data.len() < WORD {
        return Err(ChainError::MalformedReturn(format!(
            "expected at least {} bytes, got {}",
            WORD,
            data.len()
        )));
    }
    Ok(U256::from_big_endian(&data[..WORD]))
}

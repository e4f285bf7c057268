//! # Core Value Types
//!
//! ## Clusters
//!
//! - **Identity**: [`Address`], [`ChainId`]
//! - **Signatures**: [`PersonalSignature`], [`Hash`]
//! - **Amounts**: [`U256`] plus quantity/units helpers

use crate::errors::ParseError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

// Re-export U256 from primitive-types for use across all subsystems
pub use primitive_types::U256;

/// A 32-byte Keccak-256 digest.
pub type Hash = [u8; 32];

/// EIP-155 chain identifier.
pub type ChainId = u64;

// =============================================================================
// ADDRESS
// =============================================================================

/// A 20-byte account or contract address.
///
/// Parsing accepts any letter case, so equality between two parsed
/// addresses is the case-insensitive comparison wallets expect.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Wrap raw bytes.
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Lowercase hex with `0x` prefix.
    pub fn to_lower_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// EIP-55 mixed-case checksum encoding.
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let digest = Keccak256::digest(lower.as_bytes());

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = (digest[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0f;
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Shortened form used in listings (`0xAbCd…1234`).
    pub fn short(&self) -> String {
        let full = self.to_checksum();
        format!("{}…{}", &full[..6], &full[38..])
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_hex(s)?;
        let arr: [u8; 20] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| ParseError::InvalidLength {
                expected: 20,
                actual: bytes.len(),
            })?;
        Ok(Self(arr))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_checksum())
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_checksum())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// PERSONAL SIGNATURE
// =============================================================================

/// A 65-byte `personal_sign` signature: `r || s || v`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PersonalSignature {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery byte (0, 1, 27, or 28)
    pub v: u8,
}

impl PersonalSignature {
    /// Length of the wire encoding.
    pub const LEN: usize = 65;

    /// Build from the 65-byte wire encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        if bytes.len() != Self::LEN {
            return Err(ParseError::InvalidLength {
                expected: Self::LEN,
                actual: bytes.len(),
            });
        }
        let v = bytes[64];
        if !matches!(v, 0 | 1 | 27 | 28) {
            return Err(ParseError::InvalidRecoveryByte(v));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Self { r, s, v })
    }

    /// The 65-byte wire encoding with `v` normalized to 27/28.
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = if self.v < 27 { self.v + 27 } else { self.v };
        out
    }

    /// `0x`-prefixed hex of [`Self::to_bytes`].
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }
}

impl FromStr for PersonalSignature {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(&decode_hex(s)?)
    }
}

impl fmt::Debug for PersonalSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PersonalSignature({})", self.to_hex())
    }
}

impl fmt::Display for PersonalSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for PersonalSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PersonalSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Decode hex with or without a `0x` prefix.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, ParseError> {
    let trimmed = s.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(body).map_err(|e| ParseError::InvalidHex(e.to_string()))
}

/// Parse a JSON-RPC quantity (`"0x1a"`) into a [`U256`].
pub fn parse_quantity(s: &str) -> Result<U256, ParseError> {
    let body = s
        .strip_prefix("0x")
        .ok_or_else(|| ParseError::InvalidQuantity(s.to_string()))?;
    if body.is_empty() {
        return Ok(U256::zero());
    }
    U256::from_str_radix(body, 16).map_err(|_| ParseError::InvalidQuantity(s.to_string()))
}

/// Encode a [`U256`] as a JSON-RPC quantity.
pub fn to_quantity(value: U256) -> String {
    format!("0x{:x}", value)
}

/// Render a base-unit amount with `decimals` places, trimming trailing zeros.
///
/// `format_units(1_500_000_000_000_000_000, 18) == "1.5"`
///
/// Works on the decimal digits, so scales past `10^77` (which `U256` cannot
/// hold) render as pure fractions.
pub fn format_units(value: U256, decimals: u8) -> String {
    let digits = value.to_string();
    let scale = decimals as usize;
    let (whole, frac) = if digits.len() > scale {
        let (w, f) = digits.split_at(digits.len() - scale);
        (w.to_string(), f.to_string())
    } else {
        ("0".to_string(), format!("{:0>width$}", digits, width = scale))
    };
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        whole
    } else {
        format!("{}.{}", whole, frac)
    }
}

use crate::{
    FormatError, Result,
    encode::{crockford, hex},
};
use core::{fmt, str::FromStr};

/// Length of the Crockford Base32 form: `ceil(64 / 5)` characters.
const BASE32_LEN: usize = 13;

/// A 64-bit time-ordered identifier.
///
/// Produced by a [`SnowflakeGenerator`] and interpreted through the
/// [`SnowflakeLayout`] that packed it. Because the timestamp occupies the
/// most significant bits, the derived ordering ranks IDs by generation time
/// first; IDs from the same instance are strictly increasing.
///
/// Conversions to and from the raw integer are explicit (`to_u64` /
/// `from_u64`); the type deliberately does not implement arithmetic.
///
/// [`SnowflakeGenerator`]: crate::SnowflakeGenerator
/// [`SnowflakeLayout`]: crate::SnowflakeLayout
///
/// # Example
///
/// ```
/// use chronoid::{SnowflakeId, SnowflakeLayout};
///
/// let id = SnowflakeLayout::DEFAULT.pack(10, 5, 2).unwrap();
///
/// let text = id.encode_base32();
/// assert_eq!(text.len(), 13);
/// assert_eq!(SnowflakeId::decode_base32(&text).unwrap(), id);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct SnowflakeId(u64);

impl SnowflakeId {
    /// Wraps a raw packed value.
    ///
    /// The value is taken as-is; bit 63 is expected to be clear for IDs that
    /// came out of a [`SnowflakeLayout`](crate::SnowflakeLayout).
    pub const fn from_u64(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw packed value.
    pub const fn to_u64(self) -> u64 {
        self.0
    }

    /// Encodes as 13 Crockford Base32 characters, zero-padded.
    ///
    /// The fixed width makes the textual form sort exactly like the numeric
    /// value, so Base32-encoded IDs in a key-value store keep their
    /// time ordering.
    pub fn encode_base32(&self) -> String {
        let mut buf = [0u8; BASE32_LEN];
        crockford::encode_bits(u128::from(self.0), &mut buf);
        buf.iter().map(|&b| char::from(b)).collect()
    }

    /// Decodes a 13-character Crockford Base32 string.
    ///
    /// Accepts lowercase input and the Crockford aliases (`O` → 0,
    /// `I`/`L` → 1).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFormat`](crate::Error::InvalidFormat) on wrong
    /// length, foreign characters, or a value wider than 64 bits.
    pub fn decode_base32(s: &str) -> Result<Self> {
        Ok(Self(crockford::decode_u64(s, BASE32_LEN)?))
    }

    /// Encodes as 16 lowercase hex digits, zero-padded.
    pub fn to_hex(&self) -> String {
        format!("{:016x}", self.0)
    }

    /// Decodes a 16-digit hex string (either case).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFormat`](crate::Error::InvalidFormat) on wrong length
    /// or non-hex characters.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode_fixed::<8>(s)?;
        Ok(Self(u64::from_be_bytes(bytes)))
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses the decimal form produced by `Display`.
impl FromStr for SnowflakeId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(FormatError::Length {
                expected: 1,
                found: 0,
            }
            .into());
        }
        let mut acc: u64 = 0;
        for (index, byte) in s.bytes().enumerate() {
            if !byte.is_ascii_digit() {
                return Err(FormatError::Char { byte, index }.into());
            }
            acc = acc
                .checked_mul(10)
                .and_then(|acc| acc.checked_add(u64::from(byte - b'0')))
                .ok_or(FormatError::Overflow)?;
        }
        Ok(Self(acc))
    }
}

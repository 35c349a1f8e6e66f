use crate::{
    DbEngine, FormatError, Result,
    comb::engine::TIMESTAMP_BYTES,
    encode::{crockford, hex},
};
use core::{fmt, str::FromStr};

/// Length of the hyphenated textual form.
const HYPHENATED_LEN: usize = 36;
/// Length of the bare hex form.
const SIMPLE_LEN: usize = 32;
/// Length of the short Crockford form: 75 bits in 5-bit groups.
const SHORT_LEN: usize = 15;

/// A 128-bit sequential GUID (COMB) in RFC byte order.
///
/// Ten bytes of the value are random; six carry a 48-bit millisecond
/// timestamp spliced in at positions chosen per database engine, so the
/// stored value index-sorts in generation order. The value itself does not
/// record which [`DbEngine`] it was built for; callers that need the
/// embedded timestamp or the engine's comparison order pass the engine in
/// ([`Self::timestamp`], [`Self::sort_key`]).
///
/// The derived `Ord` compares raw bytes in RFC order, which matches MySQL's
/// storage order; use [`Self::sort_key`] to compare the way another engine
/// would.
///
/// # Example
///
/// ```
/// use chronoid::{CombGenerator, DbEngine, SystemClock, ThreadEntropy};
///
/// let generator = CombGenerator::new(DbEngine::SqlServer, SystemClock, ThreadEntropy);
/// let guid = generator.generate().unwrap();
///
/// let text = guid.to_string();
/// assert_eq!(text.len(), 36);
/// assert_eq!(text.parse::<chronoid::CombGuid>().unwrap(), guid);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CombGuid([u8; 16]);

impl CombGuid {
    /// Wraps raw bytes in RFC order.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// The bytes in RFC order.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Consumes the value, returning the bytes in RFC order.
    pub const fn into_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Extracts the embedded milliseconds-since-Unix-epoch timestamp,
    /// assuming this value was generated for `engine`.
    ///
    /// Passing a different engine than the one that generated the value
    /// reads random bytes as time and returns garbage; the layout is not
    /// self-describing.
    pub fn timestamp(&self, engine: DbEngine) -> u64 {
        let positions = engine.timestamp_positions();
        let mut millis = 0u64;
        for &pos in &positions {
            millis = (millis << 8) | u64::from(self.0[pos]);
        }
        millis
    }

    /// Permutes the bytes into `engine`'s comparison order.
    ///
    /// See [`DbEngine::sort_key`].
    pub fn sort_key(&self, engine: DbEngine) -> [u8; 16] {
        engine.sort_key(&self.0)
    }

    /// Builds the 15-character Crockford short form.
    ///
    /// Encodes 75 bits: the 48-bit `timestamp_ms` followed by 27 bits taken
    /// from bytes 6..=9, which are random under every engine layout. The
    /// caller supplies the timestamp because the value alone cannot say
    /// where its timestamp lives (see [`Self::timestamp`]).
    ///
    /// This form is compact and time-sortable but NOT round-trippable: it
    /// drops 53 of the 80 random bits.
    pub fn to_short_string(&self, timestamp_ms: u64) -> String {
        let entropy = u32::from_be_bytes([self.0[6], self.0[7], self.0[8], self.0[9]]);
        let value = (u128::from(timestamp_ms & MS_48_MASK) << 27) | u128::from(entropy >> 5);
        let mut buf = [0u8; SHORT_LEN];
        crockford::encode_bits(value, &mut buf);
        buf.iter().map(|&b| char::from(b)).collect()
    }
}

/// Low 48 bits of a millisecond timestamp, the slice COMB values embed.
pub(crate) const MS_48_MASK: u64 = (1 << (8 * TIMESTAMP_BYTES as u64)) - 1;

/// Lowercase hyphenated form, `8-4-4-4-12` hex digits.
impl fmt::Display for CombGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(HYPHENATED_LEN);
        hex::push_hex(&mut out, &self.0[0..4]);
        out.push('-');
        hex::push_hex(&mut out, &self.0[4..6]);
        out.push('-');
        hex::push_hex(&mut out, &self.0[6..8]);
        out.push('-');
        hex::push_hex(&mut out, &self.0[8..10]);
        out.push('-');
        hex::push_hex(&mut out, &self.0[10..16]);
        f.write_str(&out)
    }
}

impl fmt::Debug for CombGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Parses the hyphenated form or the bare 32-digit hex form, either case.
impl FromStr for CombGuid {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        let raw = s.as_bytes();
        match raw.len() {
            SIMPLE_LEN => Ok(Self(hex::decode_fixed::<16>(s)?)),
            HYPHENATED_LEN => {
                for &i in &[8usize, 13, 18, 23] {
                    if raw[i] != b'-' {
                        return Err(FormatError::Char { byte: raw[i], index: i }.into());
                    }
                }
                let mut bytes = [0u8; 16];
                let mut cursor = 0;
                for slot in bytes.iter_mut() {
                    if matches!(cursor, 8 | 13 | 18 | 23) {
                        cursor += 1;
                    }
                    let hi = hex::nibble(raw[cursor], cursor)?;
                    let lo = hex::nibble(raw[cursor + 1], cursor + 1)?;
                    *slot = (hi << 4) | lo;
                    cursor += 2;
                }
                Ok(Self(bytes))
            }
            found => Err(FormatError::Length {
                expected: HYPHENATED_LEN,
                found,
            }
            .into()),
        }
    }
}

use crate::FormatError;

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Appends `bytes` to `out` as lowercase hex digits.
pub(crate) fn push_hex(out: &mut String, bytes: &[u8]) {
    for &b in bytes {
        out.push(HEX[(b >> 4) as usize] as char);
        out.push(HEX[(b & 0x0F) as usize] as char);
    }
}

/// Encodes `bytes` as a lowercase hex string.
pub(crate) fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    push_hex(&mut out, bytes);
    out
}

pub(crate) fn nibble(byte: u8, index: usize) -> Result<u8, FormatError> {
    match byte {
        b'0'..=b'9' => Ok(byte - b'0'),
        b'a'..=b'f' => Ok(byte - b'a' + 10),
        b'A'..=b'F' => Ok(byte - b'A' + 10),
        _ => Err(FormatError::Char { byte, index }),
    }
}

/// Decodes a hex string of any even length. Accepts both cases.
pub(crate) fn decode(s: &str) -> Result<Vec<u8>, FormatError> {
    let raw = s.as_bytes();
    if raw.len() % 2 != 0 {
        return Err(FormatError::OddLength { len: raw.len() });
    }

    let mut out = Vec::with_capacity(raw.len() / 2);
    for (i, pair) in raw.chunks_exact(2).enumerate() {
        let hi = nibble(pair[0], 2 * i)?;
        let lo = nibble(pair[1], 2 * i + 1)?;
        out.push((hi << 4) | lo);
    }
    Ok(out)
}

/// Decodes exactly `2 * N` hex digits into an `N`-byte array.
pub(crate) fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], FormatError> {
    let raw = s.as_bytes();
    if raw.len() != 2 * N {
        return Err(FormatError::Length {
            expected: 2 * N,
            found: raw.len(),
        });
    }

    let mut out = [0u8; N];
    for (i, slot) in out.iter_mut().enumerate() {
        let hi = nibble(raw[2 * i], 2 * i)?;
        let lo = nibble(raw[2 * i + 1], 2 * i + 1)?;
        *slot = (hi << 4) | lo;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_is_lowercase() {
        assert_eq!(encode(&[0x00, 0xAB, 0xFF]), "00abff");
    }

    #[test]
    fn decode_roundtrips() {
        let bytes = [0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF];
        assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
    }

    #[test]
    fn decode_accepts_uppercase() {
        assert_eq!(decode("DEADBEEF").unwrap(), decode("deadbeef").unwrap());
    }

    #[test]
    fn decode_rejects_odd_length() {
        assert_eq!(
            decode("abc").unwrap_err(),
            FormatError::OddLength { len: 3 }
        );
    }

    #[test]
    fn decode_rejects_invalid_digit() {
        assert_eq!(
            decode("abxg").unwrap_err(),
            FormatError::Char { byte: b'x', index: 2 }
        );
    }

    #[test]
    fn decode_fixed_checks_length() {
        assert_eq!(decode_fixed::<2>("0102").unwrap(), [1, 2]);
        assert_eq!(
            decode_fixed::<2>("01").unwrap_err(),
            FormatError::Length {
                expected: 4,
                found: 2,
            }
        );
    }
}

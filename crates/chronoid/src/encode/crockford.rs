use crate::FormatError;

const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: usize = 5;

/// Lookup table for Crockford Base32 decoding.
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    // Main alphabet, allow lower-case
    while i < 32 {
        let c = ALPHABET[i as usize];
        lut[c as usize] = i;
        if c.is_ascii_uppercase() {
            lut[(c + 32) as usize] = i; // lowercase letter
        }
        i += 1;
    }
    // Crockford-specific aliases
    lut[b'O' as usize] = 0;
    lut[b'o' as usize] = 0;
    lut[b'I' as usize] = 1;
    lut[b'i' as usize] = 1;
    lut[b'L' as usize] = 1;
    lut[b'l' as usize] = 1;
    lut
};

/// Encodes the low `buf.len() * 5` bits of `value` as Crockford Base32,
/// most significant group first, filling `buf` exactly.
///
/// Any higher bits of `value` are ignored; callers pick the buffer length
/// that covers their value's width (13 chars for 64 bits, 15 for 75).
pub(crate) fn encode_bits(value: u128, buf: &mut [u8]) {
    let mut shift = buf.len() * BITS_PER_CHAR;
    for slot in buf.iter_mut() {
        shift -= BITS_PER_CHAR;
        *slot = ALPHABET[((value >> shift) & 0x1F) as usize];
    }
}

/// Decodes a fixed-length Crockford Base32 string into a `u64`.
///
/// Accepts lowercase input and the Crockford aliases (`O` → 0, `I`/`L` → 1).
/// Fails on wrong length, bytes outside the alphabet, or a decoded value
/// wider than 64 bits.
pub(crate) fn decode_u64(encoded: &str, expected_len: usize) -> Result<u64, FormatError> {
    if encoded.len() != expected_len {
        return Err(FormatError::Length {
            expected: expected_len,
            found: encoded.len(),
        });
    }

    let mut acc: u128 = 0;
    for (index, byte) in encoded.bytes().enumerate() {
        let val = LOOKUP[byte as usize];
        if val == NO_VALUE {
            return Err(FormatError::Char { byte, index });
        }
        acc = (acc << BITS_PER_CHAR) | u128::from(val);
    }

    u64::try_from(acc).map_err(|_| FormatError::Overflow)
}

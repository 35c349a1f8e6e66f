use crate::{EntropySource, FormatError, Result, encode::hex};
use core::{fmt, str::FromStr};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Produces a keyed signature over a token payload.
///
/// Implementations wrap whatever MAC or keyed hash the application already
/// uses. This crate ships no cryptographic primitives of its own; the signer
/// is always injected.
pub trait TokenSigner {
    /// Signs `payload`, returning the signature bytes.
    fn sign(&self, payload: &[u8]) -> Vec<u8>;
}

/// A random payload sealed with a signature from a [`TokenSigner`].
///
/// The textual form is `hex(payload).hex(signature)`. [`FromStr`] checks
/// structure only; verifying the seal requires the signing key and lives on
/// [`SecurityTokenGenerator::parse`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SecurityToken {
    payload: Vec<u8>,
    signature: Vec<u8>,
}

impl SecurityToken {
    /// The random payload.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The signature over the payload.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Consumes the token, returning `(payload, signature)`.
    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>) {
        (self.payload, self.signature)
    }
}

impl fmt::Display for SecurityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(2 * (self.payload.len() + self.signature.len()) + 1);
        hex::push_hex(&mut out, &self.payload);
        out.push('.');
        hex::push_hex(&mut out, &self.signature);
        f.write_str(&out)
    }
}

impl fmt::Debug for SecurityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for SecurityToken {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (payload_text, signature_text) =
            s.split_once('.').ok_or(FormatError::MissingSeparator)?;
        let payload = hex::decode(payload_text)?;
        // Shift char indices in the second half so errors point into `s`.
        let signature = hex::decode(signature_text).map_err(|err| match err {
            FormatError::Char { byte, index } => FormatError::Char {
                byte,
                index: index + payload_text.len() + 1,
            },
            other => other,
        })?;
        Ok(Self { payload, signature })
    }
}

/// Generates and verifies [`SecurityToken`]s.
///
/// Pairs an [`EntropySource`] for the payload with a [`TokenSigner`] for the
/// seal. Stateless, so a single instance serves any number of threads.
///
/// # Example
///
/// ```
/// use chronoid::{SecurityTokenGenerator, ThreadEntropy, TokenSigner};
///
/// struct Doubler;
///
/// impl TokenSigner for Doubler {
///     fn sign(&self, payload: &[u8]) -> Vec<u8> {
///         payload.iter().map(|byte| byte.wrapping_mul(2)).collect()
///     }
/// }
///
/// let generator = SecurityTokenGenerator::new(Doubler, ThreadEntropy);
/// let token = generator.generate(16);
/// let parsed = generator.parse(&token.to_string()).unwrap();
/// assert_eq!(parsed, token);
/// ```
#[derive(Debug, Clone)]
pub struct SecurityTokenGenerator<S, R> {
    signer: S,
    entropy: R,
}

impl<S: TokenSigner, R: EntropySource> SecurityTokenGenerator<S, R> {
    /// Creates a generator from a signer and an entropy source.
    pub fn new(signer: S, entropy: R) -> Self {
        Self { signer, entropy }
    }

    /// Generates a token with a `len`-byte random payload.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self, len: usize) -> SecurityToken {
        let mut payload = vec![0u8; len];
        self.entropy.fill(&mut payload);
        let signature = self.signer.sign(&payload);
        SecurityToken { payload, signature }
    }

    /// Parses the textual form and verifies the seal.
    ///
    /// The signature comparison does not short-circuit on the first
    /// mismatching byte.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::SignatureMismatch`] when re-signing the payload
    /// does not reproduce the embedded signature, and the underlying
    /// [`FormatError`] when the text is not two dot-separated hex runs.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all))]
    pub fn parse(&self, text: &str) -> Result<SecurityToken> {
        let token: SecurityToken = text.parse()?;
        let expected = self.signer.sign(&token.payload);
        if !const_time_eq(&expected, &token.signature) {
            return Err(FormatError::SignatureMismatch.into());
        }
        Ok(token)
    }
}

/// Byte equality without an early exit on the first differing byte.
/// Lengths are public, so a length mismatch may return immediately.
fn const_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b) {
        diff |= x ^ y;
    }
    diff == 0
}

use crate::{EntropySource, FormatError, ThreadEntropy, encode::hex};
use core::{fmt, str::FromStr};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// A variable-length identifier of cryptographically strong random bytes.
///
/// Random tokens carry no timestamp and make no ordering promise; they exist
/// for correlation IDs, nonces, and opaque handles where unpredictability is
/// the only requirement. The textual form is lowercase hex.
///
/// # Example
///
/// ```
/// use chronoid::RandomTokenGenerator;
///
/// let generator = RandomTokenGenerator::new();
/// let token = generator.generate(16);
/// assert_eq!(token.len(), 16);
/// assert_eq!(token.to_hex().len(), 32);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RandomToken(Vec<u8>);

impl RandomToken {
    /// Wraps raw bytes as a token.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Returns the token's bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the token, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Number of bytes in the token.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the token holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex rendering, two digits per byte.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Parses the hex rendering produced by [`Self::to_hex`].
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] for odd-length input or non-hex digits.
    pub fn from_hex(encoded: &str) -> Result<Self, FormatError> {
        encoded.parse()
    }
}

impl fmt::Display for RandomToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for RandomToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for RandomToken {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(hex::decode(s)?))
    }
}

/// Stateless generator for [`RandomToken`]s.
///
/// Every call draws fresh bytes from the [`EntropySource`]; no state is
/// shared between calls, so one instance serves any number of threads
/// without locking.
#[derive(Debug, Default, Clone)]
pub struct RandomTokenGenerator<R = ThreadEntropy> {
    entropy: R,
}

impl RandomTokenGenerator<ThreadEntropy> {
    /// Creates a generator backed by the thread-local CSPRNG.
    pub fn new() -> Self {
        Self {
            entropy: ThreadEntropy,
        }
    }
}

impl<R: EntropySource> RandomTokenGenerator<R> {
    /// Creates a generator drawing from `entropy`.
    pub fn with_entropy(entropy: R) -> Self {
        Self { entropy }
    }

    /// Generates a token of `len` random bytes.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self, len: usize) -> RandomToken {
        let mut bytes = vec![0u8; len];
        self.entropy.fill(&mut bytes);
        RandomToken(bytes)
    }
}

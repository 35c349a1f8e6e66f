use rand::{RngCore, rng};

/// A source of cryptographically-strong random bytes.
///
/// This abstraction lets you plug in the real thread-local CSPRNG in
/// production and a deterministic source in tests. Every random component in
/// this crate (COMB random bytes, token payloads) flows through it.
///
/// # Example
///
/// ```
/// use chronoid::EntropySource;
///
/// struct ZeroEntropy;
/// impl EntropySource for ZeroEntropy {
///     fn fill(&self, buf: &mut [u8]) {
///         buf.fill(0);
///     }
/// }
///
/// let mut buf = [0xFF; 4];
/// ZeroEntropy.fill(&mut buf);
/// assert_eq!(buf, [0; 4]);
/// ```
pub trait EntropySource {
    /// Fills `buf` with random bytes.
    fn fill(&self, buf: &mut [u8]);
}

/// An [`EntropySource`] backed by the thread-local RNG ([`rand::rng`]).
///
/// This RNG is fast, cryptographically secure (ChaCha-based), and
/// automatically reseeded periodically.
///
/// Each OS thread has its own RNG instance, so calls from multiple threads
/// are contention-free. This type does not store the RNG itself; it accesses
/// the thread-local generator on each call, which keeps the wrapper
/// zero-sized, `Send`, and `Sync` even though `ThreadRng` is neither.
#[derive(Default, Clone, Debug)]
pub struct ThreadEntropy;

impl EntropySource for ThreadEntropy {
    fn fill(&self, buf: &mut [u8]) {
        rng().fill_bytes(buf);
    }
}

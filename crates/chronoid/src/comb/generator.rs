use crate::{
    CombGuid, DbEngine, EntropySource, Result, WallClock,
    comb::{engine::RANDOM_BYTES, id::MS_48_MASK},
    mutex::{self, Mutex},
};
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Generates COMB GUIDs laid out for one database engine.
///
/// Each value combines 10 bytes from the entropy source with the low 48
/// bits of the clock reading, spliced at the engine's timestamp positions.
/// Uniqueness rests entirely on the 80 random bits, so the generator is
/// stateless and trivially shareable; values from the same millisecond have
/// no defined relative order.
///
/// By default the clock is read as-is: a wall-clock step backwards produces
/// values that sort before already-issued ones (still unique).
/// [`Self::with_monotonic_guard`] instead clamps the timestamp to be
/// non-decreasing per instance, at the cost of one mutex acquisition per
/// value.
///
/// # Example
///
/// ```
/// use chronoid::{CombGenerator, DbEngine, SystemClock, ThreadEntropy};
///
/// let generator = CombGenerator::new(DbEngine::MySql, SystemClock, ThreadEntropy);
/// let a = generator.generate().unwrap();
/// let b = generator.generate().unwrap();
/// assert_ne!(a, b);
/// ```
pub struct CombGenerator<C, R> {
    engine: DbEngine,
    clock: C,
    entropy: R,
    /// Last issued timestamp; present only when the monotonic guard is on.
    guard: Option<Mutex<u64>>,
}

impl<C, R> CombGenerator<C, R>
where
    C: WallClock,
    R: EntropySource,
{
    /// Creates a generator that trusts the clock as-is.
    pub fn new(engine: DbEngine, clock: C, entropy: R) -> Self {
        Self {
            engine,
            clock,
            entropy,
            guard: None,
        }
    }

    /// Creates a generator whose timestamps never decrease.
    ///
    /// During a clock regression new values keep the last issued
    /// millisecond until the clock catches back up, preserving index
    /// locality for consumers that cannot tolerate out-of-order keys.
    pub fn with_monotonic_guard(engine: DbEngine, clock: C, entropy: R) -> Self {
        Self {
            engine,
            clock,
            entropy,
            guard: Some(Mutex::new(0)),
        }
    }

    /// The engine this generator lays values out for.
    pub fn engine(&self) -> DbEngine {
        self.engine
    }

    /// Generates the next GUID.
    ///
    /// # Errors
    ///
    /// [`Error::LockPoisoned`](crate::Error::LockPoisoned) if the monotonic
    /// guard's lock was poisoned; infallible without the guard.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate(&self) -> Result<CombGuid> {
        let mut now = self.clock.now_millis();
        if let Some(guard) = &self.guard {
            let mut last = mutex::lock(guard)?;
            now = now.max(*last);
            *last = now;
        }

        let mut random = [0u8; RANDOM_BYTES];
        self.entropy.fill(&mut random);

        let positions = self.engine.timestamp_positions();
        let mut bytes = [0u8; 16];

        // Random bytes take the slots the timestamp skips, in RFC order.
        let mut next_random = 0;
        for (index, slot) in bytes.iter_mut().enumerate() {
            if !positions.contains(&index) {
                *slot = random[next_random];
                next_random += 1;
            }
        }

        // 48-bit timestamp, most significant byte at the engine's most
        // significant comparison slot.
        let ts_be = (now & MS_48_MASK).to_be_bytes();
        for (k, &pos) in positions.iter().enumerate() {
            bytes[pos] = ts_be[2 + k];
        }

        Ok(CombGuid::from_bytes(bytes))
    }
}

use crate::{
    Epoch, Error, IdStatus, Result, SnowflakeId, SnowflakeLayout, SnowflakeParts, WallClock,
    mutex::{self, Mutex},
};
use core::{cmp::Ordering, time::Duration};
use std::time::Instant;
#[cfg(feature = "tracing")]
use tracing::instrument;

/// How a generator responds when the clock reads earlier than the last
/// issued timestamp.
///
/// Reusing stale state would risk duplicate IDs, so a regression is never
/// absorbed silently; the only question is whether to fail or wait it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegressionPolicy {
    /// Surface [`Error::ClockRegression`] immediately. The default.
    Fail,
    /// Treat regressions up to the bound as throttling: [`poll`] reports
    /// [`IdStatus::Pending`] until the clock catches back up, and the
    /// blocking facades wait. Regressions beyond the bound still fail.
    ///
    /// [`poll`]: SnowflakeGenerator::poll
    WaitUpTo(Duration),
}

impl Default for RegressionPolicy {
    fn default() -> Self {
        Self::Fail
    }
}

/// Construction parameters for a [`SnowflakeGenerator`].
///
/// # Example
///
/// ```
/// use chronoid::{Epoch, RegressionPolicy, SnowflakeConfig, SnowflakeLayout};
/// use std::time::Duration;
///
/// let config = SnowflakeConfig {
///     epoch: Epoch::from_unix_millis(1_640_995_200_000), // 2022-01-01
///     on_regression: RegressionPolicy::WaitUpTo(Duration::from_millis(10)),
///     ..SnowflakeConfig::default()
/// };
/// assert_eq!(config.layout, SnowflakeLayout::DEFAULT);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnowflakeConfig {
    /// Reference instant that ID timestamps count from. Must not change for
    /// the life of a deployed ID space.
    pub epoch: Epoch,
    /// Bit allocation for the packed components.
    pub layout: SnowflakeLayout,
    /// Clock regression handling.
    pub on_regression: RegressionPolicy,
}

impl Default for SnowflakeConfig {
    fn default() -> Self {
        Self {
            epoch: Epoch::DEFAULT,
            layout: SnowflakeLayout::DEFAULT,
            on_regression: RegressionPolicy::Fail,
        }
    }
}

/// Mutable generator state: the last observed tick and the next sequence
/// value within it.
struct GenState {
    /// Milliseconds since the epoch when an ID was last issued.
    last_ts: u64,
    /// Next untaken sequence value within `last_ts`.
    sequence: u64,
}

/// A Snowflake-style ID generator.
///
/// Packs `(milliseconds since epoch, node, sequence)` into a [`SnowflakeId`]
/// per the configured [`SnowflakeLayout`]. One mutex guards the
/// `(timestamp, sequence)` pair, so a generator can be shared across threads
/// by reference; IDs from one instance are strictly increasing.
///
/// Uniqueness across instances rests on distinct node IDs, which deployment
/// must guarantee; the generator validates the range, nothing more.
///
/// The non-blocking [`poll`] exposes the state machine directly; [`generate`]
/// and [`generate_timeout`] drive it with a graded wait, and the
/// `async-tokio` feature adds `generate_async`.
///
/// [`poll`]: Self::poll
/// [`generate`]: Self::generate
/// [`generate_timeout`]: Self::generate_timeout
///
/// # Example
///
/// ```
/// use chronoid::{SnowflakeGenerator, SystemClock};
///
/// let generator = SnowflakeGenerator::new(5, SystemClock).unwrap();
/// let a = generator.generate().unwrap();
/// let b = generator.generate().unwrap();
/// assert!(b > a);
/// assert_eq!(generator.decompose(a).node_id, 5);
/// ```
pub struct SnowflakeGenerator<C: WallClock> {
    node_id: u64,
    epoch: Epoch,
    layout: SnowflakeLayout,
    on_regression: RegressionPolicy,
    clock: C,
    state: Mutex<GenState>,
}

impl<C: WallClock> SnowflakeGenerator<C> {
    /// Creates a generator with the default configuration
    /// ([`Epoch::DEFAULT`], [`SnowflakeLayout::DEFAULT`],
    /// [`RegressionPolicy::Fail`]).
    ///
    /// # Errors
    ///
    /// See [`Self::with_config`].
    pub fn new(node_id: u64, clock: C) -> Result<Self> {
        Self::with_config(node_id, clock, SnowflakeConfig::default())
    }

    /// Creates a generator from explicit configuration.
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfRange`] if `node_id` exceeds the layout's node width.
    /// - [`Error::EpochAhead`] if the clock currently reads before the
    ///   configured epoch.
    pub fn with_config(node_id: u64, clock: C, config: SnowflakeConfig) -> Result<Self> {
        if node_id > config.layout.max_node_id() {
            return Err(Error::OutOfRange {
                field: "node_id",
                value: node_id,
                bits: config.layout.node_bits(),
            });
        }
        let now = clock.now_millis();
        if now < config.epoch.unix_millis() {
            return Err(Error::EpochAhead {
                ahead: Duration::from_millis(config.epoch.unix_millis() - now),
            });
        }
        Ok(Self {
            node_id,
            epoch: config.epoch,
            layout: config.layout,
            on_regression: config.on_regression,
            clock,
            state: Mutex::new(GenState {
                last_ts: 0,
                sequence: 0,
            }),
        })
    }

    /// The node ID stamped into every generated value.
    pub fn node_id(&self) -> u64 {
        self.node_id
    }

    /// The epoch timestamps count from.
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// The configured bit allocation.
    pub fn layout(&self) -> SnowflakeLayout {
        self.layout
    }

    /// Unpacks `id` with this generator's layout.
    pub fn decompose(&self, id: SnowflakeId) -> SnowflakeParts {
        self.layout.unpack(id)
    }

    /// Attempts one non-blocking generation step.
    ///
    /// Reads the clock once under the state lock and advances the state
    /// machine:
    ///
    /// - clock ahead of the last tick: start the new tick at sequence 0.
    /// - same tick: issue the next sequence value, or report
    ///   [`IdStatus::Pending`] for one millisecond when the sequence space
    ///   is spent.
    /// - clock behind (regression): resolved by the configured
    ///   [`RegressionPolicy`].
    ///
    /// # Errors
    ///
    /// - [`Error::ClockRegression`] beyond the policy tolerance.
    /// - [`Error::OutOfRange`] once the timestamp outgrows its width (the
    ///   layout's lifetime is over).
    /// - [`Error::EpochAhead`] if the clock fell behind the epoch itself.
    /// - [`Error::LockPoisoned`] if another thread panicked mid-update.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn poll(&self) -> Result<IdStatus<SnowflakeId>> {
        let mut state = mutex::lock(&self.state)?;
        // Read inside the critical section so the comparison below never
        // sees a reading older than the last committed tick.
        let now_unix = self.clock.now_millis();
        let Some(now) = now_unix.checked_sub(self.epoch.unix_millis()) else {
            return Err(Error::EpochAhead {
                ahead: Duration::from_millis(self.epoch.unix_millis() - now_unix),
            });
        };

        let status = match now.cmp(&state.last_ts) {
            Ordering::Greater => {
                let id = self.layout.pack(now, self.node_id, 0)?;
                state.last_ts = now;
                state.sequence = 1;
                IdStatus::Ready { id }
            }
            Ordering::Equal => {
                if state.sequence <= self.layout.max_sequence() {
                    let id = self.layout.pack(now, self.node_id, state.sequence)?;
                    state.sequence += 1;
                    IdStatus::Ready { id }
                } else {
                    IdStatus::Pending {
                        wait: Duration::from_millis(1),
                    }
                }
            }
            Ordering::Less => cold_clock_behind(self.on_regression, state.last_ts - now)?,
        };
        Ok(status)
    }

    /// Generates the next ID, waiting as long as it takes.
    ///
    /// Drives [`Self::poll`] with a graded wait (sleep for long pauses,
    /// yield for short ones, spin at the end). Throttling normally lasts
    /// under a millisecond; unbounded waiting only arises if the clock
    /// stalls entirely. Use [`Self::generate_timeout`] to bound the wait.
    ///
    /// # Errors
    ///
    /// Everything [`Self::poll`] can return except throttling.
    pub fn generate(&self) -> Result<SnowflakeId> {
        loop {
            match self.poll()? {
                IdStatus::Ready { id } => return Ok(id),
                IdStatus::Pending { wait } => block_for(wait),
            }
        }
    }

    /// Generates the next ID, waiting at most `max_wait` in total.
    ///
    /// # Errors
    ///
    /// [`Error::SequenceExhausted`] carrying the elapsed wait when the bound
    /// runs out, plus everything [`Self::poll`] can return.
    pub fn generate_timeout(&self, max_wait: Duration) -> Result<SnowflakeId> {
        let start = Instant::now();
        loop {
            match self.poll()? {
                IdStatus::Ready { id } => return Ok(id),
                IdStatus::Pending { wait } => {
                    let waited = start.elapsed();
                    if waited >= max_wait {
                        return Err(Error::SequenceExhausted { waited });
                    }
                    block_for(wait.min(max_wait - waited));
                }
            }
        }
    }
}

// Regressions are rare; keep the policy check off the hot path.
#[cold]
#[inline(never)]
fn cold_clock_behind(
    policy: RegressionPolicy,
    behind_ms: u64,
) -> Result<IdStatus<SnowflakeId>> {
    let behind = Duration::from_millis(behind_ms);
    match policy {
        RegressionPolicy::WaitUpTo(bound) if behind <= bound => {
            Ok(IdStatus::Pending { wait: behind })
        }
        _ => Err(Error::ClockRegression { behind }),
    }
}

/// Blocks the current thread for `dur` by sleeping, yielding, or spinning
/// depending on how much time remains.
fn block_for(dur: Duration) {
    let start = Instant::now();
    loop {
        let Some(remaining) = dur.checked_sub(start.elapsed()) else {
            break;
        };
        if remaining > Duration::from_micros(500) {
            std::thread::sleep(remaining);
        } else if remaining > Duration::from_micros(1) {
            std::thread::yield_now();
        } else {
            std::hint::spin_loop();
        }
    }
}

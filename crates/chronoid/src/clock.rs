use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// A fixed reference instant that identifier timestamps count from.
///
/// Snowflake timestamps are stored as milliseconds elapsed since the
/// generator's epoch, so a later epoch buys a longer usable timestamp range
/// at a given bit width. The epoch is fixed per generator at construction
/// and must never change for a deployed ID space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Epoch(u64);

impl Epoch {
    /// The Unix epoch: Thursday, January 1, 1970 00:00:00 UTC.
    pub const UNIX: Epoch = Epoch(0);

    /// Default generation epoch: Wednesday, January 1, 2020 00:00:00 UTC.
    pub const DEFAULT: Epoch = Epoch(1_577_836_800_000);

    /// Creates an epoch from milliseconds since the Unix epoch.
    pub const fn from_unix_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// This epoch as milliseconds since the Unix epoch.
    pub const fn unix_millis(&self) -> u64 {
        self.0
    }
}

impl Default for Epoch {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A source of wall-clock time in milliseconds since the Unix epoch.
///
/// Implementations report absolute UTC time; generators own their [`Epoch`]
/// and perform the subtraction themselves. Consumers must tolerate repeated
/// identical readings (several calls within one millisecond) and treat a
/// reading earlier than a previous one as an anomaly to resolve by policy.
/// Implementations never mask a regression by caching previous readings;
/// that is the generator's decision.
///
/// # Example
///
/// ```
/// use chronoid::WallClock;
///
/// struct FixedClock;
/// impl WallClock for FixedClock {
///     fn now_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// assert_eq!(FixedClock.now_millis(), 1234);
/// ```
pub trait WallClock {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// A clock that reads [`SystemTime::now`] on every call.
///
/// Subject to operating-system clock discipline: readings can jump forward
/// or move backwards when the wall clock is stepped. Pair it with a
/// regression tolerance ([`RegressionPolicy::WaitUpTo`]) or use
/// [`SteadyClock`] when the process must never observe time moving
/// backwards.
///
/// [`RegressionPolicy::WaitUpTo`]: crate::RegressionPolicy::WaitUpTo
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_millis() as u64
    }
}

/// A clock that anchors [`SystemTime`] once and extrapolates with
/// [`Instant`].
///
/// Readings never move backwards for the life of the value, even if the
/// operating system steps the wall clock underneath. The trade-off is
/// drift: two `SteadyClock` values anchored at different times may disagree
/// slightly, and a long-lived value will not track NTP corrections. Use one
/// clock per generator.
///
/// # Example
///
/// ```
/// use chronoid::{SteadyClock, WallClock};
///
/// let clock = SteadyClock::new();
/// let a = clock.now_millis();
/// let b = clock.now_millis();
/// assert!(b >= a);
/// ```
#[derive(Debug, Clone)]
pub struct SteadyClock {
    anchor_millis: u64,
    started: Instant,
}

impl SteadyClock {
    /// Anchors a new steady clock at the current system time.
    pub fn new() -> Self {
        Self {
            anchor_millis: SystemClock.now_millis(),
            started: Instant::now(),
        }
    }
}

impl Default for SteadyClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WallClock for SteadyClock {
    fn now_millis(&self) -> u64 {
        self.anchor_millis + self.started.elapsed().as_millis() as u64
    }
}

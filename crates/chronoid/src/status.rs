use core::time::Duration;

/// The outcome of a non-blocking generation step.
///
/// [`SnowflakeGenerator::poll`](crate::SnowflakeGenerator::poll) returns this
/// instead of blocking:
///
/// - [`IdStatus::Ready`] carries a freshly generated ID.
/// - [`IdStatus::Pending`] means the generator is throttled and cannot issue
///   another ID until the clock advances; `wait` is the suggested backoff.
///
/// This keeps the state machine embeddable: callers decide whether to spin,
/// sleep, or await, or use the blocking [`generate`] and (feature-gated)
/// async `generate_async` facades which drive `poll` for them.
///
/// [`generate`]: crate::SnowflakeGenerator::generate
///
/// # Example
///
/// ```
/// use chronoid::{IdStatus, SnowflakeGenerator, WallClock};
///
/// struct FixedClock;
/// impl WallClock for FixedClock {
///     fn now_millis(&self) -> u64 {
///         1_577_836_800_042
///     }
/// }
///
/// let generator = SnowflakeGenerator::new(1, FixedClock).unwrap();
/// match generator.poll().unwrap() {
///     IdStatus::Ready { id } => println!("id: {id}"),
///     IdStatus::Pending { wait } => println!("retry in {wait:?}"),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdStatus<T> {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: T,
    },
    /// No ID could be issued for the current tick.
    ///
    /// Either the sequence space for this millisecond is spent or the clock
    /// is behind within the configured regression tolerance. Retry once
    /// `wait` has elapsed.
    Pending {
        /// Suggested time to back off before polling again.
        wait: Duration,
    },
}

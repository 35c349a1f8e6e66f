use core::time::Duration;

/// Abstracts how async callers wait out a pending interval.
///
/// Keeps the generator extension independent of any one runtime; the crate
/// ships Tokio providers and applications can supply their own.
pub trait SleepProvider {
    /// Resolves after at least `dur` has passed.
    fn sleep_for(dur: Duration) -> impl Future<Output = ()> + Send;
}

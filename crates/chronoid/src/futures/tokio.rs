use super::SleepProvider;
use core::time::Duration;

/// A [`SleepProvider`] backed by Tokio's timer.
///
/// The default choice for async applications built on Tokio.
pub struct TokioSleep;

impl SleepProvider for TokioSleep {
    async fn sleep_for(dur: Duration) {
        tokio::time::sleep(dur).await
    }
}

/// A [`SleepProvider`] that yields to the scheduler instead of arming a
/// timer.
///
/// Avoids timer overhead and can improve latency when contention is rare,
/// at the cost of tighter polling loops. Under sustained contention
/// [`TokioSleep`] is usually the better fit.
pub struct TokioYield;

impl SleepProvider for TokioYield {
    async fn sleep_for(_dur: Duration) {
        tokio::task::yield_now().await
    }
}

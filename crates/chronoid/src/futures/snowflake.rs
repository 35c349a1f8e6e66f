use super::SleepProvider;
use crate::{IdStatus, Result, SnowflakeGenerator, SnowflakeId, WallClock};

/// Extension trait for generating Snowflake IDs from async contexts.
///
/// The returned future loops [`poll`](SnowflakeGenerator::poll) and hands
/// each pending interval to a [`SleepProvider`], so no thread ever blocks.
/// Dropping the future cancels the wait without touching generator state.
pub trait SnowflakeGeneratorAsyncExt {
    /// Returns a future that resolves to the next available ID.
    ///
    /// # Errors
    ///
    /// Propagates any error produced by [`SnowflakeGenerator::poll`].
    fn generate_async<S>(&self) -> impl Future<Output = Result<SnowflakeId>>
    where
        S: SleepProvider;
}

impl<C> SnowflakeGeneratorAsyncExt for SnowflakeGenerator<C>
where
    C: WallClock + Sync,
{
    fn generate_async<S>(&self) -> impl Future<Output = Result<SnowflakeId>>
    where
        S: SleepProvider,
    {
        async {
            loop {
                match self.poll()? {
                    IdStatus::Ready { id } => return Ok(id),
                    IdStatus::Pending { wait } => S::sleep_for(wait).await,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Epoch, SnowflakeConfig, SnowflakeLayout,
        futures::{TokioSleep, TokioYield},
    };
    use core::time::Duration;
    use std::sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    };

    const EPOCH_MS: u64 = Epoch::DEFAULT.unix_millis();

    /// Shared clock the test can advance while a future waits on it.
    #[derive(Clone)]
    struct AtomicClock(Arc<AtomicU64>);

    impl WallClock for AtomicClock {
        fn now_millis(&self) -> u64 {
            self.0.load(Ordering::Relaxed)
        }
    }

    #[tokio::test]
    async fn resolves_ready_ids_without_sleeping() {
        let clock = AtomicClock(Arc::new(AtomicU64::new(EPOCH_MS + 3)));
        let generator = SnowflakeGenerator::new(7, clock).unwrap();

        let first = generator.generate_async::<TokioYield>().await.unwrap();
        let second = generator.generate_async::<TokioYield>().await.unwrap();

        let parts = generator.decompose(second);
        assert_eq!(parts.timestamp, 3);
        assert_eq!(parts.node_id, 7);
        assert!(second > first);
    }

    #[tokio::test]
    async fn waits_out_an_exhausted_tick() {
        let layout = SnowflakeLayout::new(50, 12, 1).unwrap();
        let clock = AtomicClock(Arc::new(AtomicU64::new(EPOCH_MS)));
        let generator = SnowflakeGenerator::with_config(
            0,
            clock.clone(),
            SnowflakeConfig {
                layout,
                ..SnowflakeConfig::default()
            },
        )
        .unwrap();

        // One sequence bit: two IDs drain the current millisecond.
        generator.generate_async::<TokioSleep>().await.unwrap();
        generator.generate_async::<TokioSleep>().await.unwrap();

        let advance = async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            clock.0.store(EPOCH_MS + 1, Ordering::Relaxed);
        };
        let (id, ()) = tokio::join!(generator.generate_async::<TokioSleep>(), advance);

        let parts = generator.decompose(id.unwrap());
        assert_eq!(parts.timestamp, 1);
        assert_eq!(parts.sequence, 0);
    }
}

//! Embeddable identifier generation for data layers.
//!
//! `chronoid` produces globally unique, time-ordered identifiers without any
//! central coordination:
//!
//! - **Snowflake IDs**: 63-bit integers packing a millisecond timestamp, a
//!   node ID, and a per-millisecond sequence. Strictly monotonic per
//!   generator instance, with configurable bit widths and an explicit policy
//!   for clocks that move backwards.
//! - **Sequential GUIDs**: 128-bit values combining 10 bytes of
//!   cryptographically strong randomness with a 48-bit timestamp, spliced at
//!   the byte positions each database engine ([`DbEngine`]) actually sorts
//!   by, so inserts stay index-friendly.
//! - **Random and security tokens**: variable-length random byte strings,
//!   optionally sealed by an injected [`TokenSigner`].
//!
//! Generators are plain values over injected collaborators ([`WallClock`],
//! [`EntropySource`]); construct them where you need them and share by
//! reference.
//!
//! ```
//! use chronoid::{CombGenerator, DbEngine, SnowflakeGenerator, SystemClock, ThreadEntropy};
//!
//! // 63-bit integer IDs, strictly ordered per generator instance.
//! let ids = SnowflakeGenerator::new(1, SystemClock).unwrap();
//! let id = ids.generate().unwrap();
//!
//! // 128-bit sequential GUIDs laid out for one database engine.
//! let guids = CombGenerator::new(DbEngine::SqlServer, SystemClock, ThreadEntropy);
//! let guid = guids.generate().unwrap();
//!
//! println!("{id} {guid}");
//! ```
//!
//! # Feature flags
//!
//! - `parking-lot`: swap the generator mutex for `parking_lot::Mutex`.
//! - `serde`: serialize IDs and tokens ([`SnowflakeId`] as its `u64`, the
//!   rest as canonical strings).
//! - `tracing`: trace-level spans on the generation paths.
//! - `async-tokio`: `generate_async` plus Tokio sleep providers.
//! - `all`: everything above.

mod clock;
mod comb;
mod encode;
mod error;
#[cfg(feature = "async-tokio")]
mod futures;
mod mutex;
mod rand;
#[cfg(feature = "serde")]
mod serde;
mod snowflake;
mod status;
mod token;

pub use crate::clock::*;
pub use crate::comb::*;
pub use crate::error::*;
#[cfg(feature = "async-tokio")]
pub use crate::futures::*;
pub use crate::rand::*;
pub use crate::snowflake::*;
pub use crate::status::*;
pub use crate::token::*;

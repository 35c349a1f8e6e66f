//! Mutex selection for generator state.
//!
//! Defaults to [`std::sync::Mutex`]; the `parking-lot` feature swaps in
//! [`parking_lot::Mutex`], which does not poison. The [`lock`] helper hides
//! the API difference so call sites stay identical across both builds.

use crate::Result;

#[cfg(not(feature = "parking-lot"))]
pub(crate) use std::sync::{Mutex, MutexGuard};

#[cfg(feature = "parking-lot")]
pub(crate) use parking_lot::{Mutex, MutexGuard};

/// Acquires the lock, mapping std poisoning to
/// [`Error::LockPoisoned`](crate::Error::LockPoisoned).
#[cfg(not(feature = "parking-lot"))]
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    Ok(mutex.lock()?)
}

/// Acquires the lock. `parking_lot` mutexes cannot poison, so this never
/// fails.
#[cfg(feature = "parking-lot")]
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    Ok(mutex.lock())
}

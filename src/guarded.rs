//! A keyed mapping guarded by a lock that is only ever tried, never waited on.
//!
//! The caller owns the [`GuardedMap`] (usually behind an `Arc`) and shares it
//! with whoever touches the mapping. Single reads and writes use a
//! non-blocking acquisition: when the guard is busy the operation is dropped
//! rather than retried. [`GuardedMap::try_write`] and
//! [`GuardedMap::try_read`] report what happened; [`guarded_write`] and
//! [`guarded_read`] keep the weaker contract where a write always reports
//! success and a read falls back to the zero value.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockWriteGuard, TryLockError};

// keys are strings, so a fast non-cryptographic hasher will do
use core::hash::BuildHasherDefault;
use seahash::SeaHasher;
use tracing::{debug, warn};

use crate::datatype::FieldType;
use crate::error::{FieldkitError, Result};

pub type KeyHasher = BuildHasherDefault<SeaHasher>;
pub type Entries<T> = HashMap<String, T, KeyHasher>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// The guard was held elsewhere; nothing was written.
    Contended,
    /// The guard was poisoned by a panic while held; nothing was written.
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome<T> {
    Found(T),
    Missing,
    Contended,
    Failed,
}

impl<T> ReadOutcome<T> {
    pub fn found(self) -> Option<T> {
        match self {
            ReadOutcome::Found(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct GuardedMap<T> {
    entries: RwLock<Entries<T>>,
}

impl<T> Default for GuardedMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> GuardedMap<T> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Entries::default()),
        }
    }
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
    {
        Self {
            entries: RwLock::new(entries.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }
    /// Writes `value` under `key` if the guard is free right now.
    pub fn try_write(&self, key: impl Into<String>, value: T) -> WriteOutcome {
        let key = key.into();
        match self.entries.try_write() {
            Ok(mut entries) => {
                entries.insert(key, value);
                WriteOutcome::Written
            }
            Err(TryLockError::WouldBlock) => {
                debug!(key = %key, "guard busy, write skipped");
                WriteOutcome::Contended
            }
            Err(TryLockError::Poisoned(_)) => {
                warn!(key = %key, "guard poisoned, write skipped");
                WriteOutcome::Failed
            }
        }
    }
    /// Takes the exclusive guard, waiting for it if needed, for work that
    /// spans several operations. Single guarded reads and writes from others
    /// degrade while it is held.
    pub fn lock(&self) -> Result<RwLockWriteGuard<'_, Entries<T>>> {
        self.entries
            .write()
            .map_err(|e| FieldkitError::Lock(e.to_string()))
    }
    pub fn into_inner(self) -> Result<Entries<T>> {
        self.entries
            .into_inner()
            .map_err(|e| FieldkitError::Lock(e.to_string()))
    }
}

impl<T: Clone> GuardedMap<T> {
    /// Reads the value under `key` if the guard is free right now. Concurrent
    /// readers do not contend with each other.
    pub fn try_read(&self, key: &str) -> ReadOutcome<T> {
        match self.entries.try_read() {
            Ok(entries) => match entries.get(key) {
                Some(value) => ReadOutcome::Found(value.clone()),
                None => ReadOutcome::Missing,
            },
            Err(TryLockError::WouldBlock) => {
                debug!(key, "guard busy, read skipped");
                ReadOutcome::Contended
            }
            Err(TryLockError::Poisoned(_)) => {
                warn!(key, "guard poisoned, read skipped");
                ReadOutcome::Failed
            }
        }
    }
}

/// Writes if the guard is free, and reports success either way.
pub fn guarded_write<T>(map: &GuardedMap<T>, key: impl Into<String>, value: T) -> bool {
    let _ = map.try_write(key, value);
    true
}

/// Reads if the guard is free. A missing key, a busy guard and a poisoned
/// guard all give the zero value of `T`.
pub fn guarded_read<T: FieldType>(map: &GuardedMap<T>, key: &str) -> T {
    map.try_read(key).found().unwrap_or_else(T::zero)
}

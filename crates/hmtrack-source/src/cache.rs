//! Time-bounded read cache
//!
//! Successful reads are kept per table for the configured TTL. Failed reads
//! are never cached, so a transient outage is retried on the next read.
//! Writing a table through the cache drops that table's entry.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use hmtrack_core::{DataSource, SourceError, Table};
use tracing::debug;

/// Read counters of a [`CachedSource`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// A [`DataSource`] wrapper memoising reads
#[derive(Debug)]
pub struct CachedSource<S> {
    inner: S,
    ttl: Duration,
    entries: HashMap<String, (Table, Instant)>,
    stats: CacheStats,
}

impl<S> CachedSource<S> {
    /// Eight hours
    pub const DEFAULT_TTL: Duration = Duration::from_secs(8 * 60 * 60);

    pub fn new(inner: S) -> Self {
        Self {
            inner,
            ttl: Self::DEFAULT_TTL,
            entries: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Drop the cached copy of one table
    pub fn invalidate(&mut self, table: &str) {
        self.entries.remove(table);
    }

    /// Drop every cached table
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn fresh(&self, table: &str) -> Option<&Table> {
        self.entries
            .get(table)
            .filter(|(_, stored)| stored.elapsed() < self.ttl)
            .map(|(table, _)| table)
    }
}

impl<S: DataSource> DataSource for CachedSource<S> {
    fn read(&mut self, table: &str) -> Result<Table, SourceError> {
        if let Some(cached) = self.fresh(table).cloned() {
            self.stats.hits += 1;
            debug!(table, "cache hit");
            return Ok(cached);
        }

        self.stats.misses += 1;
        debug!(table, "cache miss");
        let data = self.inner.read(table)?;
        self.entries.insert(table.to_string(), (data.clone(), Instant::now()));
        Ok(data)
    }

    fn write(&mut self, table: &str, data: &Table) -> Result<(), SourceError> {
        self.inner.write(table, data)?;
        self.invalidate(table);
        Ok(())
    }

    fn describe(&self) -> String {
        format!("{} (cached for {}s)", self.inner.describe(), self.ttl.as_secs())
    }
}

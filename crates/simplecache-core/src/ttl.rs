//! TTL sum type and normalization

use chrono::{DateTime, Utc};

/// Normalized sentinel meaning "never expires".
pub const TTL_INFINITE: i64 = 0;

/// Normalized sentinel meaning "already expired".
pub const TTL_EXPIRED: i64 = -1;

/// Time-to-live for a cache entry.
///
/// Callers may supply no TTL at all, an explicit number of seconds, or a
/// duration span. [`Ttl::normalize`] folds all three into one signed
/// seconds value before the adapter talks to a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// No expiration (the absent-TTL case).
    Infinite,
    /// Explicit seconds. Zero means infinite, negative means already
    /// expired.
    Seconds(i64),
    /// A duration span, reduced to seconds against the Unix zero epoch.
    Span(chrono::Duration),
}

impl Ttl {
    /// Reduce to a single signed seconds value.
    ///
    /// Total: every input maps to exactly one of `TTL_INFINITE`, `n >= 0`,
    /// or a negative (expired) value. A span that cannot be applied to the
    /// zero epoch normalizes to [`TTL_EXPIRED`] rather than surfacing an
    /// error.
    pub fn normalize(&self) -> i64 {
        match *self {
            Ttl::Infinite => TTL_INFINITE,
            Ttl::Seconds(secs) => secs,
            Ttl::Span(span) => DateTime::<Utc>::UNIX_EPOCH
                .checked_add_signed(span)
                .map(|at| at.timestamp())
                .unwrap_or(TTL_EXPIRED),
        }
    }

    /// True if this TTL normalizes to an already-expired value.
    pub fn is_expired(&self) -> bool {
        self.normalize() < 0
    }
}

impl Default for Ttl {
    fn default() -> Self {
        Ttl::Infinite
    }
}

impl From<i64> for Ttl {
    fn from(secs: i64) -> Self {
        Ttl::Seconds(secs)
    }
}

impl From<std::time::Duration> for Ttl {
    fn from(duration: std::time::Duration) -> Self {
        Ttl::Seconds(i64::try_from(duration.as_secs()).unwrap_or(i64::MAX))
    }
}

impl From<chrono::Duration> for Ttl {
    fn from(span: chrono::Duration) -> Self {
        Ttl::Span(span)
    }
}

impl<T: Into<Ttl>> From<Option<T>> for Ttl {
    fn from(ttl: Option<T>) -> Self {
        match ttl {
            Some(ttl) => ttl.into(),
            None => Ttl::Infinite,
        }
    }
}

//! Removal causes reported with evictions.
//

/// Why an entry left the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemovalCause {
    /// Removed by the user.
    Explicit,
    /// Value replaced by the user.
    Replaced,
    /// Key or value reclaimed by the allocator/collector.
    Collected,
    /// Expiration time elapsed.
    Expired,
    /// Evicted because the cache exceeded its capacity.
    Size,
}

impl RemovalCause {
    /// Returns true if the removal was automatic rather than user-initiated.
    pub fn was_evicted(self) -> bool {
        matches!(self, Self::Collected | Self::Expired | Self::Size)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Replaced => "replaced",
            Self::Collected => "collected",
            Self::Expired => "expired",
            Self::Size => "size",
        }
    }
}

//! Resource snapshots
//!
//! A snapshot is one immutable read of the target resource, reduced to the
//! list of sub-items the predicate classifies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time view of a resource's sub-items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSnapshot<T> {
    /// Resource the snapshot was read from
    pub resource: String,
    /// When the fetch completed
    pub fetched_at: DateTime<Utc>,
    /// Sub-items in document order
    pub items: Vec<T>,
}

impl<T> ResourceSnapshot<T> {
    pub fn new(resource: impl Into<String>, items: Vec<T>) -> Self {
        Self {
            resource: resource.into(),
            fetched_at: Utc::now(),
            items,
        }
    }

    /// Snapshot with no sub-items (e.g. the items field is absent)
    pub fn empty(resource: impl Into<String>) -> Self {
        Self::new(resource, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_new() {
        let snap = ResourceSnapshot::new("/r/1", vec![1, 2, 3]);
        assert_eq!(snap.resource, "/r/1");
        assert_eq!(snap.len(), 3);
        assert!(!snap.is_empty());
    }

    #[test]
    fn test_snapshot_empty() {
        let snap: ResourceSnapshot<u8> = ResourceSnapshot::empty("/r/1");
        assert!(snap.is_empty());
        assert_eq!(snap.len(), 0);
    }
}

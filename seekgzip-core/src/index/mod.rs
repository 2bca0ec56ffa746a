//! The in-memory index: an ordered sequence of access points plus totals.

pub(crate) mod builder;
pub(crate) mod codec;

use crate::point::AccessPoint;

/// A complete random-access index over one gzip stream.
pub struct Index {
    pub(crate) points: Vec<AccessPoint>,
    pub(crate) total_in: u64,
    pub(crate) total_out: u64,
}

impl Index {
    /// Total uncompressed length of the indexed stream.
    pub fn total_out(&self) -> u64 {
        self.total_out
    }

    /// Total compressed length consumed to reach the end of the first
    /// gzip member.
    pub fn total_in(&self) -> u64 {
        self.total_in
    }

    /// Number of access points recorded.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the index has no access points (never true for an index
    /// produced by [`builder::build`]; exposed for completeness).
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The uncompressed-stream offset of each access point, in order.
    pub fn point_offsets(&self) -> Vec<u64> {
        self.points.iter().map(|p| p.out).collect()
    }

    /// Find the access point with the greatest `out` not exceeding
    /// `offset`, i.e. the nearest point at or before `offset`.
    ///
    /// Implemented as an upper-bound binary search minus one, the direct
    /// analogue of the original linear/binary `findpoint` search.
    pub(crate) fn find_preceding(&self, offset: u64) -> Option<&AccessPoint> {
        if self.points.is_empty() {
            return None;
        }
        let idx = self.points.partition_point(|p| p.out <= offset);
        if idx == 0 {
            None
        } else {
            Some(&self.points[idx - 1])
        }
    }
}

//! Merge points: budgeted insertion slots in a node's children list.
//!
//! A node keeps its merge points in registration order. Every insertion through
//! a merge point lands at the first point's position, shifts all points one
//! slot to the right, and spends one unit of the first point's budget. A point
//! whose budget reaches zero is dropped immediately.

use std::num::NonZeroUsize;

use tracing::trace;

/// Errors from merge point bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergePointError {
    #[error("invalid merge point at position {position}: a budget of 0 can never accept a child")]
    Invalid { position: usize },
    #[error("cannot step an empty merge point list")]
    TrackerInvariantViolation,
}

/// How many more children a merge point accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    Unlimited,
    /// Always non-zero while the point is tracked.
    Limited(usize),
}

/// A single insertion slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePoint {
    position: usize,
    budget: Budget,
}

impl MergePoint {
    /// Create a merge point from a signed count.
    ///
    /// Negative counts mean unlimited; a count of zero is rejected.
    pub fn new(position: usize, count: i64) -> Result<Self, MergePointError> {
        match usize::try_from(count) {
            Err(_) => Ok(Self::unlimited(position)),
            Ok(0) => Err(MergePointError::Invalid { position }),
            Ok(n) => Ok(Self {
                position,
                budget: Budget::Limited(n),
            }),
        }
    }

    /// A merge point that accepts any number of children.
    pub fn unlimited(position: usize) -> Self {
        Self {
            position,
            budget: Budget::Unlimited,
        }
    }

    /// A merge point that accepts at most `count` children.
    pub fn limited(position: usize, count: NonZeroUsize) -> Self {
        Self {
            position,
            budget: Budget::Limited(count.get()),
        }
    }

    /// Index in the owning node's children where the next child goes.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn budget(&self) -> Budget {
        self.budget
    }

    /// Remaining budget, `None` when unlimited.
    pub fn remaining(&self) -> Option<usize> {
        match self.budget {
            Budget::Unlimited => None,
            Budget::Limited(n) => Some(n),
        }
    }

    fn spend(&mut self) {
        if let Budget::Limited(n) = &mut self.budget {
            *n = n.saturating_sub(1);
        }
    }

    fn is_exhausted(&self) -> bool {
        self.budget == Budget::Limited(0)
    }
}

/// The ordered merge points of one node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePointList {
    points: Vec<MergePoint>,
}

impl MergePointList {
    pub fn new() -> Self {
        Self::default()
    }

    /// The point the next insertion will use.
    pub fn first(&self) -> Option<&MergePoint> {
        self.points.first()
    }

    /// Register a point after all existing ones.
    pub fn add(&mut self, point: MergePoint) {
        self.points.push(point);
    }

    /// Record an insertion at the first point's position.
    ///
    /// All points shift right by one, the first point spends one unit of
    /// budget, and exhausted points are removed. Points are assumed to be
    /// registered in non-decreasing position order; a point registered before
    /// a lower one still shifts.
    pub fn step(&mut self) -> Result<(), MergePointError> {
        let first = self
            .points
            .first_mut()
            .ok_or(MergePointError::TrackerInvariantViolation)?;
        first.spend();

        for point in &mut self.points {
            point.position += 1;
        }

        let before = self.points.len();
        self.points.retain(|point| !point.is_exhausted());
        if self.points.len() < before {
            trace!(remaining_points = self.points.len(), "merge point exhausted");
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MergePoint> {
        self.points.iter()
    }
}

//! Storage result types
//!
//! Defines result structures returned by storage operations.

/// Result of emptying the storage root
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepResult {
    pub removed: usize,
    pub failed: usize,
}

//! Aggregate counters for one parse pass

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-type-code record counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCounts {
    /// Records of this type read from the file
    pub seen: u64,
    /// Records of this type appended to the table
    pub appended: u64,
}

/// Counters accumulated across a whole pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionStats {
    /// Total records read from the file
    pub records_seen: u64,
    /// Records appended to a table
    pub records_appended: u64,
    /// Records skipped because their type code has no registered schema
    pub records_skipped_unrecognized: u64,
    /// Records skipped because the type filter excluded them
    pub records_skipped_filtered: u64,
    /// Records dropped whole under the record-fatal failure policy
    pub records_errored: u64,
    /// Field-scoped decode failures across all appended records
    pub field_failures: u64,
    /// Per-type-code counters, keyed by type code
    pub per_type: BTreeMap<String, TypeCounts>,
}

impl SessionStats {
    /// Total skipped records, both unrecognized and filtered
    pub fn records_skipped(&self) -> u64 {
        self.records_skipped_unrecognized + self.records_skipped_filtered
    }

    /// Appended + skipped + errored must account for every record seen
    pub fn is_balanced(&self) -> bool {
        self.records_appended + self.records_skipped() + self.records_errored == self.records_seen
    }

    /// One-line human summary
    pub fn summary(&self) -> String {
        format!(
            "{} records: {} appended, {} skipped ({} unrecognized), {} errored, {} field failures",
            self.records_seen,
            self.records_appended,
            self.records_skipped(),
            self.records_skipped_unrecognized,
            self.records_errored,
            self.field_failures
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conservation_holds_for_empty_stats() {
        assert!(SessionStats::default().is_balanced());
    }

    #[test]
    fn conservation_detects_an_unaccounted_record() {
        let stats = SessionStats {
            records_seen: 3,
            records_appended: 1,
            records_skipped_unrecognized: 1,
            ..SessionStats::default()
        };
        assert!(!stats.is_balanced());
    }

    #[test]
    fn summary_mentions_every_counter() {
        let stats = SessionStats {
            records_seen: 10,
            records_appended: 7,
            records_skipped_unrecognized: 2,
            records_skipped_filtered: 1,
            field_failures: 4,
            ..SessionStats::default()
        };
        let summary = stats.summary();
        assert!(summary.contains("10 records"));
        assert!(summary.contains("7 appended"));
        assert!(summary.contains("3 skipped"));
        assert!(summary.contains("4 field failures"));
    }
}

//! Record validation for uploaded shipment batches.
//!
//! Validation runs in three steps:
//!
//! 1. **Header check** - the key set of the first row must contain every
//!    column in [`REQUIRED_FIELDS`]. Otherwise the whole batch is rejected
//!    with [`ValidationError::MissingColumns`] and no flags are computed.
//! 2. **Duplicate detection** - a row is flagged when its tracking value
//!    already appeared earlier in the batch. First occurrences never are.
//! 3. **Completeness** - a row is flagged when any required field is
//!    absent or blank after trimming.
//!
//! Flags are advisory: flagged rows still reach the preview and the PDF.
//!
//! # Example
//!
//! ```rust,ignore
//! use shiplabel::{parse_bytes, validate};
//!
//! let parsed = parse_bytes(std::fs::read("shipments.csv")?.as_slice())?;
//! let records = validate(parsed.records)?;
//! println!("{} records, {} flagged", records.len(), records.flagged_count());
//! ```

use log::{debug, warn};
use std::collections::HashSet;

use crate::error::ValidationError;
use crate::models::{RecordFlags, RecordSet, ShipmentRecord, REQUIRED_FIELDS};

/// Required columns absent from `columns`, in required-list order.
pub fn missing_columns<'a, I>(columns: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: HashSet<&str> = columns.into_iter().collect();
    REQUIRED_FIELDS
        .iter()
        .filter(|required| !present.contains(*required))
        .map(|required| required.to_string())
        .collect()
}

/// Duplicate-tracking flag for each row, in order.
fn duplicate_flags(rows: &[ShipmentRecord]) -> Vec<bool> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(rows.len());
    rows.iter()
        .map(|row| !seen.insert(row.tracking()))
        .collect()
}

/// Validate a parsed batch and attach advisory flags.
pub fn validate(rows: Vec<ShipmentRecord>) -> Result<RecordSet, ValidationError> {
    let first_row_keys: Vec<&str> = rows.first().map(|r| r.keys().collect()).unwrap_or_default();
    let missing = missing_columns(first_row_keys);
    if !missing.is_empty() {
        debug!("Rejecting batch of {} rows: missing {:?}", rows.len(), missing);
        return Err(ValidationError::MissingColumns(missing));
    }

    let flags: Vec<RecordFlags> = duplicate_flags(&rows)
        .into_iter()
        .zip(rows.iter())
        .map(|(duplicate_tracking, row)| RecordFlags {
            duplicate_tracking,
            missing_field: row.has_missing_field(),
        })
        .collect();

    for (i, f) in flags.iter().enumerate().filter(|(_, f)| f.is_flagged()) {
        warn!(
            "Row {} flagged (duplicate tracking: {}, missing field: {})",
            i + 1,
            f.duplicate_tracking,
            f.missing_field
        );
    }

    Ok(RecordSet::from_parts(rows, flags))
}

/// Quick check: does this batch pass the header check?
pub fn is_valid(rows: &[ShipmentRecord]) -> bool {
    let keys: Vec<&str> = rows.first().map(|r| r.keys().collect()).unwrap_or_default();
    missing_columns(keys).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(tracking: &str) -> ShipmentRecord {
        REQUIRED_FIELDS
            .iter()
            .map(|k| (*k, "x"))
            .collect::<ShipmentRecord>()
            .with("tracking", tracking)
    }

    #[test]
    fn test_complete_rows_pass() {
        let set = validate(vec![row("A"), row("B")]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.flagged_count(), 0);
    }

    #[test]
    fn test_empty_batch_reports_all_columns() {
        let err = validate(Vec::new()).unwrap_err();
        assert_eq!(err.missing_columns(), REQUIRED_FIELDS);
    }

    #[test]
    fn test_missing_columns_in_required_order() {
        let first = ShipmentRecord::new()
            .with("tracking", "A")
            .with("from_name", "x")
            .with("notes", "extra");
        let err = validate(vec![first]).unwrap_err();
        assert_eq!(
            err.missing_columns(),
            [
                "from_address",
                "from_phone",
                "to_name",
                "to_address",
                "to_phone",
                "ship_date",
                "weight",
            ]
        );
    }

    #[test]
    fn test_only_first_row_keys_checked() {
        let short = ShipmentRecord::new().with("tracking", "B");
        let set = validate(vec![row("A"), short]).unwrap();
        let flags: Vec<_> = set.iter().map(|r| r.flags.missing_field).collect();
        assert_eq!(flags, vec![false, true]);
    }

    #[test]
    fn test_duplicate_tracking_sequence() {
        let set = validate(vec![row("A"), row("B"), row("A"), row("A")]).unwrap();
        let flags: Vec<_> = set.iter().map(|r| r.flags.duplicate_tracking).collect();
        assert_eq!(flags, vec![false, false, true, true]);
    }

    #[test]
    fn test_empty_tracking_counts_for_duplicates() {
        let set = validate(vec![row(""), row("")]).unwrap();
        let flags: Vec<_> = set.iter().map(|r| r.flags).collect();
        assert!(flags[0].missing_field);
        assert!(!flags[0].duplicate_tracking);
        assert!(flags[1].duplicate_tracking);
    }

    #[test]
    fn test_whitespace_only_field_is_missing() {
        let set = validate(vec![row("A").with("to_phone", "   ")]).unwrap();
        let first = set.get(0).unwrap();
        assert!(first.flags.missing_field);
        assert!(first.is_flagged());
    }

    #[test]
    fn test_flagged_rows_are_kept() {
        let set = validate(vec![row("A"), row("A").with("weight", "")]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.flagged_count(), 1);
    }

    #[test]
    fn test_is_valid() {
        assert!(is_valid(&[row("A")]));
        assert!(!is_valid(&[]));
    }
}

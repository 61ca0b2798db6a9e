//! Domain models for shipping labels.
//!
//! - [`ShipmentRecord`] - One parsed CSV row, immutable
//! - [`RecordFlags`] - Advisory flags derived by the validator
//! - [`RecordSet`] - Validated records with their flags, in CSV order
//! - [`AnnotatedRecord`] - A record and its flags, composed at read time
//! - [`PageFormat`] - Output page geometry

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Columns every shipment CSV must provide, in the order they are reported.
pub const REQUIRED_FIELDS: [&str; 9] = [
    "from_name",
    "from_address",
    "from_phone",
    "to_name",
    "to_address",
    "to_phone",
    "ship_date",
    "weight",
    "tracking",
];

// =============================================================================
// Shipment Record
// =============================================================================

/// One CSV data row: column name to raw cell value.
///
/// Values are never trimmed or coerced. A row shorter than the header simply
/// lacks the trailing keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShipmentRecord {
    fields: HashMap<String, String>,
}

impl ShipmentRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and fixtures.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Raw value, `None` if the column is absent from this row.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Raw value, or `""` when absent.
    pub fn field(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn tracking(&self) -> &str {
        self.field("tracking")
    }

    /// True when a required field is absent or blank after trimming.
    pub fn has_missing_field(&self) -> bool {
        REQUIRED_FIELDS
            .iter()
            .any(|key| self.get(key).map_or(true, |v| v.trim().is_empty()))
    }

    /// Sender name, address and phone joined by newlines.
    pub fn sender_block(&self) -> String {
        format!(
            "{}\n{}\n{}",
            self.field("from_name"),
            self.field("from_address"),
            self.field("from_phone")
        )
    }

    /// Recipient name, address and phone joined by newlines.
    pub fn recipient_block(&self) -> String {
        format!(
            "{}\n{}\n{}",
            self.field("to_name"),
            self.field("to_address"),
            self.field("to_phone")
        )
    }
}

impl<K, V> FromIterator<(K, V)> for ShipmentRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// =============================================================================
// Flags
// =============================================================================

/// Advisory per-row flags. Never filter records out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFlags {
    /// An earlier record has the same tracking value.
    pub duplicate_tracking: bool,
    /// A required field is absent or blank.
    pub missing_field: bool,
}

impl RecordFlags {
    pub fn is_flagged(&self) -> bool {
        self.duplicate_tracking || self.missing_field
    }
}

// =============================================================================
// Record Set
// =============================================================================

/// Validated records in CSV row order, with flags kept beside them.
///
/// Only [`crate::validation::validate`] can build one, so flags are always
/// derived from the records they describe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    records: Vec<ShipmentRecord>,
    flags: Vec<RecordFlags>,
}

impl RecordSet {
    pub(crate) fn from_parts(records: Vec<ShipmentRecord>, flags: Vec<RecordFlags>) -> Self {
        debug_assert_eq!(records.len(), flags.len());
        Self { records, flags }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<AnnotatedRecord<'_>> {
        Some(AnnotatedRecord {
            index,
            record: self.records.get(index)?,
            flags: *self.flags.get(index)?,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = AnnotatedRecord<'_>> {
        self.records
            .iter()
            .zip(self.flags.iter().copied())
            .enumerate()
            .map(|(index, (record, flags))| AnnotatedRecord { index, record, flags })
    }

    pub fn records(&self) -> &[ShipmentRecord] {
        &self.records
    }

    pub fn flagged_count(&self) -> usize {
        self.flags.iter().filter(|f| f.is_flagged()).count()
    }
}

/// A record paired with its flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotatedRecord<'a> {
    /// Zero-based position in the record set.
    pub index: usize,
    pub record: &'a ShipmentRecord,
    pub flags: RecordFlags,
}

impl AnnotatedRecord<'_> {
    pub fn is_flagged(&self) -> bool {
        self.flags.is_flagged()
    }
}

// =============================================================================
// Page Format
// =============================================================================

/// Physical output geometry for a label document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageFormat {
    /// 4×6 inch thermal label (101.6 × 152.4 mm).
    #[default]
    #[serde(rename = "4x6")]
    FourBySix,
    /// A6 sheet (105 × 148 mm).
    #[serde(rename = "a6")]
    A6,
    /// A4 sheet (210 × 297 mm). The name promises four labels per sheet;
    /// one label is placed per page, as with every other format.
    #[serde(rename = "a4-4")]
    A4Multi,
}

impl PageFormat {
    pub const ALL: [PageFormat; 3] = [PageFormat::FourBySix, PageFormat::A6, PageFormat::A4Multi];

    /// Page width and height in millimetres.
    pub fn page_size_mm(&self) -> (f32, f32) {
        match self {
            PageFormat::FourBySix => (101.6, 152.4),
            PageFormat::A6 => (105.0, 148.0),
            PageFormat::A4Multi => (210.0, 297.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PageFormat::FourBySix => "4x6",
            PageFormat::A6 => "a6",
            PageFormat::A4Multi => "a4-4",
        }
    }

    /// Human-readable name for format pickers.
    pub fn label(&self) -> &'static str {
        match self {
            PageFormat::FourBySix => "4×6 inch label",
            PageFormat::A6 => "A6",
            PageFormat::A4Multi => "A4 (4 per page)",
        }
    }

    /// Lenient parse for UI selectors: anything unknown falls back to A6.
    pub fn from_selector(value: &str) -> Self {
        value.parse().unwrap_or(PageFormat::A6)
    }
}

impl fmt::Display for PageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "4x6" => Ok(PageFormat::FourBySix),
            "a6" => Ok(PageFormat::A6),
            "a4-4" | "a4" => Ok(PageFormat::A4Multi),
            other => Err(format!(
                "unknown page format '{}' (expected 4x6, a6 or a4-4)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> ShipmentRecord {
        REQUIRED_FIELDS.iter().map(|k| (*k, "x")).collect()
    }

    #[test]
    fn test_absent_field_reads_as_empty() {
        let record = ShipmentRecord::new().with("from_name", "Adnan");
        assert_eq!(record.get("to_name"), None);
        assert_eq!(record.field("to_name"), "");
        assert_eq!(record.field("from_name"), "Adnan");
    }

    #[test]
    fn test_missing_field_detection() {
        assert!(!full_record().has_missing_field());
        assert!(full_record().with("weight", "  \t").has_missing_field());
        assert!(full_record().with("weight", "").has_missing_field());

        let mut partial = ShipmentRecord::new();
        for key in REQUIRED_FIELDS.iter().take(8) {
            partial = partial.with(*key, "x");
        }
        assert!(partial.has_missing_field());
    }

    #[test]
    fn test_blocks_join_with_newlines() {
        let record = ShipmentRecord::new()
            .with("from_name", "Adnan")
            .with("from_address", "Kochi")
            .with("from_phone", "99999")
            .with("to_name", "Rahul");
        assert_eq!(record.sender_block(), "Adnan\nKochi\n99999");
        assert_eq!(record.recipient_block(), "Rahul\n\n");
    }

    #[test]
    fn test_page_format_parse() {
        assert_eq!("4x6".parse::<PageFormat>().unwrap(), PageFormat::FourBySix);
        assert_eq!("A6".parse::<PageFormat>().unwrap(), PageFormat::A6);
        assert_eq!("a4-4".parse::<PageFormat>().unwrap(), PageFormat::A4Multi);
        assert!("letter".parse::<PageFormat>().is_err());
        assert_eq!(PageFormat::from_selector("letter"), PageFormat::A6);
    }

    #[test]
    fn test_page_sizes() {
        assert_eq!(PageFormat::FourBySix.page_size_mm(), (101.6, 152.4));
        assert_eq!(PageFormat::A6.page_size_mm(), (105.0, 148.0));
        assert_eq!(PageFormat::A4Multi.page_size_mm(), (210.0, 297.0));
    }

    #[test]
    fn test_page_format_serde_names() {
        let json = serde_json::to_string(&PageFormat::A4Multi).unwrap();
        assert_eq!(json, "\"a4-4\"");
        let back: PageFormat = serde_json::from_str("\"4x6\"").unwrap();
        assert_eq!(back, PageFormat::FourBySix);
    }

    #[test]
    fn test_record_set_iteration_keeps_order() {
        let records = vec![
            ShipmentRecord::new().with("tracking", "A"),
            ShipmentRecord::new().with("tracking", "B"),
        ];
        let flags = vec![
            RecordFlags::default(),
            RecordFlags { duplicate_tracking: true, missing_field: false },
        ];
        let set = RecordSet::from_parts(records, flags);
        let seen: Vec<_> = set.iter().map(|r| (r.index, r.record.tracking(), r.is_flagged())).collect();
        assert_eq!(seen, vec![(0, "A", false), (1, "B", true)]);
        assert_eq!(set.flagged_count(), 1);
    }
}

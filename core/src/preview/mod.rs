//! Preview cards for the loaded record set.
//!
//! Each record becomes a [`PreviewCard`] carrying its display fields and an
//! SVG barcode image. Cards serialise in camelCase for the web front end.

use serde::{Deserialize, Serialize};

use crate::barcode::Barcode;
use crate::models::{AnnotatedRecord, RecordFlags, RecordSet};

/// One label as shown in the preview grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewCard {
    /// 1-based position in the record set
    pub sequence: usize,
    /// "Label N"
    pub title: String,
    pub from_name: String,
    pub from_address: String,
    pub to_name: String,
    pub to_address: String,
    pub tracking: String,
    /// Standalone SVG of the tracking barcode
    pub barcode_svg: String,
    pub flags: RecordFlags,
    /// True when any flag is set
    pub flagged: bool,
}

impl PreviewCard {
    fn from_record(entry: AnnotatedRecord<'_>) -> Self {
        let record = entry.record;
        let sequence = entry.index + 1;
        Self {
            sequence,
            title: format!("Label {}", sequence),
            from_name: record.field("from_name").to_string(),
            from_address: record.field("from_address").to_string(),
            to_name: record.field("to_name").to_string(),
            to_address: record.field("to_address").to_string(),
            tracking: record.tracking().to_string(),
            barcode_svg: Barcode::encode_or_placeholder(record.tracking()).to_svg(),
            flags: entry.flags,
            flagged: entry.is_flagged(),
        }
    }
}

/// Rendered preview of a whole record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    /// Upload the cards were rendered from; 0 outside a session
    #[serde(default)]
    pub generation: u64,
    /// Number of records, shown as "N Labels Loaded"
    pub total: usize,
    pub cards: Vec<PreviewCard>,
}

/// Identifies a card across re-renders: (upload generation, sequence).
pub type CardKey = (u64, usize);

impl Preview {
    /// Cards paired with keys that differ between uploads, so a list keyed
    /// on them is rebuilt when a new file replaces the old one.
    pub fn keyed_cards(&self) -> Vec<(CardKey, PreviewCard)> {
        self.cards
            .iter()
            .map(|card| ((self.generation, card.sequence), card.clone()))
            .collect()
    }

    pub fn flagged_count(&self) -> usize {
        self.cards.iter().filter(|c| c.flagged).count()
    }

    /// Count line for the page header.
    pub fn summary(&self) -> String {
        format!("{} Labels Loaded", self.total)
    }
}

/// Render one card per record, in record order.
pub fn render(records: &RecordSet) -> Preview {
    Preview {
        generation: 0,
        total: records.len(),
        cards: records.iter().map(PreviewCard::from_record).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::barcode::PLACEHOLDER;
    use crate::models::{ShipmentRecord, REQUIRED_FIELDS};
    use crate::validation::validate;

    fn row(tracking: &str) -> ShipmentRecord {
        REQUIRED_FIELDS
            .iter()
            .map(|k| (*k, "x"))
            .collect::<ShipmentRecord>()
            .with("from_name", "Adnan")
            .with("to_name", "Rahul")
            .with("tracking", tracking)
    }

    #[test]
    fn test_cards_follow_record_order() {
        let preview = render(&validate(vec![row("A"), row("B")]).unwrap());
        assert_eq!(preview.total, 2);
        assert_eq!(preview.summary(), "2 Labels Loaded");
        assert_eq!(preview.cards[0].title, "Label 1");
        assert_eq!(preview.cards[1].title, "Label 2");
        assert_eq!(preview.cards[1].tracking, "B");
        assert_eq!(preview.cards[0].from_name, "Adnan");
        assert_eq!(preview.cards[0].to_name, "Rahul");
    }

    #[test]
    fn test_keys_follow_generation() {
        let mut preview = render(&validate(vec![row("A"), row("B")]).unwrap());
        preview.generation = 7;
        let keys: Vec<CardKey> = preview.keyed_cards().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![(7, 1), (7, 2)]);
    }

    #[test]
    fn test_render_is_idempotent() {
        let set = validate(vec![row("TRK001"), row("TRK001")]).unwrap();
        assert_eq!(render(&set), render(&set));
    }

    #[test]
    fn test_flagged_cards() {
        let set = validate(vec![row("A"), row("A"), row("C").with("weight", " ")]).unwrap();
        let preview = render(&set);
        let flagged: Vec<bool> = preview.cards.iter().map(|c| c.flagged).collect();
        assert_eq!(flagged, vec![false, true, true]);
        assert!(preview.cards[1].flags.duplicate_tracking);
        assert!(preview.cards[2].flags.missing_field);
        assert_eq!(preview.flagged_count(), 2);
    }

    #[test]
    fn test_empty_tracking_uses_placeholder_barcode() {
        let preview = render(&validate(vec![row("")]).unwrap());
        let expected = Barcode::encode(PLACEHOLDER).unwrap().to_svg();
        assert_eq!(preview.cards[0].barcode_svg, expected);
    }

    #[test]
    fn test_serialises_camel_case() {
        let preview = render(&validate(vec![row("A")]).unwrap());
        let json = serde_json::to_value(&preview).unwrap();
        assert_eq!(json["cards"][0]["barcodeSvg"].as_str().map(|s| s.starts_with("<svg")), Some(true));
        assert_eq!(json["cards"][0]["flags"]["duplicateTracking"], false);
    }
}

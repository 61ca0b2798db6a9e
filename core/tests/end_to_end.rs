use shiplabel::layout::DrawOp;
use shiplabel::{
    assemble, parse_bytes, parse_file, render, validate, LabelSession, PageFormat, PdfOptions,
    SAMPLE_CSV,
};
use std::io::Write;

const TWO_ROWS: &str = "from_name;from_address;from_phone;to_name;to_address;to_phone;ship_date;weight;tracking\n\
Adnan;Kochi;99999;Rahul;Bangalore;88888;2025-02-01;1kg;TRK001\n\
Meera;Chennai;77777;Arjun;Pune;66666;2025-02-02;2kg;TRK001\n";

#[test]
fn sample_csv_becomes_one_page_4x6_document() {
    let parsed = parse_bytes(SAMPLE_CSV.as_bytes()).unwrap();
    let records = validate(parsed.records).unwrap();
    let document = assemble(&records, PageFormat::FourBySix).unwrap();

    assert_eq!(document.page_count(), 1);
    let page = &document.pages()[0];
    assert_eq!(page.size(), (101.6, 152.4));

    let text = page.text_lines();
    for expected in ["FROM:", "Adnan", "Kochi", "99999", "TO:", "Rahul", "Bangalore", "88888"] {
        assert!(text.contains(&expected), "missing {:?} in {:?}", expected, text);
    }

    let barcode = page
        .ops()
        .iter()
        .find_map(|op| match op {
            DrawOp::Barcode { code, .. } => Some(code.value().to_string()),
            _ => None,
        })
        .unwrap();
    assert_eq!(barcode, "TRK001");

    let pdf = document.to_pdf(&PdfOptions::default());
    assert!(pdf.starts_with(b"%PDF-"));
}

#[test]
fn semicolon_file_round_trip() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(TWO_ROWS.as_bytes()).unwrap();

    let parsed = parse_file(file.path()).unwrap();
    assert_eq!(parsed.delimiter, ';');

    let records = validate(parsed.records).unwrap();
    assert_eq!(records.len(), 2);

    let preview = render(&records);
    assert_eq!(preview.summary(), "2 Labels Loaded");
    assert!(!preview.cards[0].flagged);
    assert!(preview.cards[1].flags.duplicate_tracking);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("labels.pdf");
    assemble(&records, PageFormat::A6)
        .unwrap()
        .save(&out, &PdfOptions::default())
        .unwrap();

    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    let pages = bytes.windows(b"/MediaBox".len()).filter(|w| *w == b"/MediaBox").count();
    assert_eq!(pages, 2);
}

#[test]
fn session_rejects_missing_columns_then_recovers() {
    let mut session = LabelSession::new();

    let err = session
        .upload("bad.csv", b"from_name,tracking\nAdnan,TRK001\n")
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Missing columns: from_address, from_phone, to_name, to_address, to_phone, ship_date, weight"
    );
    assert!(session.preview().is_none());

    session.upload("sample.csv", SAMPLE_CSV.as_bytes()).unwrap();
    assert_eq!(session.status().map(|s| s.to_string()), Some("CSV OK".to_string()));

    let pdf = session
        .generate(PageFormat::from_selector("letter"), &PdfOptions::default())
        .unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
}

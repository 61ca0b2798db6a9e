//! CSV parser with encoding and delimiter auto-detection.
//!
//! Turns raw upload bytes into [`ShipmentRecord`]s. No validation happens
//! here: missing columns and blank cells are the validator's business.

use csv::{ReaderBuilder, Trim};
use log::debug;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::models::ShipmentRecord;

const UTF8_BOM: char = '\u{feff}';

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed rows, in file order
    pub records: Vec<ShipmentRecord>,
    /// Column headers, trimmed
    pub headers: Vec<String>,
    /// Detected encoding
    pub encoding: String,
    /// Detected delimiter
    pub delimiter: char,
}

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 is always taken as UTF-8; chardet only guesses for bytes
/// that are not.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to string using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let decoded = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "utf-8-sig" | "ascii" => String::from_utf8_lossy(bytes).into_owned(),
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        other => match encoding_rs::Encoding::for_label(other.as_bytes()) {
            Some(enc) => {
                let (text, _, had_errors) = enc.decode(bytes);
                if had_errors {
                    return Err(CsvError::Encoding {
                        encoding: other.to_string(),
                        message: "invalid byte sequence".to_string(),
                    });
                }
                text.into_owned()
            }
            None => String::from_utf8_lossy(bytes).into_owned(),
        },
    };

    if decoded.starts_with(UTF8_BOM) {
        Ok(decoded[UTF8_BOM.len_utf8()..].to_string())
    } else {
        Ok(decoded)
    }
}

/// Detect the delimiter by counting occurrences in the first line.
///
/// Ties keep the earlier candidate; a line without any candidate is
/// treated as comma-separated.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse decoded CSV text with an explicit delimiter.
///
/// The first line is the header. Blank lines are skipped, but a row of
/// empty cells (`,,,`) is kept. A row with fewer
/// cells than headers produces a record without the trailing keys; extra
/// cells beyond the header are dropped.
pub fn parse_str(content: &str, delimiter: char) -> CsvResult<(Vec<String>, Vec<ShipmentRecord>)> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let delimiter = u8::try_from(delimiter).map_err(|_| CsvError::ParseError {
        line: 1,
        message: format!("unsupported delimiter '{}'", delimiter),
    })?;

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(CsvError::NoHeaders);
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let record: ShipmentRecord = headers
            .iter()
            .zip(row.iter())
            .filter(|(header, _)| !header.is_empty())
            .map(|(header, value)| (header.as_str(), value))
            .collect();
        records.push(record);
    }

    Ok((headers, records))
}

/// Parse CSV bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes(bytes: &[u8]) -> CsvResult<ParseResult> {
    if bytes.is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding)?;
    let delimiter = detect_delimiter(&content);
    debug!("Detected encoding {} and delimiter {:?}", encoding, delimiter);

    let (headers, records) = parse_str(&content, delimiter)?;
    debug!("Parsed {} rows with {} columns", records.len(), headers.len());

    Ok(ParseResult {
        records,
        headers,
        encoding,
        delimiter,
    })
}

/// Parse a CSV file with auto-detection of encoding and delimiter.
pub fn parse_file<P: AsRef<Path>>(path: P) -> CsvResult<ParseResult> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "from_name,from_address,from_phone,to_name,to_address,to_phone,ship_date,weight,tracking";

    #[test]
    fn test_simple_csv() {
        let csv = format!("{}\nAdnan,Kochi,99999,Rahul,Bangalore,88888,2025-02-01,1kg,TRK001", HEADER);
        let result = parse_bytes(csv.as_bytes()).unwrap();

        assert_eq!(result.delimiter, ',');
        assert_eq!(result.headers.len(), 9);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].field("from_name"), "Adnan");
        assert_eq!(result.records[0].tracking(), "TRK001");
    }

    #[test]
    fn test_values_are_not_trimmed() {
        let (_, rows) = parse_str("a,b\n  x ,   ", ',').unwrap();
        assert_eq!(rows[0].field("a"), "  x ");
        assert_eq!(rows[0].field("b"), "   ");
    }

    #[test]
    fn test_headers_are_trimmed() {
        let (headers, rows) = parse_str(" a , b\n1,2", ',').unwrap();
        assert_eq!(headers, vec!["a", "b"]);
        assert_eq!(rows[0].field("b"), "2");
    }

    #[test]
    fn test_quoted_values() {
        let (_, rows) = parse_str("name,address\n\"Alice\",\"12 Main St, Apt 4\"", ',').unwrap();
        assert_eq!(rows[0].field("name"), "Alice");
        assert_eq!(rows[0].field("address"), "12 Main St, Apt 4");
    }

    #[test]
    fn test_empty_lines_skipped() {
        let (_, rows) = parse_str("a,b\n1,2\n\n3,4\n", ',').unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_row_of_empty_cells_is_kept() {
        let csv = format!("{}\nA,B,C,D,E,F,G,H,T1\n,,,,,,,,\n", HEADER);
        let result = parse_bytes(csv.as_bytes()).unwrap();
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[1].tracking(), "");
        assert_eq!(result.records[1].len(), 9);

        let set = crate::validation::validate(result.records).unwrap();
        let flags: Vec<_> = set.iter().map(|entry| entry.flags).collect();
        assert!(!flags[0].missing_field);
        assert!(flags[1].missing_field);
        assert_eq!(set.flagged_count(), 1);
    }

    #[test]
    fn test_utf8_names_are_not_reinterpreted() {
        for name in ["Zoë", "Müller", "café", "Renée"] {
            let csv = format!("{}\n{},K,1,R,B,2,d,1kg,T", HEADER, name);
            let result = parse_bytes(csv.as_bytes()).unwrap();
            assert_eq!(result.encoding, "utf-8");
            assert_eq!(result.records[0].field("from_name"), name);
        }
    }

    #[test]
    fn test_valid_utf8_skips_detection() {
        assert_eq!(detect_encoding("Société".as_bytes()), "utf-8");
        assert_eq!(detect_encoding(b"plain ascii"), "utf-8");
    }

    #[test]
    fn test_short_row_lacks_trailing_keys() {
        let (_, rows) = parse_str("a,b,c\n1,2", ',').unwrap();
        assert_eq!(rows[0].get("b"), Some("2"));
        assert_eq!(rows[0].get("c"), None);
    }

    #[test]
    fn test_extra_cells_dropped() {
        let (_, rows) = parse_str("a,b\n1,2,3,4", ',').unwrap();
        assert_eq!(rows[0].len(), 2);
    }

    #[test]
    fn test_empty_csv_error() {
        assert!(matches!(parse_bytes(b""), Err(CsvError::EmptyFile)));
        assert!(matches!(parse_str("\n\n", ','), Err(CsvError::EmptyFile)));
    }

    #[test]
    fn test_header_only() {
        let result = parse_bytes(HEADER.as_bytes()).unwrap();
        assert!(result.records.is_empty());
        assert_eq!(result.headers.len(), 9);
    }

    #[test]
    fn test_bom_is_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"tracking\nTRK1");
        let result = parse_bytes(&bytes).unwrap();
        assert_eq!(result.headers, vec!["tracking"]);
        assert_eq!(result.records[0].tracking(), "TRK1");
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
        assert_eq!(detect_delimiter("a\tb\tc"), '\t');
        assert_eq!(detect_delimiter("a|b|c"), '|');
        assert_eq!(detect_delimiter("tracking"), ',');
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert_eq!(decoded, "Société");
    }
}

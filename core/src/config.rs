//! Application configuration.
//!
//! Fixed names and timings shared by the CLI and the web front end, plus
//! [`Settings`] for defaults that can be overridden from the environment.

use log::warn;
use std::path::PathBuf;

use crate::models::PageFormat;

/// Default name of the generated document.
pub const OUTPUT_FILENAME: &str = "labels.pdf";

/// MIME type of the generated document.
pub const PDF_MIME: &str = "application/pdf";

/// Delay between receiving a file and parsing it, in milliseconds.
pub const PARSE_DELAY_MS: u32 = 300;

/// Duration of the record count animation, in milliseconds.
pub const COUNT_POP_MS: u32 = 500;

/// How long a toast stays visible, in milliseconds.
pub const TOAST_MS: u32 = 2000;

/// Maximum accepted upload size (in bytes).
///
/// 10 MB limit.
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Environment variable holding the default page format.
pub const ENV_FORMAT: &str = "SHIPLABEL_FORMAT";

/// Environment variable holding the default output path.
pub const ENV_OUTPUT: &str = "SHIPLABEL_OUTPUT";

/// Defaults for document generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub default_format: PageFormat,
    pub output: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_format: PageFormat::default(),
            output: PathBuf::from(OUTPUT_FILENAME),
        }
    }
}

impl Settings {
    /// Read overrides from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file. An
    /// unrecognised format is ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(value) = lookup(ENV_FORMAT) {
            match value.parse() {
                Ok(format) => settings.default_format = format,
                Err(e) => warn!("Ignoring {}: {}", ENV_FORMAT, e),
            }
        }
        if let Some(value) = lookup(ENV_OUTPUT).filter(|v| !v.trim().is_empty()) {
            settings.output = PathBuf::from(value);
        }

        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup(&[]));
        assert_eq!(settings.default_format, PageFormat::FourBySix);
        assert_eq!(settings.output, PathBuf::from("labels.pdf"));
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("SHIPLABEL_FORMAT", "a4-4"),
            ("SHIPLABEL_OUTPUT", "out/batch.pdf"),
        ]));
        assert_eq!(settings.default_format, PageFormat::A4Multi);
        assert_eq!(settings.output, PathBuf::from("out/batch.pdf"));
    }

    #[test]
    fn test_bad_format_is_ignored() {
        let settings = Settings::from_lookup(lookup(&[("SHIPLABEL_FORMAT", "letter")]));
        assert_eq!(settings.default_format, PageFormat::FourBySix);
    }
}

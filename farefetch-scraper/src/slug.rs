//! City-name to URL-slug resolution for fallback navigation.
//!
//! Derivation is deterministic: transliterate to ASCII, lowercase,
//! collapse everything else to `-`. A replaceable override table maps
//! derived slugs onto the slugs the site actually uses; callers may merge
//! a JSON file of extra overrides on top of the built-in entries.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, ScrapeError};

/// Deterministic slug derivation. Same input, same output, every run.
pub fn slugify(value: &str) -> String {
    let mut ascii = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            'ç' | 'Ç' => ascii.push('c'),
            'ğ' | 'Ğ' => ascii.push('g'),
            'ı' | 'İ' => ascii.push('i'),
            'ö' | 'Ö' => ascii.push('o'),
            'ş' | 'Ş' => ascii.push('s'),
            'ü' | 'Ü' => ascii.push('u'),
            'â' | 'Â' => ascii.push('a'),
            'î' | 'Î' => ascii.push('i'),
            'û' | 'Û' => ascii.push('u'),
            c if c.is_ascii_alphanumeric() => ascii.push(c.to_ascii_lowercase()),
            c if c.is_alphabetic() => {} // unmapped non-ASCII letters are dropped
            _ => ascii.push(' '),
        }
    }

    let slug = ascii
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() { "unknown".to_string() } else { slug }
}

/// Slug override lookup, applied after derivation.
#[derive(Debug, Clone)]
pub struct SlugTable {
    overrides: HashMap<String, String>,
}

impl SlugTable {
    /// Built-in overrides for frequently requested cities/airports whose
    /// site slug differs from the transliterated name.
    pub fn builtin() -> Self {
        let mut overrides = HashMap::new();
        for (from, to) in [
            ("istanbul", "istanbul"),
            ("istanbul-avrupa", "istanbul"),
            ("istanbul-anadolu", "istanbul-saw"),
            ("istanbul-saw", "istanbul-saw"),
            ("lefkosa", "lefkosa"),
            ("nicosia", "lefkosa"),
            ("ercan", "ercan"),
        ] {
            overrides.insert(from.to_string(), to.to_string());
        }
        Self { overrides }
    }

    /// Built-in table with a JSON `{"derived-slug": "site-slug"}` file
    /// merged on top.
    pub fn with_overrides_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| ScrapeError::SlugMap {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        let extra: HashMap<String, String> =
            serde_json::from_str(&raw).map_err(|err| ScrapeError::SlugMap {
                path: path.display().to_string(),
                reason: err.to_string(),
            })?;

        let mut table = Self::builtin();
        for (from, to) in extra {
            table.overrides.insert(from.to_lowercase(), to);
        }
        debug!("loaded slug overrides from {}", path.display());
        Ok(table)
    }

    /// Derive the slug for a city name, then apply overrides.
    pub fn resolve(&self, city: &str) -> String {
        let derived = slugify(city);
        self.overrides
            .get(&derived)
            .cloned()
            .unwrap_or(derived)
    }
}

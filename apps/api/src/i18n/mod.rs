//! Translation lookup for validation messages and field labels.

mod en;
mod fr;
pub mod labels;
pub mod nationalities;

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use labels::field_label;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    #[default]
    Fr,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            "fr" | "fr-fr" => Ok(Locale::Fr),
            other => Err(format!("unsupported locale '{other}'")),
        }
    }
}

/// Key → text table for one locale. Unknown keys resolve to the key
/// itself so every lookup yields something displayable.
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: Locale,
    entries: HashMap<&'static str, &'static str>,
}

impl Catalog {
    pub fn new(locale: Locale) -> Self {
        let table: &[(&'static str, &'static str)] = match locale {
            Locale::En => en::ENTRIES,
            Locale::Fr => fr::ENTRIES,
        };
        Self {
            locale,
            entries: table.iter().copied().collect(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn t(&self, key: &str) -> String {
        match self.entries.get(key) {
            Some(text) => (*text).to_string(),
            None => {
                tracing::debug!(key, locale = ?self.locale, "missing translation");
                key.to_string()
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

//! Nationality lookup used to normalize free-text entries into
//! `{code, label}` pairs.

use crate::i18n::Locale;
use crate::models::cv::{Nationality, NationalityEntry};

/// (ISO 3166-1 alpha-2, English, French)
const NATIONALITIES: &[(&str, &str, &str)] = &[
    ("FR", "French", "Française"),
    ("BE", "Belgian", "Belge"),
    ("CH", "Swiss", "Suisse"),
    ("LU", "Luxembourgish", "Luxembourgeoise"),
    ("CA", "Canadian", "Canadienne"),
    ("DE", "German", "Allemande"),
    ("ES", "Spanish", "Espagnole"),
    ("IT", "Italian", "Italienne"),
    ("PT", "Portuguese", "Portugaise"),
    ("NL", "Dutch", "Néerlandaise"),
    ("GB", "British", "Britannique"),
    ("IE", "Irish", "Irlandaise"),
    ("US", "American", "Américaine"),
    ("MA", "Moroccan", "Marocaine"),
    ("DZ", "Algerian", "Algérienne"),
    ("TN", "Tunisian", "Tunisienne"),
    ("SN", "Senegalese", "Sénégalaise"),
    ("CI", "Ivorian", "Ivoirienne"),
    ("CM", "Cameroonian", "Camerounaise"),
    ("PL", "Polish", "Polonaise"),
    ("RO", "Romanian", "Roumaine"),
    ("BR", "Brazilian", "Brésilienne"),
    ("CN", "Chinese", "Chinoise"),
    ("IN", "Indian", "Indienne"),
    ("JP", "Japanese", "Japonaise"),
];

fn label_for(entry: &(&'static str, &'static str, &'static str), locale: Locale) -> &'static str {
    match locale {
        Locale::En => entry.1,
        Locale::Fr => entry.2,
    }
}

/// Resolves a code or a label (either locale, case-insensitive).
pub fn lookup(raw: &str, locale: Locale) -> Option<Nationality> {
    let raw = raw.trim();
    NATIONALITIES
        .iter()
        .find(|(code, en, fr)| {
            code.eq_ignore_ascii_case(raw)
                || en.to_lowercase() == raw.to_lowercase()
                || fr.to_lowercase() == raw.to_lowercase()
        })
        .map(|entry| Nationality {
            code: entry.0.to_string(),
            label: label_for(entry, locale).to_string(),
        })
}

/// Turns every entry into a `{code, label}` pair. Unknown strings keep
/// their text as both code and label; blank strings are dropped.
pub fn normalize(entries: &[NationalityEntry], locale: Locale) -> Vec<NationalityEntry> {
    entries
        .iter()
        .filter_map(|entry| match entry {
            NationalityEntry::Pair(pair) => Some(NationalityEntry::Pair(pair.clone())),
            NationalityEntry::Plain(raw) if raw.trim().is_empty() => None,
            NationalityEntry::Plain(raw) => {
                let pair = lookup(raw, locale).unwrap_or_else(|| Nationality {
                    code: raw.trim().to_string(),
                    label: raw.trim().to_string(),
                });
                Some(NationalityEntry::Pair(pair))
            }
        })
        .collect()
}

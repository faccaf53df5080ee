//! Deserializers for list-valued settings
//!
//! Environment variables carry lists as comma-separated strings while
//! `config.toml` uses arrays; both forms are accepted.

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrCsv {
    List(Vec<String>),
    Csv(String),
}

/// Split, trim, drop blanks and duplicates; keep first-seen order
pub(crate) fn normalize_list<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for item in items {
        for part in item.as_ref().split(',') {
            let part = part.trim();
            if !part.is_empty() && !out.iter().any(|seen| seen == part) {
                out.push(part.to_string());
            }
        }
    }
    out
}

pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ListOrCsv::deserialize(deserializer)? {
        ListOrCsv::List(items) => normalize_list(items),
        ListOrCsv::Csv(raw) => normalize_list([raw]),
    })
}

pub(crate) fn secret_list<'de, D>(deserializer: D) -> Result<Vec<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_list(deserializer)?
        .into_iter()
        .map(SecretString::from)
        .collect())
}

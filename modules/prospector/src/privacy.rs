//! Display-only redaction of business profiles. The operator previews
//! results without memorizing real identities; persisted records stay
//! unmasked.

use regex::Regex;
use serde_json::Value;

use prospector_common::BusinessProfile;

/// Fixed stand-in for the profile's source URL.
const REDACTED_URL: &str = "[redacted]";

/// Company names of one or two characters are too generic to redact from
/// free text.
const MIN_REDACTABLE_NAME_LEN: usize = 3;

/// Positional placeholder: 0 → "Target-A" … 25 → "Target-Z", then
/// spreadsheet-style pairs: 26 → "Target-AA", 27 → "Target-AB", …
pub fn placeholder(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push((b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    letters.reverse();
    format!("Target-{}", letters.into_iter().collect::<String>())
}

/// Produce the masked copy of a profile. Pure: no I/O, and the unmasked
/// profile is untouched.
///
/// The first whitespace token of the real company name is the redaction
/// pattern: every case-insensitive occurrence of it in string and
/// list-of-string fields becomes the placeholder. `company_name` and
/// `source_url` are overwritten unconditionally.
pub fn mask(profile: &BusinessProfile, index: usize) -> BusinessProfile {
    let placeholder = placeholder(index);

    let redactor = if profile.company_name.chars().count() >= MIN_REDACTABLE_NAME_LEN {
        profile
            .company_name
            .split_whitespace()
            .next()
            .and_then(|token| Regex::new(&format!("(?i){}", regex::escape(token))).ok())
    } else {
        None
    };

    let mut extra = serde_json::Map::new();
    for (key, value) in &profile.extra {
        let masked = match &redactor {
            Some(re) => mask_value(value, re, &placeholder),
            None => value.clone(),
        };
        extra.insert(key.clone(), masked);
    }
    extra.insert(
        "source_url".to_string(),
        Value::String(REDACTED_URL.to_string()),
    );

    BusinessProfile {
        company_name: placeholder,
        extra,
    }
}

/// Redact string and list-of-string values; everything else passes through.
fn mask_value(value: &Value, re: &Regex, placeholder: &str) -> Value {
    match value {
        Value::String(s) => Value::String(re.replace_all(s, placeholder).into_owned()),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Value::String(re.replace_all(s, placeholder).into_owned()),
                    other => other.clone(),
                })
                .collect(),
        ),
        other => other.clone(),
    }
}

//! Maps raw content-backend records onto the site's listing records.
//!
//! Custom fields live under `acf`. The backend sends `[]` or `false` there
//! when a post has none, and stores numbers as strings often enough that
//! every accessor accepts both. Empty strings, zero and `false` count as
//! absent and fall back to the listing defaults.

use serde::Deserialize;
use serde_json::{Map, Number, Value};
use shared::domain::{
    Project, TechSteward, Urgency, BUDGET_TBD, CONTACT_FOR_AVAILABILITY, DEFAULT_STEWARD_RATING,
    LOCATION_TBD, UNKNOWN_ORGANIZATION,
};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(Number),
    Text(String),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Rendered {
    rendered: String,
}

#[derive(Debug, Deserialize)]
struct RawProject {
    id: RawId,
    title: Rendered,
    #[serde(default)]
    excerpt: Option<Rendered>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    acf: Value,
}

#[derive(Debug, Deserialize)]
struct RawSteward {
    id: RawId,
    title: Rendered,
    #[serde(default)]
    content: Option<Rendered>,
    #[serde(default)]
    acf: Value,
}

/// Removes every `<...>` tag. Text after an unclosed `<` is kept as is.
pub fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('<') {
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        out.push_str(&rest[..open]);
        rest = &rest[open + close + 1..];
    }

    out.push_str(rest);
    out
}

pub fn projects(raw: Value) -> Result<Vec<Project>, serde_json::Error> {
    let records: Vec<RawProject> = serde_json::from_value(raw)?;
    Ok(records.into_iter().map(project_from_raw).collect())
}

pub fn tech_stewards(raw: Value) -> Result<Vec<TechSteward>, serde_json::Error> {
    let records: Vec<RawSteward> = serde_json::from_value(raw)?;
    Ok(records.into_iter().map(steward_from_raw).collect())
}

fn project_from_raw(raw: RawProject) -> Project {
    let acf = CustomFields::new(&raw.acf);

    Project {
        id: raw.id.into_string(),
        title: raw.title.rendered,
        organization: acf.text_or("organization", UNKNOWN_ORGANIZATION),
        description: raw
            .excerpt
            .map(|excerpt| strip_markup(&excerpt.rendered))
            .unwrap_or_default(),
        location: acf.text_or("location", LOCATION_TBD),
        skills_needed: acf.list("skills_needed"),
        urgency: acf
            .text("urgency")
            .and_then(|label| Urgency::from_label(&label))
            .unwrap_or_default(),
        budget: acf.text_or("budget", BUDGET_TBD),
        posted_date: raw.date.unwrap_or_default(),
        lat: acf.number("latitude").unwrap_or_default(),
        lng: acf.number("longitude").unwrap_or_default(),
    }
}

fn steward_from_raw(raw: RawSteward) -> TechSteward {
    let acf = CustomFields::new(&raw.acf);

    TechSteward {
        id: raw.id.into_string(),
        name: raw.title.rendered,
        location: acf.text_or("location", LOCATION_TBD),
        specialties: acf.list("specialties"),
        rating: acf.number("rating").unwrap_or(DEFAULT_STEWARD_RATING),
        reviews_count: acf.count("reviews_count").unwrap_or_default(),
        verified: acf.flag("verified"),
        availability: acf.text_or("availability", CONTACT_FOR_AVAILABILITY),
        bio: raw
            .content
            .map(|content| strip_markup(&content.rendered))
            .unwrap_or_default(),
        lat: acf.number("latitude").unwrap_or_default(),
        lng: acf.number("longitude").unwrap_or_default(),
    }
}

struct CustomFields<'a>(Option<&'a Map<String, Value>>);

impl<'a> CustomFields<'a> {
    fn new(acf: &'a Value) -> Self {
        Self(acf.as_object())
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.0?.get(key).filter(|value| is_present(value))
    }

    fn text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        }
    }

    fn text_or(&self, key: &str, default: &str) -> String {
        self.text(key).unwrap_or_else(|| default.to_string())
    }

    fn number(&self, key: &str) -> Option<f64> {
        let number = match self.get(key)? {
            Value::Number(number) => number.as_f64(),
            Value::String(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        (number.is_finite() && number != 0.0).then_some(number)
    }

    fn count(&self, key: &str) -> Option<u32> {
        let number = self.number(key)?;
        if number < 0.0 || number > f64::from(u32::MAX) {
            return None;
        }
        Some(number.trunc() as u32)
    }

    fn flag(&self, key: &str) -> bool {
        match self.get(key) {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Number(_)) => true,
            Some(Value::String(text)) => {
                matches!(text.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
            }
            _ => false,
        }
    }

    fn list(&self, key: &str) -> Vec<String> {
        match self.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
            Some(Value::String(text)) => text
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;

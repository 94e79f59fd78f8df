use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{FieldError, ValidationError};

const MAX_FREE_TEXT_CHARS: usize = 5000;

/// A form payload accepted by the transactional backend.
pub trait Submission: Serialize + Send + Sync {
    /// Human readable name used in errors and logs.
    const KIND: &'static str;
    /// Path below the transactional base url.
    const ROUTE: &'static str;

    fn validate(&self) -> Result<(), ValidationError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechHubApplication {
    pub applicant_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    pub location: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub motivation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Laptop,
    Desktop,
    Phone,
    Tablet,
    Server,
    Printer,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataDestruction {
    #[default]
    Wipe,
    PhysicalDestruction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupItem {
    pub device_type: DeviceType,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EWastePickupRequest {
    pub contact_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    pub address: String,
    pub preferred_date: NaiveDate,
    pub items: Vec<PickupItem>,
    #[serde(default)]
    pub data_destruction: DataDestruction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationFrequency {
    #[default]
    OneTime,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationRecord {
    pub donor_name: String,
    pub email: String,
    pub amount_cents: u64,
    pub currency: String,
    #[serde(default)]
    pub frequency: DonationFrequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default)]
    pub anonymous: bool,
}

impl Submission for TechHubApplication {
    const KIND: &'static str = "tech hub application";
    const ROUTE: &'static str = "tech-hub-applications";

    fn validate(&self) -> Result<(), ValidationError> {
        let mut checks = Checks::default();
        checks.required("applicant_name", &self.applicant_name);
        checks.email("email", &self.email);
        checks.required("location", &self.location);
        checks.free_text("motivation", &self.motivation);
        if self.skills.iter().any(|skill| skill.trim().is_empty()) {
            checks.fail("skills", "must not contain blank entries");
        }
        checks.finish(Self::KIND)
    }
}

impl Submission for EWastePickupRequest {
    const KIND: &'static str = "e-waste pickup request";
    const ROUTE: &'static str = "ewaste-pickups";

    fn validate(&self) -> Result<(), ValidationError> {
        let mut checks = Checks::default();
        checks.required("contact_name", &self.contact_name);
        checks.email("email", &self.email);
        checks.required("address", &self.address);
        if self.items.is_empty() {
            checks.fail("items", "must list at least one device");
        }
        if self.items.iter().any(|item| item.quantity == 0) {
            checks.fail("items", "quantity must be greater than zero");
        }
        if let Some(notes) = &self.notes {
            checks.max_chars("notes", notes);
        }
        checks.finish(Self::KIND)
    }
}

impl Submission for ContactMessage {
    const KIND: &'static str = "contact message";
    const ROUTE: &'static str = "contact";

    fn validate(&self) -> Result<(), ValidationError> {
        let mut checks = Checks::default();
        checks.required("name", &self.name);
        checks.email("email", &self.email);
        checks.free_text("message", &self.message);
        checks.finish(Self::KIND)
    }
}

impl Submission for DonationRecord {
    const KIND: &'static str = "donation";
    const ROUTE: &'static str = "donations";

    fn validate(&self) -> Result<(), ValidationError> {
        let mut checks = Checks::default();
        checks.required("donor_name", &self.donor_name);
        checks.email("email", &self.email);
        if self.amount_cents == 0 {
            checks.fail("amount_cents", "must be greater than zero");
        }
        if !is_currency_code(&self.currency) {
            checks.fail("currency", "must be a three-letter ISO 4217 code");
        }
        checks.finish(Self::KIND)
    }
}

#[derive(Default)]
struct Checks {
    errors: Vec<FieldError>,
}

impl Checks {
    fn fail(&mut self, field: &str, reason: &str) {
        self.errors.push(FieldError::new(field, reason));
    }

    fn required(&mut self, field: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.fail(field, "must not be empty");
            return false;
        }
        true
    }

    fn email(&mut self, field: &str, value: &str) {
        if self.required(field, value) && !is_plausible_email(value) {
            self.fail(field, "must be a valid email address");
        }
    }

    fn max_chars(&mut self, field: &str, value: &str) {
        if value.chars().count() > MAX_FREE_TEXT_CHARS {
            self.fail(field, "must be at most 5000 characters");
        }
    }

    fn free_text(&mut self, field: &str, value: &str) {
        if self.required(field, value) {
            self.max_chars(field, value);
        }
    }

    fn finish(self, kind: &'static str) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(kind, self.errors))
        }
    }
}

pub fn is_plausible_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.find('.') {
        Some(_) => !domain.starts_with('.') && !domain.ends_with('.'),
        None => false,
    }
}

fn is_currency_code(value: &str) -> bool {
    value.len() == 3 && value.bytes().all(|b| b.is_ascii_uppercase())
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;

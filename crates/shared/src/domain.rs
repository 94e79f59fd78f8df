use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const UNKNOWN_ORGANIZATION: &str = "Unknown Organization";
pub const LOCATION_TBD: &str = "Location TBD";
pub const BUDGET_TBD: &str = "Budget TBD";
pub const CONTACT_FOR_AVAILABILITY: &str = "Contact for availability";
pub const DEFAULT_STEWARD_RATING: f64 = 4.5;

/// Backend-native records the site renders without reshaping.
macro_rules! passthrough_record {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Value);

        impl $name {
            pub fn as_json(&self) -> &Value {
                &self.0
            }

            pub fn into_inner(self) -> Value {
                self.0
            }

            pub fn field(&self, key: &str) -> Option<&Value> {
                self.0.get(key)
            }
        }

        impl From<Value> for $name {
            fn from(value: Value) -> Self {
                Self(value)
            }
        }
    };
}

passthrough_record!(BlogPost);
passthrough_record!(TechHub);

impl BlogPost {
    pub fn id(&self) -> Option<u64> {
        self.field("id").and_then(Value::as_u64)
    }

    pub fn title(&self) -> Option<&str> {
        self.0.pointer("/title/rendered").and_then(Value::as_str)
    }

    pub fn link(&self) -> Option<&str> {
        self.field("link").and_then(Value::as_str)
    }
}

impl TechHub {
    pub fn name(&self) -> Option<&str> {
        self.field("name").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
}

impl Urgency {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// A volunteer project listing. Every field is populated; absent source data
/// is replaced with the defaults above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub organization: String,
    pub description: String,
    pub location: String,
    pub skills_needed: Vec<String>,
    pub urgency: Urgency,
    pub budget: String,
    pub posted_date: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechSteward {
    pub id: String,
    pub name: String,
    pub location: String,
    pub specialties: Vec<String>,
    pub rating: f64,
    pub reviews_count: u32,
    pub verified: bool,
    pub availability: String,
    pub bio: String,
    pub lat: f64,
    pub lng: f64,
}
